// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Admin sessions live for 24 hours.
pub const SESSION_TTL_SECS: u64 = 24 * 60 * 60;

/// A server-side admin session row. The token is also held client-side
/// in the `admin_token` cookie; the secret it was derived from never
/// leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdminSession {
    pub token: String,
    pub expires_at: String,
    pub created_at: String,
}
