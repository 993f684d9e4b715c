// SPDX-License-Identifier: Apache-2.0

use crate::id::EntityId;
use serde::{Deserialize, Serialize};

/// Hard membership cap for the TOP-10 list. No create may push the
/// collection above this.
pub const TOP10_CAPACITY: usize = 10;

/// One entry of the ranked TOP-10 list. `order_index` is the rank,
/// zero-based internally and displayed one-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Top10Item {
    pub id: EntityId,
    pub title: String,
    pub order_index: u32,
    pub is_active: bool,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Top10ItemDraft {
    pub title: String,
    pub is_active: bool,
}
