// SPDX-License-Identifier: Apache-2.0

use sprout_model::SESSION_TTL_SECS;

pub const CONFIG_SCHEMA_VERSION: &str = "1";

/// Server knobs. Secrets arrive from the environment only; neither is
/// ever serialized into a response or compared anywhere but the login
/// handler.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub admin_password: String,
    pub session_secret: String,
    pub session_ttl_secs: u64,
    pub max_body_bytes: usize,
    pub recent_views_limit: usize,
    pub popular_tags_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            admin_password: "sprout-dev-password".to_string(),
            session_secret: "sprout-dev-secret".to_string(),
            session_ttl_secs: SESSION_TTL_SECS,
            max_body_bytes: 64 * 1024,
            recent_views_limit: 50,
            popular_tags_limit: 10,
        }
    }
}
