// SPDX-License-Identifier: Apache-2.0

use crate::id::EntityId;
use serde::{Deserialize, Serialize};

/// A press-coverage clipping shown on the home page. Title is
/// optional; some clippings are image-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewsClipping {
    pub id: EntityId,
    pub image: String,
    pub title: Option<String>,
    pub order_index: u32,
    pub is_active: bool,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewsClippingDraft {
    pub image: String,
    pub title: Option<String>,
    pub is_active: bool,
}
