// SPDX-License-Identifier: Apache-2.0

use crate::badge::Badge;
use crate::id::EntityId;
use serde::{Deserialize, Serialize};

/// One slide of the home-page hero carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeroSlide {
    pub id: EntityId,
    pub image: String,
    pub title: String,
    pub badges: Vec<Badge>,
    pub order_index: u32,
    pub is_active: bool,
    pub updated_at: String,
}

/// Full-field payload for both create and edit; edits resend every
/// field. `order_index` is store-assigned on create (appended at the
/// end) and untouched on edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeroSlideDraft {
    pub image: String,
    pub title: String,
    pub badges: Vec<Badge>,
    pub is_active: bool,
}
