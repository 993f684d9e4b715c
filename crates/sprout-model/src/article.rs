// SPDX-License-Identifier: Apache-2.0

use crate::badge::Badge;
use crate::id::EntityId;
use serde::{Deserialize, Serialize};

/// A published article card. Primary sort on the public surface is
/// `published_date` descending; `order_index` is best-effort only and
/// not kept contiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Article {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub image: String,
    pub badges: Vec<Badge>,
    pub category: String,
    pub published_date: String,
    pub is_featured: bool,
    pub is_active: bool,
    pub order_index: Option<u32>,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArticleDraft {
    pub title: String,
    pub description: String,
    pub image: String,
    pub badges: Vec<Badge>,
    pub category: String,
    pub is_featured: bool,
    pub is_active: bool,
}
