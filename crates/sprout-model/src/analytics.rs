// SPDX-License-Identifier: Apache-2.0

use crate::id::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Which public surface a page view landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    Home,
    Article,
    Tag,
    Admin,
}

impl PageType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Article => "article",
            Self::Tag => "tag",
            Self::Admin => "admin",
        }
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        match input {
            "home" => Ok(Self::Home),
            "article" => Ok(Self::Article),
            "tag" => Ok(Self::Tag),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseError::InvalidFormat(
                "page_type must be one of: home, article, tag, admin",
            )),
        }
    }
}

impl Display for PageType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded page view, append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageView {
    pub page_type: PageType,
    pub page_id: Option<String>,
    pub visitor_id: String,
    pub session_id: String,
    pub user_agent: String,
    pub referrer: String,
    pub created_at: String,
}

/// Client-supplied tracking payload; the store stamps `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageViewDraft {
    pub page_type: PageType,
    pub page_id: Option<String>,
    pub visitor_id: String,
    pub session_id: String,
    pub user_agent: String,
    pub referrer: String,
}

/// Aggregate counters the admin analytics screen reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VisitorStats {
    pub active_visitors: u64,
    pub total_views: u64,
    pub today_views: u64,
    pub today_unique_visitors: u64,
}

/// Per-tag view counter, bumped on each tag page view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagStat {
    pub tag_name: String,
    pub view_count: u64,
    pub last_viewed_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_type_round_trips() {
        for pt in [PageType::Home, PageType::Article, PageType::Tag, PageType::Admin] {
            assert_eq!(PageType::parse(pt.as_str()), Ok(pt));
        }
        assert!(PageType::parse("checkout").is_err());
    }
}
