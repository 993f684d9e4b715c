// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use sprout_model::{
    HeroSlide, NewsClipping, PageType, PageView, PageViewDraft, SiteSettings, TagStat, Top10Item,
    VisitorStats,
};

const fn default_true() -> bool {
    true
}

/// Create payloads accept badges as the raw comma-separated operator
/// input; normalization happens server-side. Edits resend structured
/// badge objects and use the model draft types directly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateHeroRequest {
    pub image: String,
    pub title: String,
    #[serde(default)]
    pub badges: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateNewsRequest {
    pub image: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTop10Request {
    pub title: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateArticleRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub badges: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirectionDto {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoveRequest {
    pub direction: MoveDirectionDto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActiveRequest {
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeaturedRequest {
    pub is_featured: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OkResponse {
    pub ok: bool,
}

/// Client tracking beacon. `user_agent` and `referrer` default to
/// empty; everything else the client must supply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackRequest {
    pub page_type: PageType,
    #[serde(default)]
    pub page_id: Option<String>,
    pub visitor_id: String,
    pub session_id: String,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default)]
    pub referrer: String,
}

impl TrackRequest {
    #[must_use]
    pub fn into_draft(self) -> PageViewDraft {
        PageViewDraft {
            page_type: self.page_type,
            page_id: self.page_id,
            visitor_id: self.visitor_id,
            session_id: self.session_id,
            user_agent: self.user_agent,
            referrer: self.referrer,
        }
    }
}

/// Everything the public home page renders in one fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HomeResponse {
    pub hero: Vec<HeroSlide>,
    pub top10: Vec<Top10Item>,
    pub news: Vec<NewsClipping>,
    pub settings: SiteSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyticsResponse {
    pub stats: VisitorStats,
    pub recent_views: Vec<PageView>,
    pub popular_tags: Vec<TagStat>,
}

/// Admin list/mutation responses: mutations answer with the re-fetched
/// full collection so the dashboard never trusts local state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionResponse<T> {
    pub rows: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_hero_defaults_active_and_rejects_unknown_fields() {
        let req: CreateHeroRequest =
            serde_json::from_str(r#"{"image":"/x.png","title":"t"}"#).expect("deserialize");
        assert!(req.is_active);
        assert_eq!(req.badges, "");

        let bad = serde_json::from_str::<CreateHeroRequest>(
            r#"{"image":"/x.png","title":"t","order_index":3}"#,
        );
        assert!(bad.is_err(), "order_index is store-assigned, not client-supplied");
    }

    #[test]
    fn move_direction_is_snake_case() {
        let req: MoveRequest = serde_json::from_str(r#"{"direction":"up"}"#).expect("deserialize");
        assert_eq!(req.direction, MoveDirectionDto::Up);
    }
}
