#![forbid(unsafe_code)]
//! The Ordered Collection Store boundary.
//!
//! The core never owns storage; it plans row-level calls and this
//! crate issues them. Exactly four operation shapes exist per table:
//! select (filter/order/limit), insert, update (affected count), and
//! delete (affected count). No transactions are relied upon: the two
//! updates of a swap are independent row writes, and callers
//! re-synchronize by re-reading the collection after every mutation.

use async_trait::async_trait;
use sprout_core::OrderUpdate;
use sprout_model::{
    AdminSession, Article, ArticleDraft, EntityId, HeroSlide, HeroSlideDraft, NewsClipping,
    NewsClippingDraft, PageType, PageView, PageViewDraft, SiteSettings, TagStat, Top10Item,
    Top10ItemDraft, VisitorStats,
};
use std::fmt::{Display, Formatter};

mod clock;
mod memory;
mod schema;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub const CRATE_NAME: &str = "sprout-store";

/// How far back a visitor still counts as "active".
pub const ACTIVE_WINDOW_SECS: u64 = 5 * 60;

/// Builds an [`AdminSession`] row expiring `ttl_secs` from now.
#[must_use]
pub fn session_row(token: &str, ttl_secs: u64) -> AdminSession {
    AdminSession {
        token: token.to_string(),
        expires_at: clock::rfc3339_in(ttl_secs),
        created_at: clock::now_rfc3339(),
    }
}

#[derive(Debug)]
pub struct StoreError(pub String);

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        Self(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self(err.to_string())
    }
}

/// The collections that share the ordering/lifecycle/delete surface.
/// Field schemas differ; these operations do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderedKind {
    Hero,
    News,
    Top10,
    Article,
}

impl OrderedKind {
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Hero => "hero_slides",
            Self::News => "news_clippings",
            Self::Top10 => "top10_items",
            Self::Article => "articles",
        }
    }
}

/// Everything the server needs from persistence. One SQLite
/// implementation for production, one in-memory fake for tests.
#[async_trait]
pub trait ContentStore: Send + Sync {
    // Hero slides, ascending by order_index.
    async fn list_hero_slides(&self) -> Result<Vec<HeroSlide>, StoreError>;
    async fn insert_hero_slide(
        &self,
        draft: HeroSlideDraft,
        order_index: u32,
    ) -> Result<HeroSlide, StoreError>;
    async fn update_hero_slide(
        &self,
        id: EntityId,
        draft: HeroSlideDraft,
    ) -> Result<u64, StoreError>;

    // News clippings, ascending by order_index.
    async fn list_news_clippings(&self) -> Result<Vec<NewsClipping>, StoreError>;
    async fn insert_news_clipping(
        &self,
        draft: NewsClippingDraft,
        order_index: u32,
    ) -> Result<NewsClipping, StoreError>;
    async fn update_news_clipping(
        &self,
        id: EntityId,
        draft: NewsClippingDraft,
    ) -> Result<u64, StoreError>;

    // TOP-10 items, ascending by order_index (rank).
    async fn list_top10_items(&self) -> Result<Vec<Top10Item>, StoreError>;
    async fn insert_top10_item(
        &self,
        draft: Top10ItemDraft,
        order_index: u32,
    ) -> Result<Top10Item, StoreError>;
    async fn update_top10_item(
        &self,
        id: EntityId,
        draft: Top10ItemDraft,
    ) -> Result<u64, StoreError>;

    // Articles, published_date descending.
    async fn list_articles(&self) -> Result<Vec<Article>, StoreError>;
    async fn insert_article(&self, draft: ArticleDraft) -> Result<Article, StoreError>;
    async fn update_article(&self, id: EntityId, draft: ArticleDraft) -> Result<u64, StoreError>;
    async fn set_article_featured(
        &self,
        id: EntityId,
        is_featured: bool,
    ) -> Result<u64, StoreError>;

    // Shared ordering and lifecycle surface.
    //
    // `apply_order_updates` issues one independent row update per
    // entry with no surrounding transaction; a partial failure leaves
    // whatever the store ended up with, to be observed on re-read.
    async fn apply_order_updates(
        &self,
        kind: OrderedKind,
        updates: &[OrderUpdate],
    ) -> Result<(), StoreError>;
    async fn set_active(
        &self,
        kind: OrderedKind,
        id: EntityId,
        is_active: bool,
    ) -> Result<u64, StoreError>;
    async fn delete_row(&self, kind: OrderedKind, id: EntityId) -> Result<u64, StoreError>;

    // Site settings, key/value upserts.
    async fn load_settings(&self) -> Result<SiteSettings, StoreError>;
    async fn save_settings(&self, settings: &SiteSettings) -> Result<(), StoreError>;

    // Analytics.
    async fn record_page_view(&self, draft: &PageViewDraft) -> Result<(), StoreError>;
    async fn touch_active_visitor(
        &self,
        visitor_id: &str,
        page_type: PageType,
        page_id: Option<&str>,
        user_agent: &str,
    ) -> Result<(), StoreError>;
    async fn bump_tag_stat(&self, tag_name: &str) -> Result<(), StoreError>;
    async fn visitor_stats(&self) -> Result<VisitorStats, StoreError>;
    async fn popular_tags(&self, limit: usize) -> Result<Vec<TagStat>, StoreError>;
    async fn recent_page_views(&self, limit: usize) -> Result<Vec<PageView>, StoreError>;

    // Admin sessions. Validity is purely "the token row exists and has
    // not expired"; the caller mints the row with [`session_row`] or
    // its own timestamps.
    async fn insert_session(&self, session: &AdminSession) -> Result<(), StoreError>;
    async fn session_is_valid(&self, token: &str) -> Result<bool, StoreError>;
    async fn delete_session(&self, token: &str) -> Result<(), StoreError>;
    async fn purge_expired_sessions(&self) -> Result<u64, StoreError>;
}
