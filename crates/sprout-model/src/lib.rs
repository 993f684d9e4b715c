#![forbid(unsafe_code)]
//! Sprout model SSOT.
//!
//! Every entity the store persists and the API serves is defined here.
//! The four manageable collections (hero slides, articles, news
//! clippings, TOP-10 items) share the same structural shape: an opaque
//! server-assigned id, a zero-based `order_index`, and an `is_active`
//! visibility flag that never influences ordering.

mod analytics;
mod article;
mod badge;
mod hero;
mod id;
mod news;
mod session;
mod settings;
mod top10;

pub use analytics::{PageType, PageView, PageViewDraft, TagStat, VisitorStats};
pub use article::{Article, ArticleDraft};
pub use badge::{Badge, BADGE_TEXT_MAX_LEN, DEFAULT_BADGE_CLASS};
pub use hero::{HeroSlide, HeroSlideDraft};
pub use id::{EntityId, ParseError};
pub use news::{NewsClipping, NewsClippingDraft};
pub use session::{AdminSession, SESSION_TTL_SECS};
pub use settings::{SiteSettings, SETTING_KEYS};
pub use top10::{Top10Item, Top10ItemDraft, TOP10_CAPACITY};

pub const CRATE_NAME: &str = "sprout-model";
