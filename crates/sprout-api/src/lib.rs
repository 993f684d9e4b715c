#![forbid(unsafe_code)]
//! The wire contract between the Sprout server and its clients. The
//! public site and the admin dashboard both consume these shapes.

mod dto;
mod errors;
mod params;

pub use dto::{
    ActiveRequest, AnalyticsResponse, CollectionResponse, CreateArticleRequest,
    CreateHeroRequest, CreateNewsRequest, CreateTop10Request, FeaturedRequest, HomeResponse,
    LoginRequest, MoveDirectionDto, MoveRequest, OkResponse, TrackRequest,
};
pub use errors::{ApiError, ApiErrorCode};
pub use params::{parse_article_query, ArticleQuery, ARTICLE_LIMIT_DEFAULT, ARTICLE_LIMIT_MAX};

pub const CRATE_NAME: &str = "sprout-api";
pub const API_VERSION: &str = "v1";
