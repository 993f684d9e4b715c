#![forbid(unsafe_code)]
//! Sprout HTTP server.
//!
//! One router serves both surfaces: the public site API and the
//! `/v1/admin` management API gated by the session middleware. Every
//! admin mutation answers with the re-fetched collection; the server
//! never returns optimistically mutated state.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::Router;
use sprout_store::ContentStore;

mod auth;
mod config;
mod http;
mod middleware;

pub use auth::{session_token, TokenMinter, SESSION_COOKIE};
pub use config::{ApiConfig, CONFIG_SCHEMA_VERSION};

pub const CRATE_NAME: &str = "sprout-server";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub config: Arc<ApiConfig>,
    pub minter: Arc<TokenMinter>,
    pub request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn ContentStore>, config: ApiConfig) -> Self {
        let minter = Arc::new(TokenMinter::new(&config.session_secret));
        Self {
            store,
            config: Arc::new(config),
            minter,
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let admin = Router::new()
        .route(
            "/v1/admin/hero",
            get(http::admin::hero_list).post(http::admin::hero_create),
        )
        .route(
            "/v1/admin/hero/:id",
            put(http::admin::hero_update).delete(http::admin::hero_delete),
        )
        .route("/v1/admin/hero/:id/move", post(http::admin::hero_move))
        .route("/v1/admin/hero/:id/active", post(http::admin::hero_active))
        .route(
            "/v1/admin/news",
            get(http::admin::news_list).post(http::admin::news_create),
        )
        .route(
            "/v1/admin/news/:id",
            put(http::admin::news_update).delete(http::admin::news_delete),
        )
        .route("/v1/admin/news/:id/move", post(http::admin::news_move))
        .route("/v1/admin/news/:id/active", post(http::admin::news_active))
        .route(
            "/v1/admin/top10",
            get(http::admin::top10_list).post(http::admin::top10_create),
        )
        .route(
            "/v1/admin/top10/:id",
            put(http::admin::top10_update).delete(http::admin::top10_delete),
        )
        .route("/v1/admin/top10/:id/move", post(http::admin::top10_move))
        .route("/v1/admin/top10/:id/active", post(http::admin::top10_active))
        .route(
            "/v1/admin/articles",
            get(http::admin::article_list).post(http::admin::article_create),
        )
        .route(
            "/v1/admin/articles/:id",
            put(http::admin::article_update).delete(http::admin::article_delete),
        )
        .route(
            "/v1/admin/articles/:id/active",
            post(http::admin::article_active),
        )
        .route(
            "/v1/admin/articles/:id/featured",
            post(http::admin::article_featured),
        )
        .route(
            "/v1/admin/settings",
            get(http::admin::settings_get).put(http::admin::settings_put),
        )
        .route("/v1/admin/analytics", get(http::admin::analytics))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::admin_gate::admin_gate,
        ));

    Router::new()
        .route("/healthz", get(http::public::healthz))
        .route("/readyz", get(http::public::readyz))
        .route("/v1/home", get(http::public::home))
        .route("/v1/articles", get(http::public::articles))
        .route("/v1/articles/:id", get(http::public::article_detail))
        .route("/v1/tags/:tag", get(http::public::tag_articles))
        .route("/v1/track", post(http::public::track))
        .route("/v1/admin/login", post(http::admin::login))
        .route("/v1/admin/logout", post(http::admin::logout))
        .route("/v1/admin/session", get(http::admin::session_check))
        .merge(admin)
        .layer(from_fn_with_state(
            state.clone(),
            middleware::request_tracing::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .with_state(state)
}
