// SPDX-License-Identifier: Apache-2.0

//! Public site handlers. Everything here filters to active rows; the
//! inactive remainder exists only behind the admin gate.

use crate::http::{Failure, HandlerResult};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sprout_api::{parse_article_query, ArticleQuery, CollectionResponse, HomeResponse, OkResponse, TrackRequest};
use sprout_model::{Article, PageType};
use std::collections::HashMap;

pub(crate) async fn healthz() -> Response {
    (StatusCode::OK, Json(OkResponse { ok: true })).into_response()
}

/// Readiness probes the store with the cheapest read it has.
pub(crate) async fn readyz(State(state): State<AppState>) -> HandlerResult<Response> {
    state.store.load_settings().await?;
    Ok((StatusCode::OK, Json(OkResponse { ok: true })).into_response())
}

/// One fetch for the whole home page: active hero slides, active
/// TOP-10 entries, active news clippings, plus site settings. Order is
/// the stored `order_index` ascending; gaps are served as-is.
pub(crate) async fn home(State(state): State<AppState>) -> HandlerResult<Response> {
    let hero = state.store.list_hero_slides().await?;
    let top10 = state.store.list_top10_items().await?;
    let news = state.store.list_news_clippings().await?;
    let settings = state.store.load_settings().await?;
    let body = HomeResponse {
        hero: hero.into_iter().filter(|row| row.is_active).collect(),
        top10: top10.into_iter().filter(|row| row.is_active).collect(),
        news: news.into_iter().filter(|row| row.is_active).collect(),
        settings,
    };
    Ok((StatusCode::OK, Json(body)).into_response())
}

fn matches_query(article: &Article, query: &ArticleQuery) -> bool {
    if !article.is_active {
        return false;
    }
    if let Some(category) = &query.category {
        if &article.category != category {
            return false;
        }
    }
    if let Some(featured) = query.featured {
        if article.is_featured != featured {
            return false;
        }
    }
    if let Some(tag) = &query.tag {
        if !article.badges.iter().any(|badge| &badge.text == tag) {
            return false;
        }
    }
    true
}

/// Article listing with badge-text tag filtering. The store already
/// returns `published_date` descending; this handler only filters and
/// truncates.
pub(crate) async fn articles(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> HandlerResult<Response> {
    let query = parse_article_query(&params).map_err(Failure::bad_request)?;
    let mut rows: Vec<Article> = state
        .store
        .list_articles()
        .await?
        .into_iter()
        .filter(|article| matches_query(article, &query))
        .collect();
    rows.truncate(query.limit);
    Ok((StatusCode::OK, Json(CollectionResponse { rows })).into_response())
}

pub(crate) async fn article_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Response> {
    let id = sprout_model::EntityId::parse(&id)
        .map_err(|_| Failure::bad_request(sprout_api::ApiError::invalid_param("id", &id)))?;
    let article = state
        .store
        .list_articles()
        .await?
        .into_iter()
        .find(|article| article.id == id && article.is_active)
        .ok_or_else(|| Failure::not_found("article"))?;
    Ok((StatusCode::OK, Json(article)).into_response())
}

/// Tag landing page: active articles carrying the tag as a badge.
pub(crate) async fn tag_articles(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> HandlerResult<Response> {
    let query = ArticleQuery {
        tag: Some(tag),
        limit: sprout_api::ARTICLE_LIMIT_MAX,
        ..ArticleQuery::default()
    };
    let rows: Vec<Article> = state
        .store
        .list_articles()
        .await?
        .into_iter()
        .filter(|article| matches_query(article, &query))
        .collect();
    Ok((StatusCode::OK, Json(CollectionResponse { rows })).into_response())
}

/// Tracking beacon: appends a page view, refreshes the visitor's
/// active-window row, and bumps the tag counter for tag pages.
pub(crate) async fn track(
    State(state): State<AppState>,
    Json(request): Json<TrackRequest>,
) -> HandlerResult<Response> {
    let draft = request.into_draft();
    state.store.record_page_view(&draft).await?;
    state
        .store
        .touch_active_visitor(
            &draft.visitor_id,
            draft.page_type,
            draft.page_id.as_deref(),
            &draft.user_agent,
        )
        .await?;
    if draft.page_type == PageType::Tag {
        if let Some(tag) = draft.page_id.as_deref() {
            if !tag.is_empty() {
                state.store.bump_tag_stat(tag).await?;
            }
        }
    }
    Ok((StatusCode::OK, Json(OkResponse { ok: true })).into_response())
}
