// SPDX-License-Identifier: Apache-2.0

//! Admin dashboard handlers.
//!
//! Every mutation follows the same contract: persist the row-level
//! change, re-fetch the full collection, and answer with it. The
//! dashboard renders whatever comes back and never keeps local
//! ordering state. Structural moves and deletes are planned by
//! `sprout-core` against a fresh snapshot; this module only wires
//! plans to the store.

use crate::auth::{clear_session_cookie, password_matches, session_cookie, session_token};
use crate::http::{Failure, HandlerResult};
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use sprout_api::{
    ActiveRequest, AnalyticsResponse, ApiError, CollectionResponse, CreateArticleRequest,
    CreateHeroRequest, CreateNewsRequest, CreateTop10Request, FeaturedRequest, LoginRequest,
    MoveDirectionDto, MoveRequest, OkResponse,
};
use sprout_core::{
    append_index, ensure_capacity, normalize_badges, plan_delete, plan_move, MoveDirection,
    Ranked, RepackPolicy,
};
use sprout_model::{
    ArticleDraft, EntityId, HeroSlideDraft, NewsClippingDraft, SiteSettings, Top10ItemDraft,
};
use sprout_store::{session_row, OrderedKind};

// -- sessions ---------------------------------------------------------

pub(crate) async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> HandlerResult<Response> {
    if !password_matches(&state.config.admin_password, &request.password) {
        return Err(Failure::unauthorized());
    }
    let token = state.minter.mint();
    // Piggyback expiry cleanup on the write we are already making.
    state.store.purge_expired_sessions().await?;
    state
        .store
        .insert_session(&session_row(&token, state.config.session_ttl_secs))
        .await?;
    let cookie = session_cookie(&token, state.config.session_ttl_secs);
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(OkResponse { ok: true }),
    )
        .into_response())
}

pub(crate) async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> HandlerResult<Response> {
    if let Some(token) = session_token(&headers) {
        state.store.delete_session(&token).await?;
    }
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(OkResponse { ok: true }),
    )
        .into_response())
}

/// Ungated probe the dashboard polls to decide whether to show the
/// login form. Answers 200 either way; the body carries the verdict.
pub(crate) async fn session_check(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> HandlerResult<Response> {
    let ok = match session_token(&headers) {
        Some(token) => state.store.session_is_valid(&token).await?,
        None => false,
    };
    Ok((StatusCode::OK, Json(OkResponse { ok })).into_response())
}

// -- shared plumbing --------------------------------------------------

fn parse_id(raw: &str) -> Result<EntityId, Failure> {
    EntityId::parse(raw).map_err(|_| Failure::bad_request(ApiError::invalid_param("id", raw)))
}

const fn direction_of(dto: MoveDirectionDto) -> MoveDirection {
    match dto {
        MoveDirectionDto::Up => MoveDirection::Up,
        MoveDirectionDto::Down => MoveDirection::Down,
    }
}

/// Rank-only view of a collection row, so one move/delete path serves
/// every collection regardless of its field schema.
#[derive(Debug, Clone, Copy)]
struct RankedRow {
    id: EntityId,
    order_index: u32,
}

impl Ranked for RankedRow {
    fn id(&self) -> EntityId {
        self.id
    }
    fn order_index(&self) -> u32 {
        self.order_index
    }
}

fn rank_snapshot<T: Ranked>(rows: &[T]) -> Vec<RankedRow> {
    rows.iter()
        .map(|row| RankedRow {
            id: row.id(),
            order_index: row.order_index(),
        })
        .collect()
}

async fn ordered_snapshot(
    state: &AppState,
    kind: OrderedKind,
) -> Result<Vec<RankedRow>, Failure> {
    let rows = match kind {
        OrderedKind::Hero => rank_snapshot(&state.store.list_hero_slides().await?),
        OrderedKind::News => rank_snapshot(&state.store.list_news_clippings().await?),
        OrderedKind::Top10 => rank_snapshot(&state.store.list_top10_items().await?),
        OrderedKind::Article => rank_snapshot(&state.store.list_articles().await?),
    };
    Ok(rows)
}

/// Plans a neighbor swap against a fresh snapshot and persists it. A
/// boundary move yields an empty plan and writes nothing; the caller
/// still answers with the re-fetched collection.
async fn move_row(
    state: &AppState,
    kind: OrderedKind,
    id: EntityId,
    direction: MoveDirection,
) -> Result<(), Failure> {
    let rows = ordered_snapshot(state, kind).await?;
    let updates = plan_move(&rows, id, direction)
        .map_err(|_| Failure::not_found("row"))?;
    if !updates.is_empty() {
        state.store.apply_order_updates(kind, &updates).await?;
    }
    Ok(())
}

async fn set_row_active(
    state: &AppState,
    kind: OrderedKind,
    id: EntityId,
    is_active: bool,
) -> Result<(), Failure> {
    let affected = state.store.set_active(kind, id, is_active).await?;
    if affected == 0 {
        return Err(Failure::not_found("row"));
    }
    Ok(())
}

async fn delete_ordered_row(
    state: &AppState,
    kind: OrderedKind,
    id: EntityId,
    policy: RepackPolicy,
) -> Result<(), Failure> {
    let rows = ordered_snapshot(state, kind).await?;
    let plan = plan_delete(&rows, id, policy).map_err(|_| Failure::not_found("row"))?;
    let affected = state.store.delete_row(kind, id).await?;
    if affected == 0 {
        return Err(Failure::not_found("row"));
    }
    if !plan.reindex.is_empty() {
        state.store.apply_order_updates(kind, &plan.reindex).await?;
    }
    Ok(())
}

// -- hero slides ------------------------------------------------------

async fn hero_collection(state: &AppState) -> HandlerResult<Response> {
    let rows = state.store.list_hero_slides().await?;
    Ok((StatusCode::OK, Json(CollectionResponse { rows })).into_response())
}

pub(crate) async fn hero_list(State(state): State<AppState>) -> HandlerResult<Response> {
    hero_collection(&state).await
}

pub(crate) async fn hero_create(
    State(state): State<AppState>,
    Json(request): Json<CreateHeroRequest>,
) -> HandlerResult<Response> {
    let existing = state.store.list_hero_slides().await?;
    let draft = HeroSlideDraft {
        image: request.image,
        title: request.title,
        badges: normalize_badges(&request.badges),
        is_active: request.is_active,
    };
    state
        .store
        .insert_hero_slide(draft, append_index(existing.len()))
        .await?;
    hero_collection(&state).await
}

pub(crate) async fn hero_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<HeroSlideDraft>,
) -> HandlerResult<Response> {
    let id = parse_id(&id)?;
    let affected = state.store.update_hero_slide(id, draft).await?;
    if affected == 0 {
        return Err(Failure::not_found("hero slide"));
    }
    hero_collection(&state).await
}

pub(crate) async fn hero_move(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<MoveRequest>,
) -> HandlerResult<Response> {
    let id = parse_id(&id)?;
    move_row(&state, OrderedKind::Hero, id, direction_of(request.direction)).await?;
    hero_collection(&state).await
}

pub(crate) async fn hero_active(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ActiveRequest>,
) -> HandlerResult<Response> {
    let id = parse_id(&id)?;
    set_row_active(&state, OrderedKind::Hero, id, request.is_active).await?;
    hero_collection(&state).await
}

pub(crate) async fn hero_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Response> {
    let id = parse_id(&id)?;
    delete_ordered_row(&state, OrderedKind::Hero, id, RepackPolicy::LeaveGap).await?;
    hero_collection(&state).await
}

// -- news clippings ---------------------------------------------------

async fn news_collection(state: &AppState) -> HandlerResult<Response> {
    let rows = state.store.list_news_clippings().await?;
    Ok((StatusCode::OK, Json(CollectionResponse { rows })).into_response())
}

pub(crate) async fn news_list(State(state): State<AppState>) -> HandlerResult<Response> {
    news_collection(&state).await
}

pub(crate) async fn news_create(
    State(state): State<AppState>,
    Json(request): Json<CreateNewsRequest>,
) -> HandlerResult<Response> {
    let existing = state.store.list_news_clippings().await?;
    let draft = NewsClippingDraft {
        image: request.image,
        title: request.title,
        is_active: request.is_active,
    };
    state
        .store
        .insert_news_clipping(draft, append_index(existing.len()))
        .await?;
    news_collection(&state).await
}

pub(crate) async fn news_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<NewsClippingDraft>,
) -> HandlerResult<Response> {
    let id = parse_id(&id)?;
    let affected = state.store.update_news_clipping(id, draft).await?;
    if affected == 0 {
        return Err(Failure::not_found("news clipping"));
    }
    news_collection(&state).await
}

pub(crate) async fn news_move(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<MoveRequest>,
) -> HandlerResult<Response> {
    let id = parse_id(&id)?;
    move_row(&state, OrderedKind::News, id, direction_of(request.direction)).await?;
    news_collection(&state).await
}

pub(crate) async fn news_active(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ActiveRequest>,
) -> HandlerResult<Response> {
    let id = parse_id(&id)?;
    set_row_active(&state, OrderedKind::News, id, request.is_active).await?;
    news_collection(&state).await
}

pub(crate) async fn news_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Response> {
    let id = parse_id(&id)?;
    delete_ordered_row(&state, OrderedKind::News, id, RepackPolicy::LeaveGap).await?;
    news_collection(&state).await
}

// -- TOP-10 -----------------------------------------------------------

async fn top10_collection(state: &AppState) -> HandlerResult<Response> {
    let rows = state.store.list_top10_items().await?;
    Ok((StatusCode::OK, Json(CollectionResponse { rows })).into_response())
}

pub(crate) async fn top10_list(State(state): State<AppState>) -> HandlerResult<Response> {
    top10_collection(&state).await
}

/// The one create in the system with a hard precondition: membership
/// is capped, and the check runs against a fresh count. Two racing
/// creates can still both pass it; the store accepts what it is told.
pub(crate) async fn top10_create(
    State(state): State<AppState>,
    Json(request): Json<CreateTop10Request>,
) -> HandlerResult<Response> {
    let existing = state.store.list_top10_items().await?;
    ensure_capacity(existing.len()).map_err(|err| {
        Failure(
            StatusCode::CONFLICT,
            ApiError::capacity_exceeded(err.len, err.capacity),
        )
    })?;
    let draft = Top10ItemDraft {
        title: request.title,
        is_active: request.is_active,
    };
    state
        .store
        .insert_top10_item(draft, append_index(existing.len()))
        .await?;
    top10_collection(&state).await
}

pub(crate) async fn top10_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<Top10ItemDraft>,
) -> HandlerResult<Response> {
    let id = parse_id(&id)?;
    let affected = state.store.update_top10_item(id, draft).await?;
    if affected == 0 {
        return Err(Failure::not_found("top10 item"));
    }
    top10_collection(&state).await
}

pub(crate) async fn top10_move(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<MoveRequest>,
) -> HandlerResult<Response> {
    let id = parse_id(&id)?;
    move_row(&state, OrderedKind::Top10, id, direction_of(request.direction)).await?;
    top10_collection(&state).await
}

pub(crate) async fn top10_active(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ActiveRequest>,
) -> HandlerResult<Response> {
    let id = parse_id(&id)?;
    set_row_active(&state, OrderedKind::Top10, id, request.is_active).await?;
    top10_collection(&state).await
}

/// TOP-10 is the only collection that re-packs ranks after a delete;
/// survivors come back contiguous over `0..N-1`.
pub(crate) async fn top10_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Response> {
    let id = parse_id(&id)?;
    delete_ordered_row(&state, OrderedKind::Top10, id, RepackPolicy::Repack).await?;
    top10_collection(&state).await
}

// -- articles ---------------------------------------------------------

async fn article_collection(state: &AppState) -> HandlerResult<Response> {
    let rows = state.store.list_articles().await?;
    Ok((StatusCode::OK, Json(CollectionResponse { rows })).into_response())
}

pub(crate) async fn article_list(State(state): State<AppState>) -> HandlerResult<Response> {
    article_collection(&state).await
}

pub(crate) async fn article_create(
    State(state): State<AppState>,
    Json(request): Json<CreateArticleRequest>,
) -> HandlerResult<Response> {
    let draft = ArticleDraft {
        title: request.title,
        description: request.description,
        image: request.image,
        badges: normalize_badges(&request.badges),
        category: request.category,
        is_featured: request.is_featured,
        is_active: request.is_active,
    };
    state.store.insert_article(draft).await?;
    article_collection(&state).await
}

pub(crate) async fn article_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<ArticleDraft>,
) -> HandlerResult<Response> {
    let id = parse_id(&id)?;
    let affected = state.store.update_article(id, draft).await?;
    if affected == 0 {
        return Err(Failure::not_found("article"));
    }
    article_collection(&state).await
}

pub(crate) async fn article_active(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ActiveRequest>,
) -> HandlerResult<Response> {
    let id = parse_id(&id)?;
    set_row_active(&state, OrderedKind::Article, id, request.is_active).await?;
    article_collection(&state).await
}

pub(crate) async fn article_featured(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<FeaturedRequest>,
) -> HandlerResult<Response> {
    let id = parse_id(&id)?;
    let affected = state
        .store
        .set_article_featured(id, request.is_featured)
        .await?;
    if affected == 0 {
        return Err(Failure::not_found("article"));
    }
    article_collection(&state).await
}

pub(crate) async fn article_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Response> {
    let id = parse_id(&id)?;
    let affected = state.store.delete_row(OrderedKind::Article, id).await?;
    if affected == 0 {
        return Err(Failure::not_found("article"));
    }
    article_collection(&state).await
}

// -- settings and analytics -------------------------------------------

pub(crate) async fn settings_get(State(state): State<AppState>) -> HandlerResult<Response> {
    let settings = state.store.load_settings().await?;
    Ok((StatusCode::OK, Json(settings)).into_response())
}

pub(crate) async fn settings_put(
    State(state): State<AppState>,
    Json(settings): Json<SiteSettings>,
) -> HandlerResult<Response> {
    state.store.save_settings(&settings).await?;
    let stored = state.store.load_settings().await?;
    Ok((StatusCode::OK, Json(stored)).into_response())
}

pub(crate) async fn analytics(State(state): State<AppState>) -> HandlerResult<Response> {
    let stats = state.store.visitor_stats().await?;
    let recent_views = state
        .store
        .recent_page_views(state.config.recent_views_limit)
        .await?;
    let popular_tags = state
        .store
        .popular_tags(state.config.popular_tags_limit)
        .await?;
    let body = AnalyticsResponse {
        stats,
        recent_views,
        popular_tags,
    };
    Ok((StatusCode::OK, Json(body)).into_response())
}
