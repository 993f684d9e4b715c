// SPDX-License-Identifier: Apache-2.0

use crate::auth::session_token;
use crate::http::Failure;
use crate::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Rejects requests that do not carry a live admin session. The check
/// hits the session table every time so revocation takes effect
/// immediately; expired rows count as absent.
pub(crate) async fn admin_gate(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = session_token(request.headers()) else {
        return Failure::unauthorized().into_response();
    };
    match state.store.session_is_valid(&token).await {
        Ok(true) => next.run(request).await,
        Ok(false) => Failure::unauthorized().into_response(),
        Err(err) => Failure::from(err).into_response(),
    }
}
