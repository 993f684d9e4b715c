// SPDX-License-Identifier: Apache-2.0

pub(crate) mod admin;
pub(crate) mod public;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use sprout_api::ApiError;
use sprout_store::StoreError;

/// Handler-side error: status plus the wire envelope. Store failures
/// collapse to 503 so callers can distinguish "backend down" from
/// "request wrong".
#[derive(Debug)]
pub(crate) struct Failure(pub StatusCode, pub ApiError);

impl Failure {
    pub(crate) fn unauthorized() -> Self {
        Self(StatusCode::UNAUTHORIZED, ApiError::unauthorized())
    }

    pub(crate) fn not_found(what: &str) -> Self {
        Self(StatusCode::NOT_FOUND, ApiError::not_found(what))
    }

    pub(crate) fn bad_request(error: ApiError) -> Self {
        Self(StatusCode::BAD_REQUEST, error)
    }
}

impl From<StoreError> for Failure {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err.0, "store operation failed");
        Self(StatusCode::SERVICE_UNAVAILABLE, ApiError::store_unavailable())
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let Failure(status, error) = self;
        (status, Json(json!({ "error": error }))).into_response()
    }
}

pub(crate) type HandlerResult<T> = Result<T, Failure>;
