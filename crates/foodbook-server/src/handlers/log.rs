//! Rate-limited client log ingestion.

use crate::rate_limit::{self, RateLimitResult, client_identifier};
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

/// Accept a client-side log entry and emit it through the server's own
/// logging pipeline. Capped per client to keep the endpoint from being
/// abused as a write amplifier.
pub async fn ingest(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let identifier = client_identifier(&headers);
    let result = state.limiter.check(&identifier, &rate_limit::LOGGING);
    if !result.success {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            rate_limit_headers(&result),
            Json(json!({ "success": false })),
        )
            .into_response();
    }

    let Json(entry) = match body {
        Ok(body) => body,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false })),
            )
                .into_response();
        }
    };

    tracing::info!(target: "client_log", entry = %entry, "client log entry");
    Json(json!({ "success": true })).into_response()
}

pub(crate) fn rate_limit_headers(result: &RateLimitResult) -> [(HeaderName, String); 3] {
    [
        (
            HeaderName::from_static("x-ratelimit-limit"),
            result.limit.to_string(),
        ),
        (
            HeaderName::from_static("x-ratelimit-remaining"),
            result.remaining.to_string(),
        ),
        (
            HeaderName::from_static("x-ratelimit-reset"),
            result.reset.to_string(),
        ),
    ]
}
