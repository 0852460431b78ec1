//! Share action: mint a permalink grant for a resource.

use crate::handlers::log::rate_limit_headers;
use crate::middleware::gate::cookie_value;
use crate::rate_limit::{self, client_identifier};
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    pub resource_id: String,
    /// Time-to-live in seconds; the configured default when omitted.
    #[serde(default)]
    pub ttl: Option<u64>,
}

/// Grant fields named as the query parameters they become.
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub pspid: String,
    pub psexp: String,
    pub pssig: String,
}

/// Mint a permalink for a resource. Only an authenticated session may
/// create share links; the grant itself then works without one.
pub async fn share(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ShareRequest>, JsonRejection>,
) -> Response {
    let identifier = client_identifier(&headers);
    let result = state.limiter.check(&identifier, &rate_limit::STRICT);
    if !result.success {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            rate_limit_headers(&result),
            Json(json!({ "error": "rate limit exceeded" })),
        )
            .into_response();
    }

    let cookie_name = state.config.app.env.session_cookie_name();
    let session = match cookie_value(&headers, cookie_name) {
        Some(token) => state.verifier.verify(&token).await,
        None => None,
    };
    if session.is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "authentication required" })),
        )
            .into_response();
    }

    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": rejection.body_text() })),
            )
                .into_response();
        }
    };

    match state.permalinks.issue(&request.resource_id, request.ttl) {
        Ok(grant) => Json(ShareResponse {
            pspid: grant.resource_id,
            psexp: grant.expires.to_string(),
            pssig: grant.signature,
        })
        .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "permalink issuance failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "failed to create permalink" })),
            )
                .into_response()
        }
    }
}
