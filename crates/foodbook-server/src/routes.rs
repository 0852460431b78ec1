//! Route definitions for the gateway.

use crate::handlers::{auth, health, log, pages, permalink};
use crate::middleware::{gate, headers};
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

/// Create the gateway router.
///
/// Layer order matters: the gatekeeper runs inside the security-headers
/// layer so that denials and rewrites carry the headers too.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/auth/validate", post(auth::validate))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/log", post(log::ingest))
        .route("/api/permalink", post(permalink::share))
        .route("/unauthorized", get(pages::unauthorized))
        .route("/{locale}/unauthorized", get(pages::unauthorized_localized))
        .route("/productsheet/{id}", get(pages::product_sheet))
        .route(
            "/{locale}/productsheet/{id}",
            get(pages::product_sheet_localized),
        )
        .route("/digitalcatalog/{guid}", get(pages::digital_catalog))
        .route(
            "/{locale}/digitalcatalog/{guid}",
            get(pages::digital_catalog_localized),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            gate::gatekeeper,
        ))
        .layer(axum::middleware::from_fn(headers::security_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
