//! # foodbook-server
//!
//! The Foodbook gateway binary: an axum server that fronts the localized
//! product catalog. Every request passes the gatekeeper middleware, which
//! admits it through exactly one of three doors: a freshly verified
//! permalink, a short-lived grant cookie earned by an earlier permalink,
//! or a verified session token. Everything else is redirected to the
//! unauthorized page without disclosing why.

pub mod guid;
pub mod handlers;
pub mod middleware;
pub mod rate_limit;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
