//! Health endpoint.

use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use chrono::Utc;
use serde_json::{Value, json};

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "environment": state.config.app.env.as_str(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
