//! Session validation and logout endpoints.

use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use foodbook_core::AppConfig;
use foodbook_session::TokenValidation;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub token: String,
}

/// Trusted validation endpoint: verifies a session token locally and
/// reports the claims. Remote verifiers in untrusted contexts delegate
/// here instead of holding the secret themselves.
pub async fn validate(
    State(state): State<AppState>,
    body: Result<Json<ValidateRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(TokenValidation {
                    is_valid: false,
                    payload: None,
                    error: Some(rejection.body_text()),
                }),
            )
                .into_response();
        }
    };

    match state.sessions.verify(&request.token) {
        Some(payload) => Json(TokenValidation {
            is_valid: true,
            payload: Some(payload),
            error: None,
        })
        .into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(TokenValidation {
                is_valid: false,
                payload: None,
                error: Some("Invalid token".to_string()),
            }),
        )
            .into_response(),
    }
}

/// Clear the session cookie. Expiry is the only server-side termination
/// mechanism for sessions; logout just discards the client's copy.
pub async fn logout(State(state): State<AppState>) -> Response {
    (
        [(header::SET_COOKIE, clear_session_cookie(&state.config))],
        Json(json!({ "success": true })),
    )
        .into_response()
}

fn clear_session_cookie(config: &AppConfig) -> String {
    let mut cookie = format!(
        "{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax",
        config.app.env.session_cookie_name()
    );
    if config.app.env.cookies_secure() {
        cookie.push_str("; Secure");
    }
    if let Some(domain) = &config.auth.cookie_domain {
        cookie.push_str(&format!("; Domain={domain}"));
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(move |key| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        })
        .unwrap()
    }

    #[test]
    fn test_clear_cookie_development() {
        let config = config(&[("JWT_SECRET", "s"), ("PERMALINK_SECRET", "p")]);
        assert_eq!(
            clear_session_cookie(&config),
            "PsFoodbookToken=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax"
        );
    }

    #[test]
    fn test_clear_cookie_production_with_domain() {
        let config = config(&[
            ("JWT_SECRET", "s"),
            ("PERMALINK_SECRET", "p"),
            ("APP_ENV", "production"),
            ("COOKIE_DOMAIN", "catalog.example.com"),
        ]);
        assert_eq!(
            clear_session_cookie(&config),
            "PsFoodbookToken=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax; Secure; Domain=catalog.example.com"
        );
    }
}
