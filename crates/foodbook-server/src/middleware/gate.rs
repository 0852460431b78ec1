//! The request gatekeeper.
//!
//! Runs in front of every route and decides, for protected paths, which
//! of three doors admits the request: a freshly verified permalink, the
//! short-lived grant cookie an earlier permalink earned, or a verified
//! session token. Everything else is redirected to the unauthorized page.
//! The redirect is identical for missing, expired and tampered
//! credentials so the response never acts as a verification oracle.

use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

/// Locales served by the catalog. The default locale (`nl`) carries no
/// path prefix.
const LOCALES: [&str; 4] = ["nl", "en", "de", "fr"];

/// Name of the grant cookie set after a successful permalink check.
pub const GRANT_COOKIE: &str = "permalink_access";

/// Grant cookie: a coarse bearer flag, not bound to the resource that
/// earned it, valid for ten minutes.
const GRANT_COOKIE_VALUE: &str =
    "permalink_access=true; Path=/; Max-Age=600; HttpOnly; Secure; SameSite=Lax";

pub async fn gatekeeper(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let query = request.uri().query().unwrap_or("").to_string();

    // Legacy share links carry a catalog token instead of a GUID.
    // Rewriting them is a routing concern, not an auth decision, and
    // happens before any credential is looked at.
    if let Some(resolver) = &state.guid_resolver {
        if strip_locale(&path).1.trim_end_matches('/') == "/digitalcatalog" {
            if let (Some(token), Some(abbr)) =
                (query_param(&query, "token"), query_param(&query, "abbr"))
            {
                if let Some(guid) = resolver.resolve(&token, &abbr).await {
                    return Redirect::to(&format!("/digitalcatalog/{guid}")).into_response();
                }
            }
        }
    }

    if !is_protected(&path) {
        return next.run(request).await;
    }
    let locale = strip_locale(&path).0;

    // Door 1: permalink query parameters, accepted on productsheet paths
    // only. A failed or partial permalink falls through; the visitor may
    // still hold a grant cookie or a session.
    if path.contains("/productsheet/") {
        if let (Some(pspid), Some(psexp), Some(pssig)) = (
            query_param(&query, "pspid"),
            query_param(&query, "psexp"),
            query_param(&query, "pssig"),
        ) {
            if state.permalinks.verify(&pspid, &psexp, &pssig) {
                tracing::debug!(resource = %pspid, "request admitted via permalink");
                let mut response = next.run(request).await;
                response
                    .headers_mut()
                    .append(header::SET_COOKIE, HeaderValue::from_static(GRANT_COOKIE_VALUE));
                return response;
            }
        }
    }

    // Door 2: the grant cookie.
    if cookie_value(request.headers(), GRANT_COOKIE).as_deref() == Some("true") {
        return next.run(request).await;
    }

    // Door 3: the session cookie for this environment.
    let cookie_name = state.config.app.env.session_cookie_name();
    let Some(token) = cookie_value(request.headers(), cookie_name) else {
        return unauthorized_redirect(locale);
    };
    match state.verifier.verify(&token).await {
        Some(claims) => {
            tracing::debug!(subject = %claims.sub, "request admitted via session");
            next.run(request).await
        }
        None => unauthorized_redirect(locale),
    }
}

/// Whether a path needs authorization: it contains a `digitalcatalog` or
/// `productsheet` segment followed by a non-empty identifier segment.
fn is_protected(path: &str) -> bool {
    has_segment_pair(path, "digitalcatalog") || has_segment_pair(path, "productsheet")
}

fn has_segment_pair(path: &str, name: &str) -> bool {
    let segments: Vec<&str> = path.split('/').collect();
    segments
        .windows(2)
        .any(|pair| pair[0] == name && !pair[1].is_empty())
}

/// Split a leading locale segment off a path, if present.
fn strip_locale(path: &str) -> (Option<&'static str>, &str) {
    for locale in LOCALES {
        if let Some(rest) = path.strip_prefix('/').and_then(|p| p.strip_prefix(locale)) {
            match rest.as_bytes().first() {
                None => return (Some(locale), "/"),
                Some(b'/') => return (Some(locale), rest),
                _ => {}
            }
        }
    }
    (None, path)
}

/// Read one value out of a URL query string.
fn query_param(query: &str, name: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Read a cookie value out of the `Cookie` header.
pub(crate) fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    for cookie in cookies.split(';') {
        let cookie = cookie.trim();
        if let Some(value) = cookie.strip_prefix(&format!("{name}=")) {
            return Some(value.to_string());
        }
    }
    None
}

/// The uniform denial: a redirect to the locale-aware unauthorized page.
fn unauthorized_redirect(locale: Option<&str>) -> Response {
    let target = match locale {
        Some(locale) => format!("/{locale}/unauthorized"),
        None => "/unauthorized".to_string(),
    };
    Redirect::to(&target).into_response()
}
