//! Page shells for the protected catalog routes.
//!
//! Content composition (product data, catalog themes, translations) is
//! handled by the catalog frontend; the gateway serves minimal shells so
//! the gatekeeper in front of them can be exercised end to end.

use axum::extract::Path;
use axum::response::Html;

pub async fn product_sheet(Path(id): Path<String>) -> Html<String> {
    product_sheet_shell(&id)
}

pub async fn product_sheet_localized(Path((_locale, id)): Path<(String, String)>) -> Html<String> {
    product_sheet_shell(&id)
}

pub async fn digital_catalog(Path(guid): Path<String>) -> Html<String> {
    digital_catalog_shell(&guid)
}

pub async fn digital_catalog_localized(
    Path((_locale, guid)): Path<(String, String)>,
) -> Html<String> {
    digital_catalog_shell(&guid)
}

pub async fn unauthorized() -> Html<&'static str> {
    Html("<!DOCTYPE html><html><body><h1>Unauthorized</h1></body></html>")
}

pub async fn unauthorized_localized(Path(_locale): Path<String>) -> Html<&'static str> {
    unauthorized().await
}

fn product_sheet_shell(id: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html><html><body><main data-product-sheet=\"{}\"></main></body></html>",
        html_escape(id)
    ))
}

fn digital_catalog_shell(guid: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html><html><body><main data-catalog=\"{}\"></main></body></html>",
        html_escape(guid)
    ))
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
