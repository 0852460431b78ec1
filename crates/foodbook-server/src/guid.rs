//! Legacy catalog token resolution.
//!
//! Old share links carry an opaque catalog token instead of a GUID. The
//! gatekeeper rewrites such URLs to their GUID form before any auth
//! decision; resolution goes through the upstream Foodbook API. The step
//! is optional: deployments without the legacy URL space simply don't
//! configure a resolver.

use async_trait::async_trait;
use serde::Deserialize;

/// Maps a legacy catalog token to its digital-catalog GUID.
#[async_trait]
pub trait GuidResolver: Send + Sync {
    /// Returns the GUID, or `None` when the token is unknown or the
    /// upstream is unreachable (the request then falls through
    /// unrewritten).
    async fn resolve(&self, legacy_token: &str, abbr: &str) -> Option<String>;
}

#[derive(Debug, Deserialize)]
struct GuidResponse {
    guid: String,
}

/// Resolver backed by the upstream Foodbook API.
pub struct HttpGuidResolver {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGuidResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl GuidResolver for HttpGuidResolver {
    async fn resolve(&self, legacy_token: &str, abbr: &str) -> Option<String> {
        let url = format!(
            "{}/v2/DigitalCatalog/GetGuid/{legacy_token}/{abbr}",
            self.base_url.trim_end_matches('/')
        );

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "legacy catalog token resolution failed");
                return None;
            }
        };
        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "legacy catalog token not resolvable");
            return None;
        }

        match response.json::<GuidResponse>().await {
            Ok(body) => Some(body.guid),
            Err(err) => {
                tracing::warn!(error = %err, "legacy catalog resolution response unreadable");
                None
            }
        }
    }
}
