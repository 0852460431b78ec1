//! Gateway application state.

use crate::guid::{GuidResolver, HttpGuidResolver};
use crate::rate_limit::RateLimiter;
use foodbook_core::AppConfig;
use foodbook_permalink::PermalinkAuthority;
use foodbook_session::{LocalVerifier, SessionAuthority, SessionVerifier};
use std::sync::Arc;

/// Shared application state, built once at startup and read-only for the
/// lifetime of the process (the rate-limit store is the one exception).
#[derive(Clone)]
pub struct AppState {
    /// The loaded configuration.
    pub config: Arc<AppConfig>,
    /// Session token authority (trusted context: holds the secret).
    pub sessions: SessionAuthority,
    /// Permalink authority.
    pub permalinks: PermalinkAuthority,
    /// Session verifier consulted by the gatekeeper.
    pub verifier: Arc<dyn SessionVerifier>,
    /// Fixed-window rate limiter for the API routes.
    pub limiter: RateLimiter,
    /// Resolver for legacy catalog tokens, when configured.
    pub guid_resolver: Option<Arc<dyn GuidResolver>>,
}

impl AppState {
    /// Build state from configuration.
    ///
    /// The gateway binary runs in a trusted context, so the gatekeeper
    /// verifies sessions locally by default; `with_verifier` swaps in a
    /// different implementation at composition time.
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let sessions =
            SessionAuthority::new(&config.auth.jwt_secret, config.auth.session_duration)?;
        let permalinks =
            PermalinkAuthority::new(&config.permalink.secret, config.permalink.max_age)?;
        let verifier: Arc<dyn SessionVerifier> = Arc::new(LocalVerifier::new(sessions.clone()));
        let guid_resolver = config
            .server
            .foodbook_api_url
            .as_ref()
            .map(|base| Arc::new(HttpGuidResolver::new(base)) as Arc<dyn GuidResolver>);

        Ok(Self {
            config: Arc::new(config),
            sessions,
            permalinks,
            verifier,
            limiter: RateLimiter::new(),
            guid_resolver,
        })
    }

    /// Replace the session verifier.
    pub fn with_verifier(mut self, verifier: Arc<dyn SessionVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    /// Replace the legacy catalog GUID resolver.
    pub fn with_guid_resolver(mut self, resolver: Arc<dyn GuidResolver>) -> Self {
        self.guid_resolver = Some(resolver);
        self
    }
}
