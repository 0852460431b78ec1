//! Configuration types for the Foodbook gateway.
//!
//! All settings come from environment variables. Secrets (`JWT_SECRET`,
//! `PERMALINK_SECRET`) are required and validated at load time; everything
//! else has a default suitable for local development.

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing or empty.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// An environment variable holds a value that cannot be parsed.
    #[error("invalid value for {var}: {value:?}")]
    InvalidVar { var: &'static str, value: String },
}

/// Deployment environment the gateway runs in.
///
/// The environment determines the session cookie name so that credentials
/// issued on test or staging can never be replayed against production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    Development,
    Test,
    Staging,
    Production,
}

impl AppEnv {
    /// Parse an environment name as used in `APP_ENV`.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "development" => Ok(AppEnv::Development),
            "test" => Ok(AppEnv::Test),
            "staging" => Ok(AppEnv::Staging),
            "production" => Ok(AppEnv::Production),
            other => Err(ConfigError::InvalidVar {
                var: "APP_ENV",
                value: other.to_string(),
            }),
        }
    }

    /// Name of the session cookie for this environment.
    pub fn session_cookie_name(&self) -> &'static str {
        match self {
            AppEnv::Test => "PsFoodbookTokenT",
            AppEnv::Staging => "PsFoodbookTokenST",
            AppEnv::Development | AppEnv::Production => "PsFoodbookToken",
        }
    }

    /// Whether cookies must carry the `Secure` attribute.
    pub fn cookies_secure(&self) -> bool {
        matches!(self, AppEnv::Production)
    }

    /// Stable lowercase name, as reported by the health endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppEnv::Development => "development",
            AppEnv::Test => "test",
            AppEnv::Staging => "staging",
            AppEnv::Production => "production",
        }
    }
}

/// Complete gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub auth: AuthSettings,
    pub permalink: PermalinkSettings,
    pub server: ServerSettings,
}

/// Application-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Deployment environment.
    pub env: AppEnv,

    /// Public base URL of the gateway.
    pub url: String,
}

/// Session authentication settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Shared secret for signing and verifying session tokens.
    pub jwt_secret: String,

    /// Fixed session lifetime in seconds. Token expiry is always
    /// issued-at plus this value; callers cannot choose their own.
    pub session_duration: u64,

    /// Optional cookie domain for the session cookie.
    pub cookie_domain: Option<String>,
}

/// Permalink signing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermalinkSettings {
    /// Shared secret for permalink signatures.
    pub secret: String,

    /// Default permalink time-to-live in seconds, used when the caller
    /// does not pick one.
    pub max_age: u64,
}

/// Server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Bind address, e.g. "0.0.0.0:3000".
    pub bind: String,

    /// Base URL of the upstream Foodbook API, used by the remote token
    /// validator and the legacy catalog GUID resolver.
    pub foodbook_api_url: Option<String>,
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup function.
    ///
    /// `from_env` delegates here; tests pass a closure over a map so they
    /// never have to mutate process-wide environment state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_name = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());
        let app_env = AppEnv::parse(&env_name)?;

        Ok(AppConfig {
            app: AppSettings {
                env: app_env,
                url: lookup("APP_URL").unwrap_or_else(|| "http://localhost:3000".to_string()),
            },
            auth: AuthSettings {
                jwt_secret: required(&lookup, "JWT_SECRET")?,
                session_duration: parsed_or(&lookup, "SESSION_DURATION", 86_400)?,
                cookie_domain: lookup("COOKIE_DOMAIN").filter(|v| !v.is_empty()),
            },
            permalink: PermalinkSettings {
                secret: required(&lookup, "PERMALINK_SECRET")?,
                max_age: parsed_or(&lookup, "PERMALINK_MAX_AGE", 600)?,
            },
            server: ServerSettings {
                bind: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
                foodbook_api_url: lookup("FOODBOOK_API_URL").filter(|v| !v.is_empty()),
            },
        })
    }
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(var)),
    }
}

fn parsed_or<F>(lookup: &F, var: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidVar { var, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_cookie_name_per_environment() {
        assert_eq!(AppEnv::Production.session_cookie_name(), "PsFoodbookToken");
        assert_eq!(AppEnv::Development.session_cookie_name(), "PsFoodbookToken");
        assert_eq!(AppEnv::Test.session_cookie_name(), "PsFoodbookTokenT");
        assert_eq!(AppEnv::Staging.session_cookie_name(), "PsFoodbookTokenST");
    }

    #[test]
    fn test_secure_cookies_in_production_only() {
        assert!(AppEnv::Production.cookies_secure());
        assert!(!AppEnv::Development.cookies_secure());
        assert!(!AppEnv::Test.cookies_secure());
        assert!(!AppEnv::Staging.cookies_secure());
    }

    #[test]
    fn test_load_with_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "session-secret"),
            ("PERMALINK_SECRET", "permalink-secret"),
        ]))
        .unwrap();

        assert_eq!(config.app.env, AppEnv::Development);
        assert_eq!(config.auth.session_duration, 86_400);
        assert_eq!(config.permalink.max_age, 600);
        assert_eq!(config.server.bind, "0.0.0.0:3000");
        assert!(config.auth.cookie_domain.is_none());
    }

    #[test]
    fn test_missing_secret_fails_loudly() {
        let err = AppConfig::from_lookup(lookup_from(&[("PERMALINK_SECRET", "x")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("JWT_SECRET")));

        let err = AppConfig::from_lookup(lookup_from(&[("JWT_SECRET", "x")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("PERMALINK_SECRET")));
    }

    #[test]
    fn test_empty_secret_is_missing() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", ""),
            ("PERMALINK_SECRET", "x"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("JWT_SECRET")));
    }

    #[test]
    fn test_invalid_duration_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "x"),
            ("PERMALINK_SECRET", "y"),
            ("SESSION_DURATION", "not-a-number"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidVar {
                var: "SESSION_DURATION",
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_environment_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("APP_ENV", "qa"),
            ("JWT_SECRET", "x"),
            ("PERMALINK_SECRET", "y"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { var: "APP_ENV", .. }));
    }
}
