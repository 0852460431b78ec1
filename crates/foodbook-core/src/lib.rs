//! # foodbook-core
//!
//! Shared configuration for the Foodbook gateway crates.
//!
//! Configuration is loaded from environment variables once at process
//! startup and is read-only afterwards. Required secrets fail loudly at
//! load time; the gateway never runs with an empty signing secret.

pub mod config;

pub use config::{
    AppConfig, AppEnv, AppSettings, AuthSettings, ConfigError, PermalinkSettings, ServerSettings,
};
