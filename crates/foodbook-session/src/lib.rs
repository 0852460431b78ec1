//! # foodbook-session
//!
//! Session token handling for the Foodbook gateway.
//!
//! This crate provides functionality for:
//! - Issuing HS256-signed session tokens with a fixed, configured lifetime
//! - Verifying tokens (signature and expiry checked in one call)
//! - Structurally decoding tokens without verification, for diagnostics
//!
//! ## Trust model
//!
//! Verification failures are absorbed here: callers see `Option`, never an
//! error, so one malformed credential cannot crash request handling. Only
//! the issuance path surfaces errors, since a signing failure means the
//! deployment is misconfigured and must be visible.
//!
//! The [`SessionVerifier`] trait splits secret access by execution
//! context: [`LocalVerifier`] holds the secret directly and is for trusted
//! contexts only; [`RemoteVerifier`] has no secret and delegates to the
//! trusted validation endpoint over HTTP. Which one a component gets is
//! decided at composition time, never by runtime environment sniffing.

pub mod claims;
pub mod error;
pub mod token;
pub mod verifier;

pub use claims::SessionClaims;
pub use error::SessionError;
pub use token::SessionAuthority;
pub use verifier::{LocalVerifier, RemoteVerifier, SessionVerifier, TokenValidation};
