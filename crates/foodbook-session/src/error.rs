//! Error types for session token operations.

use thiserror::Error;

/// Errors surfaced by the issuance path.
///
/// Verification never returns these: a token that fails verification for
/// any reason is reported as `None` by [`crate::SessionAuthority::verify`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session secret is empty or unavailable.
    #[error("session secret is not configured")]
    MissingSecret,

    /// The signing primitive failed. A token must never be issued
    /// unsigned or with a degraded signature, so this propagates.
    #[error("failed to sign session token: {0}")]
    Signing(String),
}
