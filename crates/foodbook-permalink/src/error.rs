//! Error types for permalink operations.

use thiserror::Error;

/// Errors that can occur while signing or decoding permalink material.
///
/// Verification absorbs all of these into a `false` outcome; only the
/// issuance path lets them propagate.
#[derive(Debug, Error)]
pub enum PermalinkError {
    /// The permalink secret is empty or unavailable.
    #[error("permalink secret is not configured")]
    MissingSecret,

    /// Input that should have been hex was not.
    #[error("malformed hex input")]
    MalformedHex(#[from] hex::FromHexError),

    /// The signing primitive failed.
    #[error("failed to sign permalink message: {0}")]
    Signing(String),
}
