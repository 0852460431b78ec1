//! Cryptographic primitives for permalink signatures.

use crate::error::PermalinkError;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Compute HMAC-SHA256 over `message`, returning lowercase hex.
///
/// Deterministic, no randomness. Hmac accepts keys of any length, so the
/// error arm exists only to keep signing failures visible on the issue
/// path rather than silently producing a degraded signature.
pub fn hmac_sha256_hex(secret: &[u8], message: &[u8]) -> Result<String, PermalinkError> {
    let mut mac =
        HmacSha256::new_from_slice(secret).map_err(|e| PermalinkError::Signing(e.to_string()))?;
    mac.update(message);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Timing-safe byte comparison.
///
/// Returns `false` immediately when lengths differ (leaks only length,
/// never content). Equal-length inputs are compared over every byte with
/// no early exit on the first mismatch.
pub fn timing_safe_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Decode a hex string, case-insensitively.
///
/// Malformed input is an error, never garbage bytes.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, PermalinkError> {
    Ok(hex::decode(input)?)
}
