//! Permalink grant issuance and verification.

use crate::crypto;
use crate::error::PermalinkError;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A self-contained, time-boxed capability for one resource.
///
/// Transmitted as the `pspid`/`psexp`/`pssig` URL query parameters and
/// never persisted server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermalinkGrant {
    /// Opaque resource identifier the grant is bound to.
    pub resource_id: String,

    /// Expiry in unix seconds.
    pub expires: u64,

    /// Lowercase hex HMAC-SHA256 over `"{resource_id}:{expires}"`.
    pub signature: String,
}

/// Issues and verifies permalink grants with a shared secret.
#[derive(Clone)]
pub struct PermalinkAuthority {
    secret: Vec<u8>,
    default_max_age: u64,
}

impl PermalinkAuthority {
    /// Create an authority from the shared secret and the default grant
    /// time-to-live in seconds.
    pub fn new(secret: &str, default_max_age: u64) -> Result<Self, PermalinkError> {
        if secret.is_empty() {
            return Err(PermalinkError::MissingSecret);
        }
        Ok(Self {
            secret: secret.as_bytes().to_vec(),
            default_max_age,
        })
    }

    /// Issue a grant for `resource_id`, expiring `ttl` seconds from now
    /// (the configured default when `ttl` is `None`).
    pub fn issue(
        &self,
        resource_id: &str,
        ttl: Option<u64>,
    ) -> Result<PermalinkGrant, PermalinkError> {
        let expires = Utc::now().timestamp() as u64 + ttl.unwrap_or(self.default_max_age);
        let message = format!("{resource_id}:{expires}");
        let signature = crypto::hmac_sha256_hex(&self.secret, message.as_bytes())?;

        Ok(PermalinkGrant {
            resource_id: resource_id.to_string(),
            expires,
            signature,
        })
    }

    /// Verify a grant from its wire fields.
    ///
    /// Two independent checks, both required: the expiry must parse and
    /// lie in the future, and the signature must match recomputation
    /// under timing-safe comparison. Expiry is checked first as a cheap
    /// short-circuit before paying for hex decode and HMAC. Any
    /// malformed input is a clean `false`, never a panic.
    pub fn verify(&self, resource_id: &str, expires: &str, signature: &str) -> bool {
        let Ok(expires_at) = expires.parse::<u64>() else {
            tracing::warn!("permalink rejected: non-numeric expiry");
            return false;
        };
        let now_ms = Utc::now().timestamp_millis() as i128;
        if now_ms > (expires_at as i128) * 1000 {
            tracing::warn!("permalink rejected: expired");
            return false;
        }

        // The message is recomputed from the supplied fields; a tampered
        // resource id changes the message and therefore the signature.
        let message = format!("{resource_id}:{expires}");
        let expected = match crypto::hmac_sha256_hex(&self.secret, message.as_bytes()) {
            Ok(expected) => expected,
            Err(err) => {
                tracing::error!(error = %err, "permalink signature recomputation failed");
                return false;
            }
        };
        let supplied_bytes = match crypto::decode_hex(signature) {
            Ok(bytes) => bytes,
            Err(_) => {
                tracing::warn!("permalink rejected: malformed signature hex");
                return false;
            }
        };
        let expected_bytes = match crypto::decode_hex(&expected) {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };

        let matches = crypto::timing_safe_eq(&supplied_bytes, &expected_bytes);
        if !matches {
            tracing::warn!("permalink rejected: bad signature");
        }
        matches
    }

    /// Verify an owned grant, e.g. one freshly issued.
    pub fn verify_grant(&self, grant: &PermalinkGrant) -> bool {
        self.verify(
            &grant.resource_id,
            &grant.expires.to_string(),
            &grant.signature,
        )
    }
}
