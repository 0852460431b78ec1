//! Session token issuance and verification.

use crate::claims::{RESERVED_CLAIMS, SessionClaims};
use crate::error::SessionError;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};

/// Issues and verifies session tokens with a shared HS256 secret.
///
/// The session lifetime is fixed at construction; `issue` always stamps
/// `exp = iat + session_duration` and callers cannot choose their own.
#[derive(Clone)]
pub struct SessionAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
    session_duration: u64,
}

impl SessionAuthority {
    /// Create an authority from the shared secret and the configured
    /// session duration in seconds.
    pub fn new(secret: &str, session_duration: u64) -> Result<Self, SessionError> {
        if secret.is_empty() {
            return Err(SessionError::MissingSecret);
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            session_duration,
        })
    }

    /// Issue a signed token for `subject`.
    ///
    /// Reserved claims (`sub`, `iat`, `exp`) in `extra_claims` are
    /// stripped, and null-valued claims are omitted rather than
    /// serialized as placeholders.
    pub fn issue(
        &self,
        subject: &str,
        extra_claims: Map<String, Value>,
    ) -> Result<String, SessionError> {
        let mut extra = Map::new();
        for (key, value) in extra_claims {
            if RESERVED_CLAIMS.contains(&key.as_str()) || value.is_null() {
                continue;
            }
            extra.insert(key, value);
        }

        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: subject.to_string(),
            iat: Some(now),
            exp: Some(now + self.session_duration as i64),
            extra,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| SessionError::Signing(e.to_string()))
    }

    /// Verify a token's signature and expiry in one call.
    ///
    /// Returns `None` for any failure: malformed structure, bad signature
    /// or expiry. The rejection class is logged for observability but is
    /// never visible to the caller.
    pub fn verify(&self, token: &str) -> Option<SessionClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        match jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &validation) {
            Ok(data) => Some(data.claims),
            Err(err) => {
                match err.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::warn!("session token rejected: expired");
                    }
                    ErrorKind::InvalidSignature => {
                        tracing::warn!("session token rejected: bad signature");
                    }
                    kind => {
                        tracing::warn!(?kind, "session token rejected: malformed");
                    }
                }
                None
            }
        }
    }

    /// Decode a token's payload without verifying anything.
    ///
    /// Structural only: the token must have exactly three dot-separated
    /// segments with a base64url JSON payload in the middle. Suitable for
    /// diagnostics and logging, never for authorization decisions.
    pub fn decode_unverified(token: &str) -> Option<SessionClaims> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 || parts[1].is_empty() {
            return None;
        }
        let payload = URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
        serde_json::from_slice(&payload).ok()
    }

    /// The configured session duration in seconds.
    pub fn session_duration(&self) -> u64 {
        self.session_duration
    }
}
