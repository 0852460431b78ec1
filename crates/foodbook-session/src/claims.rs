//! Session token claims.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claim names managed by the authority itself. These are stripped from
/// caller-supplied extra claims before signing.
pub(crate) const RESERVED_CLAIMS: [&str; 3] = ["sub", "iat", "exp"];

/// Payload of a session token.
///
/// `sub`, `iat` and `exp` are the registered claims; everything else the
/// token carries lands in `extra`. The timestamp fields are optional so
/// that structurally decoded foreign tokens can be represented too;
/// a payload without `exp` is always treated as expired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject identity (user or session id).
    #[serde(default)]
    pub sub: String,

    /// Issued-at, unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiry, unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Additional claims, flattened into the payload.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionClaims {
    /// Whether the token is past its expiry. Fail-closed: a payload with
    /// no expiry claim is always reported expired.
    pub fn is_expired(&self) -> bool {
        match self.exp {
            Some(exp) => Utc::now().timestamp() >= exp,
            None => true,
        }
    }
}
