//! Session verification behind a trait, split by execution context.
//!
//! Trusted contexts hold the secret and verify locally. Untrusted
//! contexts get a [`RemoteVerifier`] that has no secret at all and asks
//! the trusted validation endpoint instead. The choice is made when the
//! application is composed, never by sniffing the environment at runtime.

use crate::claims::SessionClaims;
use crate::token::SessionAuthority;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Verifies session tokens, yielding claims only for valid ones.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// Returns the claims for a valid token, `None` otherwise. Transport
    /// or verification failures are all collapsed into `None`.
    async fn verify(&self, token: &str) -> Option<SessionClaims>;
}

/// Wire shape of the validation endpoint, shared by the endpoint handler
/// and the remote verifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenValidation {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<SessionClaims>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Trusted-context verifier with direct secret access.
pub struct LocalVerifier {
    authority: SessionAuthority,
}

impl LocalVerifier {
    pub fn new(authority: SessionAuthority) -> Self {
        Self { authority }
    }
}

#[async_trait]
impl SessionVerifier for LocalVerifier {
    async fn verify(&self, token: &str) -> Option<SessionClaims> {
        self.authority.verify(token)
    }
}

/// Untrusted-context verifier that delegates to the trusted validation
/// endpoint over HTTP. Holds no secret.
pub struct RemoteVerifier {
    client: reqwest::Client,
    validate_url: String,
}

impl RemoteVerifier {
    pub fn new(validate_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            validate_url: validate_url.into(),
        }
    }
}

#[async_trait]
impl SessionVerifier for RemoteVerifier {
    async fn verify(&self, token: &str) -> Option<SessionClaims> {
        let response = match self
            .client
            .post(&self.validate_url)
            .json(&serde_json::json!({ "token": token }))
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "token validation request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "token validation rejected");
            return None;
        }

        match response.json::<TokenValidation>().await {
            Ok(validation) if validation.is_valid => validation.payload,
            Ok(_) => None,
            Err(err) => {
                tracing::warn!(error = %err, "token validation response unreadable");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    #[tokio::test]
    async fn test_local_verifier_round_trip() {
        let authority = SessionAuthority::new("verifier-secret", 3600).unwrap();
        let token = authority.issue("user-9", Map::new()).unwrap();

        let verifier = LocalVerifier::new(authority);
        let claims = verifier.verify(&token).await.unwrap();
        assert_eq!(claims.sub, "user-9");
        assert!(verifier.verify("garbage").await.is_none());
    }

    #[tokio::test]
    async fn test_remote_verifier_unreachable_endpoint_fails_closed() {
        // Nothing listens here; the verifier must yield None, not error.
        let verifier = RemoteVerifier::new("http://127.0.0.1:1/api/auth/validate");
        assert!(verifier.verify("any-token").await.is_none());
    }

    #[test]
    fn test_token_validation_wire_shape() {
        let validation: TokenValidation =
            serde_json::from_str(r#"{"isValid":false,"error":"Invalid token"}"#).unwrap();
        assert!(!validation.is_valid);
        assert_eq!(validation.error.as_deref(), Some("Invalid token"));
        assert!(validation.payload.is_none());
    }
}
