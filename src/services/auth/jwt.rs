use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;
use tracing::error;

use super::access_jwt::{AccessClaims, TokenError};

/// Signs HS256 access tokens with the same shared secret the gate verifies with.
///
/// Production tokens come from the login/OTP flow; this issuer exists for local
/// tooling and tests.
#[derive(Clone)]
pub struct TokenIssuer {
    ttl_seconds: u64,
    encoding_key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl_seconds: u64) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        Ok(Self {
            ttl_seconds,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
        })
    }

    /// Issue an access token for a vault user.
    pub fn issue(&self, user_id: i64, email: &str) -> Result<String, TokenError> {
        let now = chrono::Utc::now().timestamp().max(0) as u64;

        let claims = AccessClaims {
            user_id,
            email: email.to_string(),
            exp: now + self.ttl_seconds,
            iat: Some(now),
        };

        self.sign(&claims)
    }

    pub fn sign<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            TokenError::Jwt(e)
        })
    }
}
