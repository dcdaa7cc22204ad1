use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by access-token signing / verification.
///
/// `Display` is what ends up after `invalid or expired token: ` in a 401 body,
/// so it must never contain the token or the secret.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("{0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("empty '{0}' claim")]
    EmptyClaim(&'static str),
    #[error("signing secret must not be empty")]
    EmptySecret,
}

/// Access token (JWT, HS256) claims as issued for a vault user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub user_id: i64,
    pub email: String,
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
}

/// HS256 access-token verifier bound to a shared secret.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenValidator {
    pub fn new(secret: &str, leeway_seconds: u64) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        // Only HS256 is accepted; `exp` is required by default.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Verify signature, algorithm and expiry, then decode the claims.
    ///
    /// Pure computation over the token and the secret: no I/O, no caching.
    pub fn validate(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let data =
            jsonwebtoken::decode::<AccessClaims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        if claims.email.trim().is_empty() {
            return Err(TokenError::EmptyClaim("email"));
        }

        Ok(claims)
    }
}
