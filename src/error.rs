/*
 * Responsibility
 * - Auth Gate の拒否理由 (AuthError) 定義
 * - IntoResponse 実装 (401 + 短い plain-text の理由)
 * - TokenError → InvalidCredential の変換
 */
use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::services::auth::TokenError;

/// Why a request was refused at the authentication boundary.
///
/// None of these are retryable with the same request: the client has to supply
/// (or re-obtain) a credential.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing authorization header")]
    MissingCredential,
    #[error("invalid authorization header format")]
    MalformedCredential,
    #[error("invalid or expired token: {0}")]
    InvalidCredential(String),
}

impl AuthError {
    /// Stable name for logs; never includes credential material.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::MalformedCredential => "malformed_credential",
            AuthError::InvalidCredential(_) => "invalid_credential",
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(e: TokenError) -> Self {
        AuthError::InvalidCredential(e.to_string())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: AuthError) -> (StatusCode, String) {
        let res = err.into_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn every_kind_is_a_plain_401() {
        let cases = [
            (AuthError::MissingCredential, "missing authorization header"),
            (
                AuthError::MalformedCredential,
                "invalid authorization header format",
            ),
            (
                AuthError::InvalidCredential("ExpiredSignature".into()),
                "invalid or expired token: ExpiredSignature",
            ),
        ];

        for (err, expected) in cases {
            let (status, body) = body_of(err).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, expected);
        }
    }

    #[test]
    fn token_errors_become_invalid_credential() {
        let err: AuthError = TokenError::EmptyClaim("email").into();
        assert_eq!(err.kind(), "invalid_credential");
        assert_eq!(err.to_string(), "invalid or expired token: empty 'email' claim");
    }
}
