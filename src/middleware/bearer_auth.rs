//! Auth Gate: `Authorization: Bearer <jwt>` 検証 → Identity を request extensions に載せる
//!
//! Stages (terminal on the first failure):
//! - Unchecked     → header present and non-empty, else `MissingCredential`
//! - HeaderPresent → exactly `Bearer <token>` (one space, two parts), else `MalformedCredential`
//! - FormatValid   → token verifies, else `InvalidCredential`
//! - Validated     → derived request continues to the handler
//!
//! A token containing a space is rejected on purpose: the header must split
//! into exactly two parts.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::{Identity, auth_ctx};
use crate::error::AuthError;
use crate::services::auth::TokenValidator;
use crate::state::AppState;

/// Put every route of `router` behind the Auth Gate.
///
/// 例：
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::bearer_auth::apply(v1, state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, bearer_auth))
}

async fn bearer_auth(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let identity = match authenticate(&state.auth, req.headers()) {
        Ok(identity) => identity,
        Err(err) => {
            // kind only; the header value is never logged
            tracing::warn!(
                reason = err.kind(),
                method = %req.method(),
                path = %req.uri().path(),
                "request rejected by auth gate"
            );
            return Err(err);
        }
    };

    tracing::debug!(subject_id = identity.subject_id(), "request authenticated");

    let req = auth_ctx::with_identity(req, identity);
    Ok(next.run(req).await)
}

fn authenticate(validator: &TokenValidator, headers: &HeaderMap) -> Result<Identity, AuthError> {
    let token = bearer_token(headers)?;
    let claims = validator.validate(token)?;
    Ok(Identity::from_claims(claims))
}

/// Extract the raw token from `Authorization: Bearer <token>`.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = match headers.get(header::AUTHORIZATION) {
        Some(v) if !v.is_empty() => v,
        _ => return Err(AuthError::MissingCredential),
    };

    let value = value
        .to_str()
        .map_err(|_| AuthError::MalformedCredential)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => Err(AuthError::MalformedCredential),
    }
}
