use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

use super::{Identity, context};

/// Handler で Identity を受け取るための extractor
/// Auth Gate が検証済み Identity を request extensions に載せている前提
/// 見つからない場合は 401 を返す（ゲート外に mount された handler でも fail closed）
pub struct Authenticated(pub Identity);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let subject_id = context::subject_id(&parts.extensions);
        let email = context::email(&parts.extensions);

        match (subject_id, email) {
            (Some(subject_id), Some(email)) => {
                Ok(Authenticated(Identity::new(subject_id, email.to_owned())))
            }
            _ => Err(StatusCode::UNAUTHORIZED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(req: Request<()>) -> Result<Authenticated, StatusCode> {
        let (mut parts, _) = req.into_parts();
        Authenticated::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn rejects_when_gate_did_not_run() {
        let err = extract(Request::new(())).await.err();
        assert_eq!(err, Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn yields_identity_set_by_gate() {
        let req = context::with_identity(
            Request::new(()),
            Identity::new(5, "erin@example.com".into()),
        );

        let Authenticated(identity) = extract(req).await.ok().unwrap();
        assert_eq!(identity.subject_id(), 5);
        assert_eq!(identity.email(), "erin@example.com");
    }
}
