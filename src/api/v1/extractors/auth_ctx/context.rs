//! Request-scoped identity storage.
//!
//! The Auth Gate stores the subject id and email in the request `Extensions`
//! under key types that are private to this module. Nothing outside can name
//! them, so nothing outside can insert, overwrite or remove them.

use axum::http::{Extensions, Request};

use super::Identity;

#[derive(Clone)]
struct SubjectIdKey(i64);

#[derive(Clone)]
struct EmailKey(String);

/// Derive a request carrying `identity`.
///
/// Consumes the incoming request and re-assembles it around the extended
/// extensions; the caller continues with the returned value.
pub(crate) fn with_identity<B>(req: Request<B>, identity: Identity) -> Request<B> {
    let (mut parts, body) = req.into_parts();
    parts
        .extensions
        .insert(SubjectIdKey(identity.subject_id()));
    parts.extensions.insert(EmailKey(identity.email().to_owned()));
    Request::from_parts(parts, body)
}

/// Authenticated subject id, or `None` if the Auth Gate did not accept this request.
///
/// Reading is public; writing is not. Code outside the crate cannot reach the
/// writer or the key types:
///
/// ```compile_fail
/// use agam_api::api::v1::extractors::auth_ctx::with_identity;
/// ```
///
/// ```compile_fail
/// use agam_api::api::v1::extractors::auth_ctx::context;
/// ```
///
/// ```
/// use agam_api::api::v1::extractors::auth_ctx;
/// use axum::http::Request;
///
/// let req = Request::new(());
/// assert_eq!(auth_ctx::subject_id(req.extensions()), None);
/// ```
pub fn subject_id(ext: &Extensions) -> Option<i64> {
    ext.get::<SubjectIdKey>().map(|k| k.0)
}

/// Authenticated email, or `None` if the Auth Gate did not accept this request.
pub fn email(ext: &Extensions) -> Option<&str> {
    ext.get::<EmailKey>().map(|k| k.0.as_str())
}
