//! Origin Gate: fixed CORS policy for the browser client.
//!
//! Note:
//! - Must be the outermost layer. Preflight probes never carry credentials, so they
//!   have to be answered before the Auth Gate sees them, and every other response
//!   (401, 404, 408, ...) still needs the policy headers.
//!
//! Policy:
//! - A single configured origin. Never `*`, because credentials are allowed.
//! - The five headers are set on every response, overriding anything set further in,
//!   so each appears exactly once.
//! - `OPTIONS` is answered with 200 and an empty body without calling the inner service.

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderValue, Method, Request, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use std::time::Duration;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{Config, ConfigError};

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// Header values computed once at startup.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    allow_origin: HeaderValue,
    max_age: HeaderValue,
}

impl OriginPolicy {
    pub fn new(allowed_origin: &str, max_age: Duration) -> Result<Self, ConfigError> {
        // Credentials are allowed, so browsers refuse a wildcard origin.
        if allowed_origin == "*" {
            return Err(ConfigError::Invalid("CORS_ALLOWED_ORIGIN"));
        }
        let allow_origin = HeaderValue::from_str(allowed_origin)
            .map_err(|_| ConfigError::Invalid("CORS_ALLOWED_ORIGIN"))?;

        Ok(Self {
            allow_origin,
            max_age: HeaderValue::from(max_age.as_secs()),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(&config.cors_allowed_origin, config.cors_max_age)
    }
}

/// Apply the Origin Gate to the given Router.
pub fn apply(router: Router, policy: &OriginPolicy) -> Router {
    router
        .layer(middleware::from_fn(preflight))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            policy.allow_origin.clone(),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_MAX_AGE,
            policy.max_age.clone(),
        ))
}

async fn preflight(req: Request<Body>, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::routing::get;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    const ORIGIN: &str = "http://localhost:3000";

    fn policy() -> OriginPolicy {
        OriginPolicy::new(ORIGIN, Duration::from_secs(3600)).unwrap()
    }

    fn counting_router(hits: Arc<AtomicUsize>) -> Router {
        let inner = Router::new().route(
            "/files",
            get(move || {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    // A handler that sets its own CORS header must not produce a duplicate.
                    ([(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")], "listing")
                }
            }),
        );
        apply(inner, &policy())
    }

    fn assert_policy_headers(res: &Response) {
        let h = res.headers();
        let one = |name: header::HeaderName| {
            let values: Vec<_> = h.get_all(&name).iter().collect();
            assert_eq!(values.len(), 1, "{name:?} should appear once");
            values[0].to_str().unwrap().to_string()
        };
        assert_eq!(one(header::ACCESS_CONTROL_ALLOW_ORIGIN), ORIGIN);
        assert_eq!(one(header::ACCESS_CONTROL_ALLOW_METHODS), ALLOWED_METHODS);
        assert_eq!(one(header::ACCESS_CONTROL_ALLOW_HEADERS), ALLOWED_HEADERS);
        assert_eq!(one(header::ACCESS_CONTROL_ALLOW_CREDENTIALS), "true");
        assert_eq!(one(header::ACCESS_CONTROL_MAX_AGE), "3600");
    }

    #[tokio::test]
    async fn preflight_short_circuits() {
        let hits = Arc::new(AtomicUsize::new(0));
        let res = counting_router(hits.clone())
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/files")
                    .header(header::ORIGIN, ORIGIN)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_policy_headers(&res);
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn preflight_for_unknown_path_is_still_answered() {
        let res = counting_router(Arc::new(AtomicUsize::new(0)))
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/nowhere")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_policy_headers(&res);
    }

    #[tokio::test]
    async fn other_methods_pass_through_with_headers() {
        let hits = Arc::new(AtomicUsize::new(0));
        let res = counting_router(hits.clone())
            .oneshot(
                Request::builder()
                    .uri("/files")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_policy_headers(&res);
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"listing");
    }

    #[test]
    fn wildcard_origin_from_env_fails_at_policy_build() {
        let config = Config::from_lookup(|key| match key {
            "JWT_SECRET" => Some("s3cret".to_string()),
            "CORS_ALLOWED_ORIGIN" => Some("*".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(
            OriginPolicy::from_config(&config).unwrap_err(),
            ConfigError::Invalid("CORS_ALLOWED_ORIGIN")
        );
    }

    #[test]
    fn wildcard_and_invalid_origins_are_refused() {
        assert!(OriginPolicy::new("*", Duration::from_secs(1)).is_err());
        assert!(OriginPolicy::new("http://bad\norigin", Duration::from_secs(1)).is_err());
    }
}
