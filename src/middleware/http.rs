//! Transport layers shared by every vault route (public `/health` and the
//! protected `/api/v1/*` alike).
//!
//! Sits between the Origin Gate and the routes: a 408 or 413 produced here goes
//! back out through the CORS header layers, and the Auth Gate only ever sees
//! requests that already have an `x-request-id`.
//!
//! - `x-request-id`: generated when the client sent none, echoed on the response
//! - body limit: `MAX_BODY_BYTES`, sized for file uploads rather than JSON
//! - timeout: `REQUEST_TIMEOUT_SECONDS`; the handler future is dropped on expiry

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::{StatusCode, header::HeaderName};
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Wrap `router` in the request-id / trace / limit / timeout stack.
pub fn apply(router: Router, config: &Config) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    let layers = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(layer_error_status))
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http());

    router.layer(layers)
}

// axum needs an `Infallible` service; timeout is the only error the stack raises.
async fn layer_error_status(err: BoxError) -> StatusCode {
    if err.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!("request timed out");
        StatusCode::REQUEST_TIMEOUT
    } else {
        tracing::error!(error = %err, "middleware error");
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
