/*
 * Responsibility
 * - GET /health (疎通用)
 * - Auth Gate の外、Origin Gate の内側に置く
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
