/*
 * Responsibility
 * - GET /api/v1/me
 * - Auth Gate が載せた Identity をそのまま返す (vault 系 handler と同じ受け取り方)
 */
use axum::Json;

use crate::api::v1::extractors::{Authenticated, Identity};

pub async fn me(Authenticated(identity): Authenticated) -> Json<Identity> {
    Json(identity)
}
