/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - ここに並ぶ route はすべて Auth Gate の内側 (app.rs で bearer_auth::apply される)
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::me::me;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/me", get(me))
}
