/*
 * Responsibility
 * - middleware の公開インターフェース
 * - 適用順 (外側から): cors (Origin Gate) → http → bearer_auth (Auth Gate)
 */
pub mod bearer_auth;
pub mod cors;
pub mod http;
