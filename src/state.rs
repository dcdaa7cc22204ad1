/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)、起動後は読み取り専用
 */
use std::sync::Arc;

use crate::services::auth::TokenValidator;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<TokenValidator>,
}

impl AppState {
    pub fn new(auth: Arc<TokenValidator>) -> Self {
        Self { auth }
    }
}
