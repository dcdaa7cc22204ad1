/// Factory: build `TokenValidator` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{TokenError, TokenValidator};

pub fn build_token_validator(config: &Config) -> Result<Arc<TokenValidator>, TokenError> {
    let validator = TokenValidator::new(&config.jwt_secret, config.access_token_leeway_seconds)?;

    Ok(Arc::new(validator))
}
