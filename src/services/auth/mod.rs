pub mod access_jwt;
pub mod factory;
pub mod jwt;

pub use access_jwt::{AccessClaims, TokenError, TokenValidator};
pub use factory::build_token_validator;
pub use jwt::TokenIssuer;
