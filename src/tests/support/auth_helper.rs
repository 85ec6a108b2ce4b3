use std::sync::Arc;

use actix_web::http::header;

use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::application::ports::outgoing::TokenProvider;

pub const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_purposes_only";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret_key: TEST_JWT_SECRET.to_string(),
        issuer: "admin_backend".to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 86400,
    }
}

pub fn test_token_provider() -> Arc<dyn TokenProvider + Send + Sync> {
    Arc::new(JwtTokenService::new(test_jwt_config()))
}

/// `Authorization` header pair for `TestRequest::insert_header`.
pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}
