use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::application::domain::entities::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
    /// Short-lived token carried between the two password-reset steps
    Reset,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TokenClaims {
    pub sub: Uuid,
    /// Session (Token row) id; absent on reset tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<Uuid>,
    #[serde(default)]
    pub roles: Vec<Role>,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
    pub iss: String,
    /// Unique per token; on reset tokens it names the stored reset request
    pub jti: Uuid,
    pub token_type: TokenType,
}

impl TokenClaims {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Who a session token pair is issued for.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSubject {
    pub user_id: Uuid,
    pub session_id: Uuid,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TokenError {
    #[error("Token encoding failed: {0}")]
    EncodingError(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Invalid token issuer")]
    InvalidIssuer,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Expected a {0:?} token")]
    InvalidTokenType(TokenType),
}

pub trait TokenProvider: Send + Sync {
    fn generate_access_token(&self, subject: &TokenSubject) -> Result<String, TokenError>;

    fn generate_refresh_token(&self, subject: &TokenSubject) -> Result<String, TokenError>;

    /// Carries no code material. `reset_id` becomes the `jti` claim.
    fn generate_reset_token(
        &self,
        user_id: Uuid,
        reset_id: Uuid,
        expiry_seconds: i64,
    ) -> Result<String, TokenError>;

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError>;

    /// Access token lifetime in seconds, reported to clients as `expires_in`.
    fn access_token_expiry(&self) -> i64;

    fn verify_token_of_type(
        &self,
        token: &str,
        expected: TokenType,
    ) -> Result<TokenClaims, TokenError> {
        let claims = self.verify_token(token)?;

        if claims.token_type != expected {
            tracing::warn!(
                expected = ?expected,
                actual = ?claims.token_type,
                "Token type mismatch"
            );
            return Err(TokenError::InvalidTokenType(expected));
        }

        Ok(claims)
    }
}
