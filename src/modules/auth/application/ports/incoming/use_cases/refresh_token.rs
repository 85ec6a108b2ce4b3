use async_trait::async_trait;

use super::AuthTokens;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RefreshTokenError {
    #[error("Invalid refresh token")]
    InvalidToken,

    #[error("Refresh token expired")]
    TokenExpired,

    #[error("Session has been revoked")]
    SessionRevoked,

    /// A rotated-out token was presented again; the session is revoked.
    #[error("Refresh token reuse detected")]
    TokenReused,

    #[error("User account is inactive")]
    UserInactive,

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Exchanges a refresh token for a new pair, rotating the stored hash.
#[async_trait]
pub trait RefreshTokenUseCase: Send + Sync {
    async fn execute(&self, refresh_token: &str) -> Result<AuthTokens, RefreshTokenError>;
}
