use std::sync::Arc;

use async_trait::async_trait;

use super::{token_hasher::hash_token, token_pair::issue_token_pair};
use crate::auth::application::ports::incoming::use_cases::{
    AuthTokens, RefreshTokenError, RefreshTokenUseCase,
};
use crate::auth::application::ports::outgoing::{
    SessionRepository, SessionRepositoryError, TokenError, TokenProvider, TokenType,
};
use crate::user::application::ports::outgoing::UserRepository;
use uuid::Uuid;

pub struct RefreshTokenService {
    users: Arc<dyn UserRepository + Send + Sync>,
    sessions: Arc<dyn SessionRepository + Send + Sync>,
    tokens: Arc<dyn TokenProvider + Send + Sync>,
}

impl RefreshTokenService {
    pub fn new(
        users: Arc<dyn UserRepository + Send + Sync>,
        sessions: Arc<dyn SessionRepository + Send + Sync>,
        tokens: Arc<dyn TokenProvider + Send + Sync>,
    ) -> Self {
        Self {
            users,
            sessions,
            tokens,
        }
    }
}

impl RefreshTokenService {
    async fn revoke_reused(&self, session_id: Uuid, user_id: Uuid) -> RefreshTokenError {
        tracing::warn!(
            session_id = %session_id,
            user_id = %user_id,
            "Rotated refresh token presented again, revoking session"
        );
        match self.sessions.soft_delete(session_id).await {
            Ok(()) | Err(SessionRepositoryError::SessionNotFound) => RefreshTokenError::TokenReused,
            Err(e) => RefreshTokenError::RepositoryError(e.to_string()),
        }
    }
}

#[async_trait]
impl RefreshTokenUseCase for RefreshTokenService {
    async fn execute(&self, refresh_token: &str) -> Result<AuthTokens, RefreshTokenError> {
        let claims = self
            .tokens
            .verify_token_of_type(refresh_token, TokenType::Refresh)
            .map_err(|e| match e {
                TokenError::TokenExpired => RefreshTokenError::TokenExpired,
                _ => RefreshTokenError::InvalidToken,
            })?;

        let session_id = claims.sid.ok_or(RefreshTokenError::InvalidToken)?;

        let session = self
            .sessions
            .find_live(session_id)
            .await
            .map_err(|e| RefreshTokenError::RepositoryError(e.to_string()))?
            .ok_or(RefreshTokenError::SessionRevoked)?;

        if session.user_id != claims.sub {
            tracing::warn!(session_id = %session_id, "Refresh token subject does not own session");
            return Err(RefreshTokenError::InvalidToken);
        }

        let presented_hash = hash_token(refresh_token);
        if session.token_hash != presented_hash {
            return Err(self.revoke_reused(session_id, session.user_id).await);
        }

        // Roles are re-read so role changes apply at the next refresh
        let user = self
            .users
            .find_by_id(session.user_id)
            .await
            .map_err(|e| RefreshTokenError::RepositoryError(e.to_string()))?
            .ok_or(RefreshTokenError::SessionRevoked)?;

        if !user.is_active {
            return Err(RefreshTokenError::UserInactive);
        }

        let issued = issue_token_pair(self.tokens.as_ref(), user.id, session_id, user.roles)
            .map_err(|e| RefreshTokenError::TokenGenerationFailed(e.to_string()))?;

        match self
            .sessions
            .rotate_token(session_id, &presented_hash, issued.refresh_hash)
            .await
        {
            Ok(()) => {}
            // Another refresh with the same token got there first
            Err(SessionRepositoryError::TokenMismatch) => {
                return Err(self.revoke_reused(session_id, user.id).await);
            }
            Err(e) => return Err(RefreshTokenError::RepositoryError(e.to_string())),
        }

        tracing::debug!(session_id = %session_id, "Refresh token rotated");

        Ok(issued.tokens)
    }
}
