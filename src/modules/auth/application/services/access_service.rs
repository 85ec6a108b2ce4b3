use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::ports::incoming::use_cases::{
    AccessGrant, AuthorizeAccessError, AuthorizeAccessUseCase,
};
use crate::auth::application::ports::outgoing::SessionRepository;
use crate::user::application::ports::outgoing::UserRepository;

/// Per-request revocation check behind the authentication extractors.
pub struct AccessService {
    users: Arc<dyn UserRepository + Send + Sync>,
    sessions: Arc<dyn SessionRepository + Send + Sync>,
}

impl AccessService {
    pub fn new(
        users: Arc<dyn UserRepository + Send + Sync>,
        sessions: Arc<dyn SessionRepository + Send + Sync>,
    ) -> Self {
        Self { users, sessions }
    }
}

#[async_trait]
impl AuthorizeAccessUseCase for AccessService {
    async fn execute(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> Result<AccessGrant, AuthorizeAccessError> {
        let session = self
            .sessions
            .find_live(session_id)
            .await
            .map_err(|e| AuthorizeAccessError::RepositoryError(e.to_string()))?
            .ok_or(AuthorizeAccessError::SessionRevoked)?;

        if session.user_id != user_id {
            tracing::warn!(
                session_id = %session_id,
                user_id = %user_id,
                "Access token subject does not own session"
            );
            return Err(AuthorizeAccessError::SessionRevoked);
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| AuthorizeAccessError::RepositoryError(e.to_string()))?
            .filter(|u| u.is_active)
            .ok_or(AuthorizeAccessError::UserInactive)?;

        Ok(AccessGrant {
            user_id,
            session_id,
            roles: user.roles,
        })
    }
}
