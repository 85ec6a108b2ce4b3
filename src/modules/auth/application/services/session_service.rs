use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::ports::incoming::use_cases::{
    ListSessionsUseCase, LogoutAllUseCase, LogoutUseCase, SessionError, SessionView,
    UpdatePushTokenUseCase,
};
use crate::auth::application::ports::outgoing::{SessionRepository, SessionRepositoryError};

/// Logout, logout-all, listing and push-token updates over one session store.
#[derive(Clone)]
pub struct SessionService {
    sessions: Arc<dyn SessionRepository + Send + Sync>,
}

impl SessionService {
    pub fn new(sessions: Arc<dyn SessionRepository + Send + Sync>) -> Self {
        Self { sessions }
    }
}

fn map_error(err: SessionRepositoryError) -> SessionError {
    match err {
        SessionRepositoryError::SessionNotFound => SessionError::SessionNotFound,
        other => SessionError::RepositoryError(other.to_string()),
    }
}

#[async_trait]
impl LogoutUseCase for SessionService {
    async fn execute(&self, session_id: Uuid) -> Result<(), SessionError> {
        match self.sessions.soft_delete(session_id).await {
            Ok(()) => {
                tracing::info!(session_id = %session_id, "Session logged out");
                Ok(())
            }
            Err(SessionRepositoryError::SessionNotFound) => Ok(()),
            Err(e) => Err(map_error(e)),
        }
    }
}

#[async_trait]
impl LogoutAllUseCase for SessionService {
    async fn execute(&self, user_id: Uuid) -> Result<u64, SessionError> {
        let revoked = self
            .sessions
            .soft_delete_for_user(user_id)
            .await
            .map_err(map_error)?;

        tracing::info!(user_id = %user_id, revoked, "All sessions logged out");
        Ok(revoked)
    }
}

#[async_trait]
impl ListSessionsUseCase for SessionService {
    async fn execute(&self, user_id: Uuid) -> Result<Vec<SessionView>, SessionError> {
        let sessions = self
            .sessions
            .list_live_for_user(user_id)
            .await
            .map_err(map_error)?;

        Ok(sessions.into_iter().map(SessionView::from).collect())
    }
}

#[async_trait]
impl UpdatePushTokenUseCase for SessionService {
    async fn execute(
        &self,
        session_id: Uuid,
        push_token: Option<String>,
    ) -> Result<(), SessionError> {
        let push_token = push_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        self.sessions
            .update_push_token(session_id, push_token)
            .await
            .map_err(map_error)
    }
}
