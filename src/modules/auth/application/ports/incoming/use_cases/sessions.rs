use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::application::domain::entities::Session;
use crate::user::application::domain::entities::Role;

/// Session as shown to its owner. The token hash stays server-side.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SessionView {
    pub id: Uuid,
    pub app_version: Option<String>,
    pub user_agent: Option<String>,
    pub push_token: Option<String>,
    pub roles: Vec<Role>,
    pub date_created: DateTime<Utc>,
    pub date_updated: Option<DateTime<Utc>>,
}

impl From<Session> for SessionView {
    fn from(session: Session) -> Self {
        Self {
            id: session.id,
            app_version: session.app_version,
            user_agent: session.user_agent,
            push_token: session.push_token,
            roles: session.roles,
            date_created: session.audit.date_created,
            date_updated: session.audit.date_updated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("Session not found")]
    SessionNotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Revokes one session. Revoking an already revoked session succeeds.
#[async_trait]
pub trait LogoutUseCase: Send + Sync {
    async fn execute(&self, session_id: Uuid) -> Result<(), SessionError>;
}

/// Revokes every live session of a user and returns how many there were.
#[async_trait]
pub trait LogoutAllUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid) -> Result<u64, SessionError>;
}

#[async_trait]
pub trait ListSessionsUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid) -> Result<Vec<SessionView>, SessionError>;
}

#[async_trait]
pub trait UpdatePushTokenUseCase: Send + Sync {
    async fn execute(
        &self,
        session_id: Uuid,
        push_token: Option<String>,
    ) -> Result<(), SessionError>;
}
