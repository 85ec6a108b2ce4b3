use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::auth::application::domain::entities::Session;
use crate::user::application::domain::entities::Role;

#[derive(Debug, Clone, PartialEq)]
pub struct NewSession {
    /// Generated by the caller so it can be embedded in the refresh token
    pub id: Uuid,
    pub user_id: Uuid,
    pub app_version: Option<String>,
    pub user_agent: Option<String>,
    pub token_hash: String,
    pub push_token: Option<String>,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionRepositoryError {
    #[error("Session not found")]
    SessionNotFound,

    #[error("Session no longer holds the presented token")]
    TokenMismatch,

    #[error("Session owner does not exist")]
    UserNotFound,

    #[error("Stored session data is invalid: {0}")]
    InvalidStoredData(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Persistence for per-device sessions (the `tokens` table).
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: NewSession) -> Result<Session, SessionRepositoryError>;

    async fn find_live(&self, id: Uuid) -> Result<Option<Session>, SessionRepositoryError>;

    async fn list_live_for_user(&self, user_id: Uuid)
        -> Result<Vec<Session>, SessionRepositoryError>;

    /// Swaps the stored refresh-token hash, but only while the live session
    /// still holds `expected_hash`. Fails with `TokenMismatch` otherwise, so
    /// two concurrent refreshes with the same token cannot both win.
    async fn rotate_token(
        &self,
        id: Uuid,
        expected_hash: &str,
        new_hash: String,
    ) -> Result<(), SessionRepositoryError>;

    async fn update_push_token(
        &self,
        id: Uuid,
        push_token: Option<String>,
    ) -> Result<(), SessionRepositoryError>;

    async fn soft_delete(&self, id: Uuid) -> Result<(), SessionRepositoryError>;

    /// Returns how many sessions were revoked.
    async fn soft_delete_for_user(&self, user_id: Uuid) -> Result<u64, SessionRepositoryError>;

    async fn purge_deleted_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, SessionRepositoryError>;
}
