use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::ports::outgoing::SessionRepository;
use crate::user::application::ports::incoming::use_cases::{
    HardDeleteUserError, HardDeleteUserUseCase, RestoreUserError, RestoreUserUseCase,
    SoftDeleteUserError, SoftDeleteUserUseCase, UserView,
};
use crate::user::application::ports::outgoing::{UserRepository, UserRepositoryError};

// ──── Soft delete ───────────────────────────────────────────────────────

pub struct SoftDeleteUserService {
    users: Arc<dyn UserRepository + Send + Sync>,
    sessions: Arc<dyn SessionRepository + Send + Sync>,
}

impl SoftDeleteUserService {
    pub fn new(
        users: Arc<dyn UserRepository + Send + Sync>,
        sessions: Arc<dyn SessionRepository + Send + Sync>,
    ) -> Self {
        Self { users, sessions }
    }
}

#[async_trait]
impl SoftDeleteUserUseCase for SoftDeleteUserService {
    async fn execute(&self, actor_id: Uuid, user_id: Uuid) -> Result<(), SoftDeleteUserError> {
        if actor_id == user_id {
            return Err(SoftDeleteUserError::CannotDeleteSelf);
        }

        self.users.soft_delete(user_id).await.map_err(|e| match e {
            UserRepositoryError::UserNotFound => SoftDeleteUserError::UserNotFound,
            other => SoftDeleteUserError::RepositoryError(other.to_string()),
        })?;

        // Soft delete does not trigger the FK cascade, tokens are flagged here
        let revoked = self
            .sessions
            .soft_delete_for_user(user_id)
            .await
            .map_err(|e| SoftDeleteUserError::RepositoryError(e.to_string()))?;

        tracing::info!(user_id = %user_id, actor_id = %actor_id, revoked, "User soft-deleted");
        Ok(())
    }
}

// ──── Restore ───────────────────────────────────────────────────────────

pub struct RestoreUserService {
    users: Arc<dyn UserRepository + Send + Sync>,
}

impl RestoreUserService {
    pub fn new(users: Arc<dyn UserRepository + Send + Sync>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl RestoreUserUseCase for RestoreUserService {
    async fn execute(&self, user_id: Uuid) -> Result<UserView, RestoreUserError> {
        let user = self.users.restore(user_id).await.map_err(|e| match e {
            UserRepositoryError::UserNotFound => RestoreUserError::UserNotFound,
            UserRepositoryError::EmailAlreadyExists => RestoreUserError::EmailAlreadyExists,
            other => RestoreUserError::RepositoryError(other.to_string()),
        })?;

        tracing::info!(user_id = %user_id, "User restored");
        Ok(UserView::from(user))
    }
}

// ──── Hard delete ───────────────────────────────────────────────────────

pub struct HardDeleteUserService {
    users: Arc<dyn UserRepository + Send + Sync>,
}

impl HardDeleteUserService {
    pub fn new(users: Arc<dyn UserRepository + Send + Sync>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl HardDeleteUserUseCase for HardDeleteUserService {
    async fn execute(&self, actor_id: Uuid, user_id: Uuid) -> Result<(), HardDeleteUserError> {
        if actor_id == user_id {
            return Err(HardDeleteUserError::CannotDeleteSelf);
        }

        self.users.hard_delete(user_id).await.map_err(|e| match e {
            UserRepositoryError::UserNotFound => HardDeleteUserError::UserNotFound,
            other => HardDeleteUserError::RepositoryError(other.to_string()),
        })?;

        tracing::warn!(user_id = %user_id, actor_id = %actor_id, "User permanently deleted");
        Ok(())
    }
}
