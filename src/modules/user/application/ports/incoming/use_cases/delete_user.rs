use async_trait::async_trait;
use uuid::Uuid;

use super::UserView;

//
// ──────────────────────────────────────────────────────────
// Soft delete
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SoftDeleteUserError {
    #[error("User not found")]
    UserNotFound,

    #[error("Users cannot delete their own account")]
    CannotDeleteSelf,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Marks the user deleted and revokes every live session they hold.
#[async_trait]
pub trait SoftDeleteUserUseCase: Send + Sync {
    async fn execute(&self, actor_id: Uuid, user_id: Uuid) -> Result<(), SoftDeleteUserError>;
}

//
// ──────────────────────────────────────────────────────────
// Restore
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RestoreUserError {
    #[error("Deleted user not found")]
    UserNotFound,

    #[error("Email already used by another account")]
    EmailAlreadyExists,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait RestoreUserUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid) -> Result<UserView, RestoreUserError>;
}

//
// ──────────────────────────────────────────────────────────
// Hard delete
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HardDeleteUserError {
    #[error("User not found")]
    UserNotFound,

    #[error("Users cannot delete their own account")]
    CannotDeleteSelf,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Physical removal; the database cascades to the user's tokens.
#[async_trait]
pub trait HardDeleteUserUseCase: Send + Sync {
    async fn execute(&self, actor_id: Uuid, user_id: Uuid) -> Result<(), HardDeleteUserError>;
}
