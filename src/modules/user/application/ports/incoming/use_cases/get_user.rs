use async_trait::async_trait;
use uuid::Uuid;

use super::UserView;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GetUserError {
    #[error("User not found")]
    UserNotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait GetUserUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid) -> Result<UserView, GetUserError>;
}
