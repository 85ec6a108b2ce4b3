use async_trait::async_trait;

use super::UserView;
use crate::shared::persistence::{Page, PageRequest};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListUsersError {
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ListUsersUseCase: Send + Sync {
    async fn execute(&self, page: PageRequest) -> Result<Page<UserView>, ListUsersError>;
}
