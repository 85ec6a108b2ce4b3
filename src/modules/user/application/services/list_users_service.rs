use std::sync::Arc;

use async_trait::async_trait;

use crate::shared::persistence::{Page, PageRequest};
use crate::user::application::ports::incoming::use_cases::{
    ListUsersError, ListUsersUseCase, UserView,
};
use crate::user::application::ports::outgoing::UserRepository;

pub struct ListUsersService {
    users: Arc<dyn UserRepository + Send + Sync>,
}

impl ListUsersService {
    pub fn new(users: Arc<dyn UserRepository + Send + Sync>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl ListUsersUseCase for ListUsersService {
    async fn execute(&self, page: PageRequest) -> Result<Page<UserView>, ListUsersError> {
        let users = self
            .users
            .list(page)
            .await
            .map_err(|e| ListUsersError::RepositoryError(e.to_string()))?;

        Ok(users.map(UserView::from))
    }
}
