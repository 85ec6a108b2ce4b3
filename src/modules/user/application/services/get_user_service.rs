use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::user::application::ports::incoming::use_cases::{GetUserError, GetUserUseCase, UserView};
use crate::user::application::ports::outgoing::UserRepository;

pub struct GetUserService {
    users: Arc<dyn UserRepository + Send + Sync>,
}

impl GetUserService {
    pub fn new(users: Arc<dyn UserRepository + Send + Sync>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl GetUserUseCase for GetUserService {
    async fn execute(&self, user_id: Uuid) -> Result<UserView, GetUserError> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(|e| GetUserError::RepositoryError(e.to_string()))?
            .map(UserView::from)
            .ok_or(GetUserError::UserNotFound)
    }
}
