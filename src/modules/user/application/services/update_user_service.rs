use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::user::application::ports::incoming::use_cases::{
    UpdateUserCommand, UpdateUserError, UpdateUserUseCase, UserView,
};
use crate::user::application::ports::outgoing::{UserRepository, UserRepositoryError};

pub struct UpdateUserService {
    users: Arc<dyn UserRepository + Send + Sync>,
}

impl UpdateUserService {
    pub fn new(users: Arc<dyn UserRepository + Send + Sync>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UpdateUserUseCase for UpdateUserService {
    async fn execute(
        &self,
        user_id: Uuid,
        command: UpdateUserCommand,
    ) -> Result<UserView, UpdateUserError> {
        let user = self
            .users
            .update(user_id, command.into_changes())
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => UpdateUserError::UserNotFound,
                other => UpdateUserError::RepositoryError(other.to_string()),
            })?;

        tracing::info!(user_id = %user.id, "User updated");
        Ok(UserView::from(user))
    }
}
