use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::ports::outgoing::PasswordHasher;
use crate::user::application::ports::incoming::use_cases::{
    ChangePasswordCommand, ChangePasswordError, ChangePasswordUseCase,
};
use crate::user::application::ports::outgoing::{UserRepository, UserRepositoryError};

pub struct ChangePasswordService {
    users: Arc<dyn UserRepository + Send + Sync>,
    hasher: Arc<dyn PasswordHasher + Send + Sync>,
}

impl ChangePasswordService {
    pub fn new(
        users: Arc<dyn UserRepository + Send + Sync>,
        hasher: Arc<dyn PasswordHasher + Send + Sync>,
    ) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl ChangePasswordUseCase for ChangePasswordService {
    async fn execute(
        &self,
        user_id: Uuid,
        command: ChangePasswordCommand,
    ) -> Result<(), ChangePasswordError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| ChangePasswordError::RepositoryError(e.to_string()))?
            .ok_or(ChangePasswordError::UserNotFound)?;

        let matches = self
            .hasher
            .verify_password(command.current_password(), &user.password_hash)
            .await
            .map_err(|_| ChangePasswordError::HashingFailed)?;
        if !matches {
            tracing::warn!(user_id = %user_id, "Password change with wrong current password");
            return Err(ChangePasswordError::InvalidCurrentPassword);
        }

        let new_hash = self
            .hasher
            .hash_password(command.new_password())
            .await
            .map_err(|_| ChangePasswordError::HashingFailed)?;

        self.users
            .update_password(user_id, new_hash)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => ChangePasswordError::UserNotFound,
                other => ChangePasswordError::RepositoryError(other.to_string()),
            })?;

        tracing::info!(user_id = %user_id, "Password changed");
        Ok(())
    }
}
