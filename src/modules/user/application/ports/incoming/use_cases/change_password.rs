use async_trait::async_trait;
use uuid::Uuid;

use crate::user::application::domain::password_policy::{PasswordPolicy, PasswordPolicyError};

#[derive(Debug, Clone)]
pub struct ChangePasswordCommand {
    current_password: String,
    new_password: String,
}

impl ChangePasswordCommand {
    pub fn new(
        current_password: String,
        new_password: String,
    ) -> Result<Self, PasswordPolicyError> {
        PasswordPolicy::validate(&new_password)?;

        Ok(Self {
            current_password,
            new_password,
        })
    }

    pub fn current_password(&self) -> &str {
        &self.current_password
    }

    pub fn new_password(&self) -> &str {
        &self.new_password
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChangePasswordError {
    #[error("User not found")]
    UserNotFound,

    #[error("Current password is incorrect")]
    InvalidCurrentPassword,

    #[error("Password hashing failed")]
    HashingFailed,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ChangePasswordUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        command: ChangePasswordCommand,
    ) -> Result<(), ChangePasswordError>;
}
