use async_trait::async_trait;
use uuid::Uuid;

use super::UserView;
use crate::user::application::domain::{
    entities::Role,
    user_fields::{normalize_name, normalize_phone, normalize_roles, UserFieldError},
};
use crate::user::application::ports::outgoing::UserChanges;

//
// ──────────────────────────────────────────────────────────
// Update User Command
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
    changes: UserChanges,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UpdateUserCommandError {
    #[error(transparent)]
    Field(#[from] UserFieldError),

    #[error("No fields to update")]
    NothingToUpdate,
}

impl UpdateUserCommand {
    /// `phone_number: Some("")` clears the stored phone.
    pub fn new(
        first_name: Option<String>,
        last_name: Option<String>,
        phone_number: Option<String>,
        roles: Option<Vec<Role>>,
        is_active: Option<bool>,
    ) -> Result<Self, UpdateUserCommandError> {
        let changes = UserChanges {
            first_name: first_name
                .map(|v| normalize_name("first_name", &v))
                .transpose()?,
            last_name: last_name
                .map(|v| normalize_name("last_name", &v))
                .transpose()?,
            phone_number: phone_number
                .map(|v| normalize_phone(Some(v)))
                .transpose()?,
            roles: roles.map(normalize_roles).transpose()?,
            is_active,
        };

        if changes.is_empty() {
            return Err(UpdateUserCommandError::NothingToUpdate);
        }

        Ok(Self { changes })
    }

    pub fn changes(&self) -> &UserChanges {
        &self.changes
    }

    pub fn into_changes(self) -> UserChanges {
        self.changes
    }
}

//
// ──────────────────────────────────────────────────────────
// Use Case Error
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UpdateUserError {
    #[error("User not found")]
    UserNotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait UpdateUserUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        command: UpdateUserCommand,
    ) -> Result<UserView, UpdateUserError>;
}
