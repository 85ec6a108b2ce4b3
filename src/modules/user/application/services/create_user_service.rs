use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::application::ports::outgoing::PasswordHasher;
use crate::email::application::ports::outgoing::UserEmailNotifier;
use crate::user::application::ports::incoming::use_cases::{
    CreateUserCommand, CreateUserError, CreateUserUseCase, UserView,
};
use crate::user::application::ports::outgoing::{NewUser, UserRepository, UserRepositoryError};

//
// ──────────────────────────────────────────────────────────
// Service
// ──────────────────────────────────────────────────────────
//

pub struct CreateUserService {
    users: Arc<dyn UserRepository + Send + Sync>,
    hasher: Arc<dyn PasswordHasher + Send + Sync>,
    notifier: Arc<dyn UserEmailNotifier + Send + Sync>,
}

impl CreateUserService {
    pub fn new(
        users: Arc<dyn UserRepository + Send + Sync>,
        hasher: Arc<dyn PasswordHasher + Send + Sync>,
        notifier: Arc<dyn UserEmailNotifier + Send + Sync>,
    ) -> Self {
        Self {
            users,
            hasher,
            notifier,
        }
    }
}

#[async_trait]
impl CreateUserUseCase for CreateUserService {
    async fn execute(&self, command: CreateUserCommand) -> Result<UserView, CreateUserError> {
        // Cheap check first so a duplicate does not pay for Argon2
        let existing = self
            .users
            .find_by_email(command.email())
            .await
            .map_err(|e| CreateUserError::RepositoryError(e.to_string()))?;
        if existing.is_some() {
            return Err(CreateUserError::EmailAlreadyExists);
        }

        let password_hash = self
            .hasher
            .hash_password(command.password())
            .await
            .map_err(|_| CreateUserError::HashingFailed)?;

        let user = self
            .users
            .create(NewUser {
                first_name: command.first_name().to_string(),
                last_name: command.last_name().to_string(),
                phone_number: command.phone_number().map(str::to_string),
                email: command.email().to_string(),
                password_hash,
                roles: command.roles().to_vec(),
                is_active: command.is_active(),
                creator_id: command.creator_id(),
            })
            .await
            .map_err(|e| match e {
                UserRepositoryError::EmailAlreadyExists => CreateUserError::EmailAlreadyExists,
                other => CreateUserError::RepositoryError(other.to_string()),
            })?;

        tracing::info!(user_id = %user.id, creator_id = ?user.audit.creator_id, "User created");

        if let Err(e) = self
            .notifier
            .send_welcome(&user.email, &user.full_name())
            .await
        {
            tracing::warn!(user_id = %user.id, error = %e, "Welcome email not sent");
        }

        Ok(UserView::from(user))
    }
}
