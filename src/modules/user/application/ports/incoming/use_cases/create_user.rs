use async_trait::async_trait;
use uuid::Uuid;

use super::UserView;
use crate::user::application::domain::{
    entities::Role,
    password_policy::PasswordPolicy,
    user_fields::{
        normalize_email, normalize_name, normalize_phone, normalize_roles, UserFieldError,
    },
};

//
// ──────────────────────────────────────────────────────────
// Create User Command
// ──────────────────────────────────────────────────────────
//

/// Raw, unvalidated input as received from a caller.
#[derive(Debug, Clone, Default)]
pub struct CreateUserInput {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub email: String,
    pub password: String,
    pub roles: Option<Vec<Role>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    first_name: String,
    last_name: String,
    phone_number: Option<String>,
    email: String,
    password: String,
    roles: Vec<Role>,
    is_active: bool,
    creator_id: Option<Uuid>,
}

impl CreateUserCommand {
    pub fn new(input: CreateUserInput, creator_id: Option<Uuid>) -> Result<Self, UserFieldError> {
        let first_name = normalize_name("first_name", &input.first_name)?;
        let last_name = normalize_name("last_name", &input.last_name)?;
        let email = normalize_email(&input.email)?;
        let phone_number = normalize_phone(input.phone_number)?;
        PasswordPolicy::validate(&input.password)?;
        let roles = normalize_roles(input.roles.unwrap_or_else(|| vec![Role::User]))?;

        Ok(Self {
            first_name,
            last_name,
            phone_number,
            email,
            password: input.password,
            roles,
            is_active: input.is_active.unwrap_or(true),
            creator_id,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn creator_id(&self) -> Option<Uuid> {
        self.creator_id
    }
}

//
// ──────────────────────────────────────────────────────────
// Use Case Error
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CreateUserError {
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Password hashing failed")]
    HashingFailed,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

//
// ──────────────────────────────────────────────────────────
// Incoming Port (Use Case)
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait CreateUserUseCase: Send + Sync {
    async fn execute(&self, command: CreateUserCommand) -> Result<UserView, CreateUserError>;
}
