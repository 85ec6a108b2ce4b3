use async_trait::async_trait;
use email_address::EmailAddress;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::application::domain::entities::DeviceInfo;

//
// ──────────────────────────────────────────────────────────
// Login Command
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct LoginCommand {
    email: String,
    password: String,
    device: DeviceInfo,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoginCommandError {
    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Password cannot be empty")]
    EmptyPassword,
}

impl LoginCommand {
    pub fn new(
        email: String,
        password: String,
        device: DeviceInfo,
    ) -> Result<Self, LoginCommandError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(LoginCommandError::EmptyEmail);
        }
        if !EmailAddress::is_valid(email) {
            return Err(LoginCommandError::InvalidEmailFormat);
        }
        if password.is_empty() {
            return Err(LoginCommandError::EmptyPassword);
        }

        Ok(Self {
            email: email.to_lowercase(),
            password,
            device,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn device(&self) -> &DeviceInfo {
        &self.device
    }
}

//
// ──────────────────────────────────────────────────────────
// Output
// ──────────────────────────────────────────────────────────
//

/// Token pair returned by login and refresh.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    pub session_id: Uuid,
}

//
// ──────────────────────────────────────────────────────────
// Use Case Error
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User account is inactive")]
    UserInactive,

    #[error("Password verification failed")]
    PasswordVerificationFailed,

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

//
// ──────────────────────────────────────────────────────────
// Incoming Port (Use Case)
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait LoginUseCase: Send + Sync {
    async fn execute(&self, command: LoginCommand) -> Result<AuthTokens, LoginError>;
}
