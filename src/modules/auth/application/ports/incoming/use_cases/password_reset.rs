use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::user::application::domain::{
    password_policy::{PasswordPolicy, PasswordPolicyError},
    user_fields::{normalize_email, UserFieldError},
};

//
// ──────────────────────────────────────────────────────────
// Step 1: request a code
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct RequestPasswordResetCommand {
    email: String,
}

impl RequestPasswordResetCommand {
    pub fn new(email: &str) -> Result<Self, UserFieldError> {
        Ok(Self {
            email: normalize_email(email)?,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Returned whether or not the email belongs to an account.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PasswordResetChallenge {
    pub reset_token: String,
    /// Seconds until both the token and the emailed code expire
    pub expires_in: i64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestPasswordResetError {
    #[error("Code hashing failed")]
    HashingFailed,

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait RequestPasswordResetUseCase: Send + Sync {
    async fn execute(
        &self,
        command: RequestPasswordResetCommand,
    ) -> Result<PasswordResetChallenge, RequestPasswordResetError>;
}

//
// ──────────────────────────────────────────────────────────
// Step 2: confirm with the code
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct ConfirmPasswordResetCommand {
    reset_token: String,
    code: String,
    new_password: String,
}

impl ConfirmPasswordResetCommand {
    pub fn new(
        reset_token: String,
        code: String,
        new_password: String,
    ) -> Result<Self, PasswordPolicyError> {
        PasswordPolicy::validate(&new_password)?;

        Ok(Self {
            reset_token,
            code: code.trim().to_uppercase(),
            new_password,
        })
    }

    pub fn reset_token(&self) -> &str {
        &self.reset_token
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn new_password(&self) -> &str {
        &self.new_password
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfirmPasswordResetError {
    #[error("Invalid or expired reset token")]
    InvalidResetToken,

    /// Wrong code, or the request is used, expired or out of attempts
    #[error("Invalid or expired reset code")]
    InvalidCode,

    #[error("Password hashing failed")]
    HashingFailed,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ConfirmPasswordResetUseCase: Send + Sync {
    async fn execute(
        &self,
        command: ConfirmPasswordResetCommand,
    ) -> Result<(), ConfirmPasswordResetError>;
}
