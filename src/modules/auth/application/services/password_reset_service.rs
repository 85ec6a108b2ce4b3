use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use super::code_generator::CodeGenerator;
use crate::auth::application::auth_use_cases::AuthPorts;
use crate::auth::application::ports::incoming::use_cases::{
    ConfirmPasswordResetCommand, ConfirmPasswordResetError, ConfirmPasswordResetUseCase,
    PasswordResetChallenge, RequestPasswordResetCommand, RequestPasswordResetError,
    RequestPasswordResetUseCase,
};
use crate::auth::application::ports::outgoing::{
    NewPasswordReset, PasswordHasher, PasswordResetRepository, PasswordResetRepositoryError,
    SessionRepository, TokenProvider, TokenType,
};
use crate::email::application::ports::outgoing::UserEmailNotifier;
use crate::user::application::ports::outgoing::{UserRepository, UserRepositoryError};

/// Confirmations allowed per emailed code, right or wrong.
pub const MAX_CONFIRM_ATTEMPTS: i32 = 5;

/// Two-step reset: a code is emailed and a reset token naming the stored
/// request is returned.
///
/// The code is kept server-side as an Argon2 hash and never travels in the
/// token. Each request allows `MAX_CONFIRM_ATTEMPTS` confirmations and is
/// consumed by the first correct one. A new request closes older ones.
pub struct PasswordResetService {
    users: Arc<dyn UserRepository + Send + Sync>,
    sessions: Arc<dyn SessionRepository + Send + Sync>,
    resets: Arc<dyn PasswordResetRepository + Send + Sync>,
    hasher: Arc<dyn PasswordHasher + Send + Sync>,
    tokens: Arc<dyn TokenProvider + Send + Sync>,
    notifier: Arc<dyn UserEmailNotifier + Send + Sync>,
    codes: CodeGenerator,
    expiry_seconds: i64,
}

impl PasswordResetService {
    pub fn new(ports: AuthPorts, codes: CodeGenerator, expiry_seconds: i64) -> Self {
        Self {
            users: ports.users,
            sessions: ports.sessions,
            resets: ports.resets,
            hasher: ports.hasher,
            tokens: ports.tokens,
            notifier: ports.notifier,
            codes,
            expiry_seconds,
        }
    }
}

fn repository_error(e: PasswordResetRepositoryError) -> ConfirmPasswordResetError {
    ConfirmPasswordResetError::RepositoryError(e.to_string())
}

#[async_trait]
impl RequestPasswordResetUseCase for PasswordResetService {
    async fn execute(
        &self,
        command: RequestPasswordResetCommand,
    ) -> Result<PasswordResetChallenge, RequestPasswordResetError> {
        let user = self
            .users
            .find_by_email(command.email())
            .await
            .map_err(|e| RequestPasswordResetError::RepositoryError(e.to_string()))?
            .filter(|u| u.is_active);

        let code = self.codes.generate();
        // Hashed for unknown accounts too, so both paths cost the same
        let code_hash = self
            .hasher
            .hash_password(&code)
            .await
            .map_err(|_| RequestPasswordResetError::HashingFailed)?;

        let reset_id = Uuid::new_v4();

        // Unknown or inactive accounts get a token for a random subject
        // naming a request that was never stored.
        let subject = match &user {
            Some(user) => {
                let closed = self
                    .resets
                    .consume_all_for_user(user.id)
                    .await
                    .map_err(|e| RequestPasswordResetError::RepositoryError(e.to_string()))?;
                if closed > 0 {
                    tracing::debug!(user_id = %user.id, closed, "Earlier reset codes invalidated");
                }

                self.resets
                    .create(NewPasswordReset {
                        id: reset_id,
                        user_id: user.id,
                        code_hash,
                        expires_at: Utc::now() + Duration::seconds(self.expiry_seconds),
                    })
                    .await
                    .map_err(|e| RequestPasswordResetError::RepositoryError(e.to_string()))?;
                user.id
            }
            None => Uuid::new_v4(),
        };

        let reset_token = self
            .tokens
            .generate_reset_token(subject, reset_id, self.expiry_seconds)
            .map_err(|e| RequestPasswordResetError::TokenGenerationFailed(e.to_string()))?;

        match user {
            Some(user) => {
                let expires_in_minutes = (self.expiry_seconds + 59) / 60;
                if let Err(e) = self
                    .notifier
                    .send_password_reset_code(
                        &user.email,
                        &user.full_name(),
                        &code,
                        expires_in_minutes,
                    )
                    .await
                {
                    tracing::warn!(user_id = %user.id, error = %e, "Password reset email not sent");
                } else {
                    tracing::info!(user_id = %user.id, "Password reset code sent");
                }
            }
            None => {
                tracing::info!("Password reset requested for unknown or inactive email");
            }
        }

        Ok(PasswordResetChallenge {
            reset_token,
            expires_in: self.expiry_seconds,
        })
    }
}

#[async_trait]
impl ConfirmPasswordResetUseCase for PasswordResetService {
    async fn execute(
        &self,
        command: ConfirmPasswordResetCommand,
    ) -> Result<(), ConfirmPasswordResetError> {
        let claims = self
            .tokens
            .verify_token_of_type(command.reset_token(), TokenType::Reset)
            .map_err(|_| ConfirmPasswordResetError::InvalidResetToken)?;

        // Counted before the code is checked, so parallel guesses share
        // one budget.
        let reset = self
            .resets
            .register_attempt(claims.jti, MAX_CONFIRM_ATTEMPTS, Utc::now())
            .await
            .map_err(repository_error)?
            .ok_or_else(|| {
                tracing::warn!(reset_id = %claims.jti, "Password reset is used, expired or locked");
                ConfirmPasswordResetError::InvalidCode
            })?;

        if reset.user_id != claims.sub {
            tracing::warn!(reset_id = %reset.id, "Reset token subject does not own the reset");
            return Err(ConfirmPasswordResetError::InvalidResetToken);
        }

        let matches = self
            .hasher
            .verify_password(command.code(), &reset.code_hash)
            .await
            .map_err(|_| ConfirmPasswordResetError::HashingFailed)?;

        if !matches {
            tracing::warn!(
                user_id = %reset.user_id,
                attempts = reset.attempts,
                "Password reset with wrong code"
            );
            return Err(ConfirmPasswordResetError::InvalidCode);
        }

        if !self.resets.consume(reset.id).await.map_err(repository_error)? {
            tracing::warn!(reset_id = %reset.id, "Password reset consumed concurrently");
            return Err(ConfirmPasswordResetError::InvalidCode);
        }

        let password_hash = self
            .hasher
            .hash_password(command.new_password())
            .await
            .map_err(|_| ConfirmPasswordResetError::HashingFailed)?;

        self.users
            .update_password(reset.user_id, password_hash)
            .await
            .map_err(|e| match e {
                // Deleted between request and confirm
                UserRepositoryError::UserNotFound => ConfirmPasswordResetError::InvalidResetToken,
                other => ConfirmPasswordResetError::RepositoryError(other.to_string()),
            })?;

        let revoked = self
            .sessions
            .soft_delete_for_user(reset.user_id)
            .await
            .map_err(|e| ConfirmPasswordResetError::RepositoryError(e.to_string()))?;

        tracing::info!(user_id = %reset.user_id, revoked, "Password reset completed");

        Ok(())
    }
}
