use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct NewPasswordReset {
    /// Generated by the caller so it can become the reset token's `jti`
    pub id: Uuid,
    pub user_id: Uuid,
    pub code_hash: String,
    pub expires_at: DateTime<Utc>,
}

/// Server-side half of a password reset. The client only ever holds a token
/// naming `id`; the code itself is kept as a slow hash.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordReset {
    pub id: Uuid,
    pub user_id: Uuid,
    pub code_hash: String,
    /// Confirmations tried so far, right or wrong
    pub attempts: i32,
    pub expires_at: DateTime<Utc>,
    pub consumed_at: Option<DateTime<Utc>>,
    pub date_created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PasswordResetRepositoryError {
    #[error("Reset owner does not exist")]
    UserNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait PasswordResetRepository: Send + Sync {
    async fn create(
        &self,
        reset: NewPasswordReset,
    ) -> Result<PasswordReset, PasswordResetRepositoryError>;

    /// Atomically counts one confirmation attempt against an open reset.
    ///
    /// Returns the reset after the increment, or `None` when it is unknown,
    /// consumed, expired at `now` or already at `max_attempts`.
    async fn register_attempt(
        &self,
        id: Uuid,
        max_attempts: i32,
        now: DateTime<Utc>,
    ) -> Result<Option<PasswordReset>, PasswordResetRepositoryError>;

    /// Marks the reset used. `false` when something else consumed it first.
    async fn consume(&self, id: Uuid) -> Result<bool, PasswordResetRepositoryError>;

    /// Closes every open reset of a user; returns how many.
    async fn consume_all_for_user(&self, user_id: Uuid)
        -> Result<u64, PasswordResetRepositoryError>;

    /// Physically removes resets that expired before `cutoff`.
    async fn purge_expired_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, PasswordResetRepositoryError>;
}
