use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HashError {
    #[error("Password hashing failed")]
    HashFailed,

    /// The stored value is not a PHC string this hasher understands.
    #[error("Stored password hash is malformed")]
    MalformedHash,

    #[error("Password verification failed")]
    VerifyFailed,

    #[error("Hashing task was cancelled")]
    TaskFailed,
}

/// Slow, salted one-way hashing for user passwords.
///
/// `verify_password` returns `Ok(false)` for a wrong password; `Err` is kept
/// for hashes that cannot be checked at all.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, HashError>;
    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError>;
}
