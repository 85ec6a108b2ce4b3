use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::shared::persistence::{Page, PageRequest};
use crate::user::application::domain::entities::{Role, User};

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub roles: Vec<Role>,
    pub is_active: bool,
    pub creator_id: Option<Uuid>,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<Option<String>>,
    pub roles: Option<Vec<Role>>,
    pub is_active: Option<bool>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self == &UserChanges::default()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Stored user data is invalid: {0}")]
    InvalidStoredData(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, UserRepositoryError>;

    /// Live users only.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError>;

    /// Live users only. Email comparison is case-insensitive.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError>;

    async fn list(&self, page: PageRequest) -> Result<Page<User>, UserRepositoryError>;

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<User, UserRepositoryError>;

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: String,
    ) -> Result<(), UserRepositoryError>;

    async fn soft_delete(&self, id: Uuid) -> Result<(), UserRepositoryError>;

    async fn restore(&self, id: Uuid) -> Result<User, UserRepositoryError>;

    async fn hard_delete(&self, id: Uuid) -> Result<(), UserRepositoryError>;

    async fn purge_deleted_before(&self, cutoff: DateTime<Utc>)
        -> Result<u64, UserRepositoryError>;
}
