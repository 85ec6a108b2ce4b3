use async_trait::async_trait;
use uuid::Uuid;

use crate::user::application::domain::entities::Role;

/// Identity behind an access token, re-read from storage on every request.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessGrant {
    pub user_id: Uuid,
    pub session_id: Uuid,
    /// Current roles of the user, not the ones stamped into the token
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthorizeAccessError {
    #[error("Session has been revoked")]
    SessionRevoked,

    #[error("User account is inactive or deleted")]
    UserInactive,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Confirms that the session named by a verified access token is still live
/// and that its owner may still sign in.
#[async_trait]
pub trait AuthorizeAccessUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> Result<AccessGrant, AuthorizeAccessError>;
}
