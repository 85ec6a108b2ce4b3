use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::token_pair::issue_token_pair;
use crate::auth::application::ports::incoming::use_cases::{
    AuthTokens, LoginCommand, LoginError, LoginUseCase,
};
use crate::auth::application::ports::outgoing::{
    NewSession, PasswordHasher, SessionRepository, TokenProvider,
};
use crate::user::application::ports::outgoing::UserRepository;

//
// ──────────────────────────────────────────────────────────
// Service
// ──────────────────────────────────────────────────────────
//

pub struct LoginService {
    users: Arc<dyn UserRepository + Send + Sync>,
    sessions: Arc<dyn SessionRepository + Send + Sync>,
    hasher: Arc<dyn PasswordHasher + Send + Sync>,
    tokens: Arc<dyn TokenProvider + Send + Sync>,
}

impl LoginService {
    pub fn new(
        users: Arc<dyn UserRepository + Send + Sync>,
        sessions: Arc<dyn SessionRepository + Send + Sync>,
        hasher: Arc<dyn PasswordHasher + Send + Sync>,
        tokens: Arc<dyn TokenProvider + Send + Sync>,
    ) -> Self {
        Self {
            users,
            sessions,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl LoginUseCase for LoginService {
    async fn execute(&self, command: LoginCommand) -> Result<AuthTokens, LoginError> {
        // Soft-deleted users are invisible here, so they fail like unknown emails
        let user = self
            .users
            .find_by_email(command.email())
            .await
            .map_err(|e| LoginError::RepositoryError(e.to_string()))?
            .ok_or(LoginError::InvalidCredentials)?;

        let is_valid = self
            .hasher
            .verify_password(command.password(), &user.password_hash)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user.id, error = %e, "Password verification failed");
                LoginError::PasswordVerificationFailed
            })?;

        if !is_valid {
            tracing::info!(user_id = %user.id, "Login rejected: wrong password");
            return Err(LoginError::InvalidCredentials);
        }

        if !user.is_active {
            tracing::info!(user_id = %user.id, "Login rejected: user inactive");
            return Err(LoginError::UserInactive);
        }

        let session_id = Uuid::new_v4();
        let issued = issue_token_pair(
            self.tokens.as_ref(),
            user.id,
            session_id,
            user.roles.clone(),
        )
        .map_err(|e| LoginError::TokenGenerationFailed(e.to_string()))?;

        let device = command.device().clone();
        self.sessions
            .create(NewSession {
                id: session_id,
                user_id: user.id,
                app_version: device.app_version,
                user_agent: device.user_agent,
                token_hash: issued.refresh_hash,
                push_token: device.push_token,
                roles: user.roles,
            })
            .await
            .map_err(|e| LoginError::RepositoryError(e.to_string()))?;

        tracing::info!(user_id = %user.id, session_id = %session_id, "User logged in");

        Ok(issued.tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::DeviceInfo;
    use crate::auth::application::ports::outgoing::{SessionRepositoryError, TokenType};
    use crate::auth::application::services::hash_token;
    use crate::tests::support::auth_helper::test_token_provider;
    use crate::tests::support::fakes::{
        sample_user, FakePasswordHasher, InMemorySessionRepository, InMemoryUserRepository,
    };
    use crate::user::application::domain::entities::Role;

    struct Fixture {
        users: Arc<InMemoryUserRepository>,
        sessions: Arc<InMemorySessionRepository>,
        service: LoginService,
    }

    fn fixture_with_hasher(hasher: FakePasswordHasher) -> Fixture {
        let users = Arc::new(InMemoryUserRepository::new());
        let sessions = Arc::new(InMemorySessionRepository::new());
        let service = LoginService::new(
            users.clone(),
            sessions.clone(),
            Arc::new(hasher),
            test_token_provider(),
        );
        Fixture {
            users,
            sessions,
            service,
        }
    }

    fn fixture() -> Fixture {
        fixture_with_hasher(FakePasswordHasher::default())
    }

    fn command(email: &str, password: &str) -> LoginCommand {
        LoginCommand::new(
            email.to_string(),
            password.to_string(),
            DeviceInfo {
                app_version: Some("2.0.1".to_string()),
                user_agent: Some("Mozilla/5.0".to_string()),
                push_token: Some("push-1".to_string()),
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_login_success_creates_session() {
        let f = fixture();
        let user = f
            .users
            .insert(sample_user("ada@example.com", "Password1", vec![Role::Admin]));

        let tokens = f
            .service
            .execute(command("ada@example.com", "Password1"))
            .await
            .unwrap();

        assert_eq!(tokens.token_type, "Bearer");
        assert_eq!(tokens.expires_in, 3600);

        let session = f.sessions.get(tokens.session_id).expect("session row");
        assert_eq!(session.user_id, user.id);
        assert_eq!(session.token_hash, hash_token(&tokens.refresh_token));
        assert_eq!(session.roles, vec![Role::Admin]);
        assert_eq!(session.app_version.as_deref(), Some("2.0.1"));
        assert_eq!(session.push_token.as_deref(), Some("push-1"));

        let claims = test_token_provider()
            .verify_token_of_type(&tokens.access_token, TokenType::Access)
            .unwrap();
        assert_eq!(claims.sid, Some(session.id));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let f = fixture();

        let result = f
            .service
            .execute(command("nobody@example.com", "Password1"))
            .await;

        assert_eq!(result, Err(LoginError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let f = fixture();
        f.users
            .insert(sample_user("ada@example.com", "Password1", vec![Role::User]));

        let result = f
            .service
            .execute(command("ada@example.com", "Password2"))
            .await;

        assert_eq!(result, Err(LoginError::InvalidCredentials));
        assert!(f.sessions.all().is_empty());
    }

    #[tokio::test]
    async fn test_login_soft_deleted_user_looks_unknown() {
        let f = fixture();
        let mut user = sample_user("ada@example.com", "Password1", vec![Role::User]);
        user.audit.is_delete = true;
        f.users.insert(user);

        let result = f
            .service
            .execute(command("ada@example.com", "Password1"))
            .await;

        assert_eq!(result, Err(LoginError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_inactive_user() {
        let f = fixture();
        let mut user = sample_user("ada@example.com", "Password1", vec![Role::User]);
        user.is_active = false;
        f.users.insert(user);

        let result = f
            .service
            .execute(command("ada@example.com", "Password1"))
            .await;

        assert_eq!(result, Err(LoginError::UserInactive));
    }

    #[tokio::test]
    async fn test_login_hasher_failure() {
        let f = fixture_with_hasher(FakePasswordHasher::failing());
        f.users
            .insert(sample_user("ada@example.com", "Password1", vec![Role::User]));

        let result = f
            .service
            .execute(command("ada@example.com", "Password1"))
            .await;

        assert_eq!(result, Err(LoginError::PasswordVerificationFailed));
    }

    #[tokio::test]
    async fn test_login_session_store_failure() {
        let f = fixture();
        f.users
            .insert(sample_user("ada@example.com", "Password1", vec![Role::User]));
        f.sessions
            .fail_with(SessionRepositoryError::DatabaseError("db down".to_string()));

        let result = f
            .service
            .execute(command("ada@example.com", "Password1"))
            .await;

        assert!(matches!(result, Err(LoginError::RepositoryError(msg)) if msg.contains("db down")));
    }
}
