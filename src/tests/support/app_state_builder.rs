use std::path::Path;
use std::sync::Arc;

use actix_web::web;
use tempfile::TempDir;

use crate::auth::application::auth_use_cases::{AuthPorts, AuthUseCases};
use crate::auth::application::domain::entities::DeviceInfo;
use crate::auth::application::ports::incoming::use_cases::{
    AuthTokens, LoginCommand, LoginUseCase,
};
use crate::auth::application::ports::outgoing::TokenProvider;
use crate::auth::application::services::CodeGenerator;
use crate::config::CodeAlphabet;
use crate::storage::adapter::outgoing::LocalFileStorage;
use crate::storage::application::domain::UploadPolicy;
use crate::storage::application::file_use_cases::FileUseCases;
use crate::tests::support::auth_helper::test_token_provider;
use crate::tests::support::fakes::{
    sample_user, FakePasswordHasher, InMemoryPasswordResetRepository, InMemorySessionRepository,
    InMemoryUserRepository, RecordingNotifier,
};
use crate::user::application::domain::entities::{Role, User};
use crate::user::application::ports::incoming::use_cases::CreateUserUseCase;
use crate::user::application::user_use_cases::UserUseCases;
use crate::AppState;

/// Real services over in-memory adapters, shared by a test and the app it builds.
pub struct TestBackend {
    pub users: Arc<InMemoryUserRepository>,
    pub sessions: Arc<InMemorySessionRepository>,
    pub resets: Arc<InMemoryPasswordResetRepository>,
    pub notifier: Arc<RecordingNotifier>,
    pub hasher: Arc<FakePasswordHasher>,
    pub tokens: Arc<dyn TokenProvider + Send + Sync>,
    files: TempDir,
}

impl TestBackend {
    pub const MAX_UPLOAD_BYTES: u64 = 1024;
    pub const RESET_EXPIRY_SECONDS: i64 = 900;

    pub fn new() -> Self {
        let sessions = Arc::new(InMemorySessionRepository::new());
        Self {
            users: Arc::new(InMemoryUserRepository::with_sessions(sessions.clone())),
            sessions,
            resets: Arc::new(InMemoryPasswordResetRepository::new()),
            notifier: Arc::new(RecordingNotifier::default()),
            hasher: Arc::new(FakePasswordHasher::default()),
            tokens: test_token_provider(),
            files: tempfile::tempdir().expect("temp dir for uploads"),
        }
    }

    pub fn seed_user(&self, email: &str, password: &str, roles: Vec<Role>) -> User {
        self.users.insert(sample_user(email, password, roles))
    }

    /// Signs in through the real login service; panics on failure.
    pub async fn login(&self, user: &User, password: &str) -> AuthTokens {
        let command = LoginCommand::new(
            user.email.clone(),
            password.to_string(),
            DeviceInfo::default(),
        )
        .expect("valid login command");

        self.auth_use_cases()
            .login
            .execute(command)
            .await
            .expect("login succeeds")
    }

    pub fn token_provider_data(&self) -> web::Data<Arc<dyn TokenProvider + Send + Sync>> {
        web::Data::new(self.tokens.clone())
    }

    pub fn files_root(&self) -> &Path {
        self.files.path()
    }

    pub fn auth_use_cases(&self) -> AuthUseCases {
        AuthUseCases::new(
            AuthPorts {
                users: self.users.clone(),
                sessions: self.sessions.clone(),
                resets: self.resets.clone(),
                hasher: self.hasher.clone(),
                tokens: self.tokens.clone(),
                notifier: self.notifier.clone(),
            },
            CodeGenerator::new(6, CodeAlphabet::Numeric),
            Self::RESET_EXPIRY_SECONDS,
        )
    }

    pub fn user_use_cases(&self) -> UserUseCases {
        UserUseCases::new(
            self.users.clone(),
            self.sessions.clone(),
            self.hasher.clone(),
            self.notifier.clone(),
        )
    }

    pub fn file_use_cases(&self) -> FileUseCases {
        FileUseCases::new(
            Arc::new(LocalFileStorage::new(self.files_root(), None)),
            UploadPolicy::new(
                Self::MAX_UPLOAD_BYTES,
                &["png".to_string(), "pdf".to_string(), "txt".to_string()],
            ),
        )
    }
}

impl Default for TestBackend {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TestAppStateBuilder {
    user: UserUseCases,
    auth: AuthUseCases,
    files: FileUseCases,
}

/// Empty backend; the upload directory is gone once this returns.
impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::from_backend(&TestBackend::new())
    }
}

impl TestAppStateBuilder {
    pub fn from_backend(backend: &TestBackend) -> Self {
        Self {
            user: backend.user_use_cases(),
            auth: backend.auth_use_cases(),
            files: backend.file_use_cases(),
        }
    }

    pub fn with_login(mut self, uc: impl LoginUseCase + Send + Sync + 'static) -> Self {
        self.auth.login = Arc::new(uc);
        self
    }

    pub fn with_create_user(mut self, uc: impl CreateUserUseCase + Send + Sync + 'static) -> Self {
        self.user.create = Arc::new(uc);
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            user: self.user,
            auth: self.auth,
            files: self.files,
        })
    }
}
