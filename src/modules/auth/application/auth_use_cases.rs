use std::sync::Arc;

use crate::auth::application::ports::incoming::use_cases::{
    AuthorizeAccessUseCase, ConfirmPasswordResetUseCase, ListSessionsUseCase, LoginUseCase,
    LogoutAllUseCase, LogoutUseCase, RefreshTokenUseCase, RequestPasswordResetUseCase,
    UpdatePushTokenUseCase,
};
use crate::auth::application::ports::outgoing::{
    PasswordHasher, PasswordResetRepository, SessionRepository, TokenProvider,
};
use crate::auth::application::services::{
    AccessService, CodeGenerator, LoginService, PasswordResetService, RefreshTokenService,
    SessionService,
};
use crate::email::application::ports::outgoing::UserEmailNotifier;
use crate::user::application::ports::outgoing::UserRepository;

#[derive(Clone)]
pub struct AuthUseCases {
    pub authorize: Arc<dyn AuthorizeAccessUseCase + Send + Sync>,
    pub login: Arc<dyn LoginUseCase + Send + Sync>,
    pub refresh: Arc<dyn RefreshTokenUseCase + Send + Sync>,
    pub logout: Arc<dyn LogoutUseCase + Send + Sync>,
    pub logout_all: Arc<dyn LogoutAllUseCase + Send + Sync>,
    pub list_sessions: Arc<dyn ListSessionsUseCase + Send + Sync>,
    pub update_push_token: Arc<dyn UpdatePushTokenUseCase + Send + Sync>,
    pub request_password_reset: Arc<dyn RequestPasswordResetUseCase + Send + Sync>,
    pub confirm_password_reset: Arc<dyn ConfirmPasswordResetUseCase + Send + Sync>,
}

/// Outgoing adapters the auth services are built from.
#[derive(Clone)]
pub struct AuthPorts {
    pub users: Arc<dyn UserRepository + Send + Sync>,
    pub sessions: Arc<dyn SessionRepository + Send + Sync>,
    pub resets: Arc<dyn PasswordResetRepository + Send + Sync>,
    pub hasher: Arc<dyn PasswordHasher + Send + Sync>,
    pub tokens: Arc<dyn TokenProvider + Send + Sync>,
    pub notifier: Arc<dyn UserEmailNotifier + Send + Sync>,
}

impl AuthUseCases {
    pub fn new(ports: AuthPorts, codes: CodeGenerator, reset_expiry_seconds: i64) -> Self {
        let sessions = Arc::new(SessionService::new(ports.sessions.clone()));
        let password_reset = Arc::new(PasswordResetService::new(
            ports.clone(),
            codes,
            reset_expiry_seconds,
        ));

        Self {
            authorize: Arc::new(AccessService::new(
                ports.users.clone(),
                ports.sessions.clone(),
            )),
            login: Arc::new(LoginService::new(
                ports.users.clone(),
                ports.sessions.clone(),
                ports.hasher,
                ports.tokens.clone(),
            )),
            refresh: Arc::new(RefreshTokenService::new(
                ports.users,
                ports.sessions,
                ports.tokens,
            )),
            logout: sessions.clone(),
            logout_all: sessions.clone(),
            list_sessions: sessions.clone(),
            update_push_token: sessions,
            request_password_reset: password_reset.clone(),
            confirm_password_reset: password_reset,
        }
    }
}
