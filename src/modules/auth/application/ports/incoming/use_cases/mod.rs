mod authorize_access;
mod login;
mod password_reset;
mod refresh_token;
mod sessions;

pub use authorize_access::{AccessGrant, AuthorizeAccessError, AuthorizeAccessUseCase};
pub use login::{AuthTokens, LoginCommand, LoginCommandError, LoginError, LoginUseCase};
pub use password_reset::{
    ConfirmPasswordResetCommand, ConfirmPasswordResetError, ConfirmPasswordResetUseCase,
    PasswordResetChallenge, RequestPasswordResetCommand, RequestPasswordResetError,
    RequestPasswordResetUseCase,
};
pub use refresh_token::{RefreshTokenError, RefreshTokenUseCase};
pub use sessions::{
    ListSessionsUseCase, LogoutAllUseCase, LogoutUseCase, SessionError, SessionView,
    UpdatePushTokenUseCase,
};
