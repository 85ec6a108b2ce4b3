pub mod password_hasher;
pub mod password_reset_repository;
pub mod session_repository;
pub mod token_provider;

pub use password_hasher::{HashError, PasswordHasher};
pub use password_reset_repository::{
    NewPasswordReset, PasswordReset, PasswordResetRepository, PasswordResetRepositoryError,
};
pub use session_repository::{NewSession, SessionRepository, SessionRepositoryError};
pub use token_provider::{TokenClaims, TokenError, TokenProvider, TokenSubject, TokenType};
