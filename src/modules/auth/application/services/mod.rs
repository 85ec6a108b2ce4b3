pub mod access_service;
pub mod code_generator;
pub mod login_service;
pub mod password_reset_service;
pub mod refresh_token_service;
pub mod session_service;
pub mod token_hasher;
mod token_pair;

pub use access_service::AccessService;
pub use code_generator::CodeGenerator;
pub use login_service::LoginService;
pub use password_reset_service::PasswordResetService;
pub use refresh_token_service::RefreshTokenService;
pub use session_service::SessionService;
pub use token_hasher::hash_token;
