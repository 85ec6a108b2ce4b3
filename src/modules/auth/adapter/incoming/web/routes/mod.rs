mod login;
mod logout;
mod password_reset;
mod refresh_token;
mod sessions;

// `__path_*` items are generated by `#[utoipa::path]` and read by `ApiDoc`.
pub use login::{__path_login_handler, LoginRequestDto, login_handler};
pub use logout::{
    __path_logout_all_handler, __path_logout_handler, LogoutAllResponse, logout_all_handler,
    logout_handler,
};
pub use password_reset::{
    __path_confirm_password_reset_handler, __path_request_password_reset_handler,
    PasswordResetConfirmDto, PasswordResetRequestDto, confirm_password_reset_handler,
    request_password_reset_handler,
};
pub use refresh_token::{
    __path_refresh_token_handler, RefreshTokenRequestDto, refresh_token_handler,
};
pub use sessions::{
    __path_list_sessions_handler, __path_update_push_token_handler, PushTokenRequestDto,
    list_sessions_handler, update_push_token_handler,
};
