use crate::api::schemas::{ErrorDetail, ErrorResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::auth::adapter::incoming::web::routes::{
    LoginRequestDto, LogoutAllResponse, PasswordResetConfirmDto, PasswordResetRequestDto,
    PushTokenRequestDto, RefreshTokenRequestDto,
};
use crate::auth::application::ports::incoming::use_cases::{
    AuthTokens, PasswordResetChallenge, SessionView,
};
use crate::storage::application::ports::outgoing::StoredFile;
use crate::user::adapter::incoming::web::routes::{
    ChangePasswordRequestDto, CreateUserRequestDto, UpdateUserRequestDto,
};
use crate::user::application::domain::entities::Role;
use crate::user::application::ports::incoming::use_cases::UserView;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Admin Backend API",
        version = "1.0.0",
        description = "User, session and file administration"
    ),
    paths(
        // Auth
        crate::auth::adapter::incoming::web::routes::login_handler,
        crate::auth::adapter::incoming::web::routes::refresh_token_handler,
        crate::auth::adapter::incoming::web::routes::logout_handler,
        crate::auth::adapter::incoming::web::routes::logout_all_handler,
        crate::auth::adapter::incoming::web::routes::list_sessions_handler,
        crate::auth::adapter::incoming::web::routes::update_push_token_handler,
        crate::auth::adapter::incoming::web::routes::request_password_reset_handler,
        crate::auth::adapter::incoming::web::routes::confirm_password_reset_handler,

        // Users
        crate::user::adapter::incoming::web::routes::create_user_handler,
        crate::user::adapter::incoming::web::routes::get_users_handler,
        crate::user::adapter::incoming::web::routes::get_me_handler,
        crate::user::adapter::incoming::web::routes::get_user_handler,
        crate::user::adapter::incoming::web::routes::update_user_handler,
        crate::user::adapter::incoming::web::routes::change_password_handler,
        crate::user::adapter::incoming::web::routes::soft_delete_user_handler,
        crate::user::adapter::incoming::web::routes::restore_user_handler,
        crate::user::adapter::incoming::web::routes::hard_delete_user_handler,

        // Files
        crate::storage::adapter::incoming::web::routes::upload_file_handler,
        crate::storage::adapter::incoming::web::routes::get_file_handler,
        crate::storage::adapter::incoming::web::routes::delete_file_handler,
    ),
    components(
        schemas(
            ErrorResponse,
            ErrorDetail,
            Role,
            UserView,
            CreateUserRequestDto,
            UpdateUserRequestDto,
            ChangePasswordRequestDto,
            LoginRequestDto,
            AuthTokens,
            RefreshTokenRequestDto,
            LogoutAllResponse,
            SessionView,
            PushTokenRequestDto,
            PasswordResetRequestDto,
            PasswordResetConfirmDto,
            PasswordResetChallenge,
            StoredFile
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Sign-in, sessions and password reset"),
        (name = "users", description = "User management endpoints"),
        (name = "files", description = "File storage endpoints"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            )
        }
    }
}
