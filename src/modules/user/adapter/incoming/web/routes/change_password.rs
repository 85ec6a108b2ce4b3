use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::user::application::ports::incoming::use_cases::{
    ChangePasswordCommand, ChangePasswordError,
};
use crate::AppState;
use actix_web::{put, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct ChangePasswordRequestDto {
    pub current_password: String,
    #[schema(example = "NewSecret123")]
    pub new_password: String,
}

/// Change my password
#[utoipa::path(
    put,
    path = "/api/users/me/password",
    tag = "users",
    request_body = ChangePasswordRequestDto,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Weak new password or wrong current password", body = ErrorResponse),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[put("/api/users/me/password")]
pub async fn change_password_handler(
    user: AuthenticatedUser,
    req: web::Json<ChangePasswordRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();
    let command = match ChangePasswordCommand::new(dto.current_password, dto.new_password) {
        Ok(cmd) => cmd,
        Err(e) => return ApiResponse::bad_request("WEAK_PASSWORD", &e.to_string()),
    };

    match data.user.change_password.execute(user.user_id, command).await {
        Ok(()) => ApiResponse::no_content(),
        Err(ChangePasswordError::InvalidCurrentPassword) => ApiResponse::bad_request(
            "INVALID_CURRENT_PASSWORD",
            "Current password is incorrect",
        ),
        Err(ChangePasswordError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(e) => {
            error!(error = %e, user_id = %user.user_id, "Failed to change password");
            ApiResponse::internal_error()
        }
    }
}
