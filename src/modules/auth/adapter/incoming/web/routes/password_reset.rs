use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::ports::incoming::use_cases::{
    ConfirmPasswordResetCommand, ConfirmPasswordResetError, PasswordResetChallenge,
    RequestPasswordResetCommand, RequestPasswordResetError,
};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct PasswordResetRequestDto {
    #[schema(example = "ada@example.com")]
    pub email: String,
}

#[derive(Deserialize, ToSchema)]
pub struct PasswordResetConfirmDto {
    /// Token returned by the request step
    pub reset_token: String,
    /// Code received by email
    #[schema(example = "482913")]
    pub code: String,
    #[schema(example = "NewSecurePass1")]
    pub new_password: String,
}

/// Request a password reset code
///
/// Emails a one-time code to the account and returns the reset token the
/// code must be confirmed with. The response is the same for unknown emails.
#[utoipa::path(
    post,
    path = "/api/auth/password-reset",
    tag = "auth",
    request_body = PasswordResetRequestDto,
    responses(
        (status = 200, description = "Reset token issued", body = inline(SuccessResponse<PasswordResetChallenge>)),
        (status = 400, description = "Malformed email", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/password-reset")]
pub async fn request_password_reset_handler(
    req: web::Json<PasswordResetRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let command = match RequestPasswordResetCommand::new(&req.email) {
        Ok(cmd) => cmd,
        Err(e) => return ApiResponse::bad_request(e.code(), &e.to_string()),
    };

    match data.auth.request_password_reset.execute(command).await {
        Ok(challenge) => ApiResponse::success(challenge),
        Err(RequestPasswordResetError::HashingFailed) => {
            error!("Code hashing failed during reset request");
            ApiResponse::internal_error()
        }
        Err(RequestPasswordResetError::TokenGenerationFailed(e))
        | Err(RequestPasswordResetError::RepositoryError(e)) => {
            error!(error = %e, "Password reset request failed");
            ApiResponse::internal_error()
        }
    }
}

/// Confirm a password reset
///
/// Sets a new password when the code matches the reset token, then revokes
/// every session of the account.
#[utoipa::path(
    post,
    path = "/api/auth/password-reset/confirm",
    tag = "auth",
    request_body = PasswordResetConfirmDto,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Wrong code, bad token or weak password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/password-reset/confirm")]
pub async fn confirm_password_reset_handler(
    req: web::Json<PasswordResetConfirmDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let command =
        match ConfirmPasswordResetCommand::new(dto.reset_token, dto.code, dto.new_password) {
            Ok(cmd) => cmd,
            Err(e) => return ApiResponse::bad_request("WEAK_PASSWORD", &e.to_string()),
        };

    match data.auth.confirm_password_reset.execute(command).await {
        Ok(()) => ApiResponse::no_content(),
        Err(ConfirmPasswordResetError::InvalidResetToken) => {
            ApiResponse::bad_request("INVALID_RESET_TOKEN", "Invalid or expired reset token")
        }
        Err(ConfirmPasswordResetError::InvalidCode) => {
            ApiResponse::bad_request("INVALID_RESET_CODE", "Invalid or expired reset code")
        }
        Err(ConfirmPasswordResetError::HashingFailed) => {
            error!("Password hashing failed during reset");
            ApiResponse::internal_error()
        }
        Err(ConfirmPasswordResetError::RepositoryError(e)) => {
            error!(error = %e, "Password reset confirm failed");
            ApiResponse::internal_error()
        }
    }
}
