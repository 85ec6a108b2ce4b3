use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::domain::entities::DeviceInfo;
use crate::auth::application::ports::incoming::use_cases::{AuthTokens, LoginCommand, LoginError};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{http::header, post, web, HttpRequest, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

/// Login request from client
#[derive(Deserialize, ToSchema)]
pub struct LoginRequestDto {
    #[schema(example = "admin@example.com")]
    pub email: String,

    #[schema(example = "SecurePass123")]
    pub password: String,

    /// Client application version, stored on the session
    #[schema(example = "2.3.0")]
    pub app_version: Option<String>,

    /// Device push token, stored on the session
    pub push_token: Option<String>,
}

/// Log in
///
/// Verifies email and password, opens a session for this device and returns
/// an access/refresh token pair.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = inline(SuccessResponse<AuthTokens>)),
        (status = 400, description = "Malformed email or empty password", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 403, description = "Account is inactive", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/login")]
pub async fn login_handler(
    http_req: HttpRequest,
    req: web::Json<LoginRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let user_agent = http_req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.chars().take(512).collect::<String>());

    let device = DeviceInfo {
        app_version: dto.app_version,
        user_agent,
        push_token: dto.push_token,
    };

    let command = match LoginCommand::new(dto.email, dto.password, device) {
        Ok(cmd) => cmd,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    info!(email = %command.email(), "Login attempt");

    match data.auth.login.execute(command).await {
        Ok(tokens) => ApiResponse::success(tokens),

        Err(LoginError::InvalidCredentials) => {
            warn!("Login failed: Invalid credentials");
            ApiResponse::unauthorized("INVALID_CREDENTIALS", "Invalid email or password")
        }

        Err(LoginError::UserInactive) => {
            ApiResponse::forbidden("USER_INACTIVE", "This account has been deactivated")
        }

        Err(LoginError::PasswordVerificationFailed) => {
            error!("Password verification failed");
            ApiResponse::internal_error()
        }

        Err(LoginError::TokenGenerationFailed(ref e)) => {
            error!(error = %e, "Token generation failed");
            ApiResponse::internal_error()
        }

        Err(LoginError::RepositoryError(ref e)) => {
            error!(error = %e, "Database error during login");
            ApiResponse::internal_error()
        }
    }
}
