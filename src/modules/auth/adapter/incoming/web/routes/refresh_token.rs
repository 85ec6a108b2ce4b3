use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::ports::incoming::use_cases::{AuthTokens, RefreshTokenError};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, warn};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct RefreshTokenRequestDto {
    pub refresh_token: String,
}

/// Refresh tokens
///
/// Exchanges a refresh token for a new pair. The presented refresh token is
/// retired; presenting it again revokes the whole session.
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = "auth",
    request_body = RefreshTokenRequestDto,
    responses(
        (status = 200, description = "New token pair", body = inline(SuccessResponse<AuthTokens>)),
        (status = 401, description = "Invalid, expired, reused or revoked token", body = ErrorResponse),
        (status = 403, description = "Account is inactive", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/refresh")]
pub async fn refresh_token_handler(
    req: web::Json<RefreshTokenRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.auth.refresh.execute(&req.refresh_token).await {
        Ok(tokens) => ApiResponse::success(tokens),

        Err(RefreshTokenError::InvalidToken) => {
            ApiResponse::unauthorized("INVALID_TOKEN", "Invalid refresh token")
        }
        Err(RefreshTokenError::TokenExpired) => {
            ApiResponse::unauthorized("TOKEN_EXPIRED", "Refresh token has expired")
        }
        Err(RefreshTokenError::SessionRevoked) => {
            ApiResponse::unauthorized("SESSION_REVOKED", "Session has been revoked")
        }
        Err(RefreshTokenError::TokenReused) => {
            warn!("Refresh token reuse detected");
            ApiResponse::unauthorized("TOKEN_REUSED", "Refresh token was already used")
        }
        Err(RefreshTokenError::UserInactive) => {
            ApiResponse::forbidden("USER_INACTIVE", "This account has been deactivated")
        }
        Err(RefreshTokenError::TokenGenerationFailed(ref e)) => {
            error!(error = %e, "Token generation failed");
            ApiResponse::internal_error()
        }
        Err(RefreshTokenError::RepositoryError(ref e)) => {
            error!(error = %e, "Database error during refresh");
            ApiResponse::internal_error()
        }
    }
}
