use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::auth::application::ports::incoming::use_cases::SessionError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct LogoutAllResponse {
    /// Number of sessions revoked
    #[schema(example = 3)]
    pub revoked: u64,
}

fn map_session_error(err: SessionError) -> actix_web::HttpResponse {
    match err {
        SessionError::SessionNotFound => {
            ApiResponse::not_found("SESSION_NOT_FOUND", "Session not found")
        }
        SessionError::RepositoryError(e) => {
            error!(error = %e, "Session store error");
            ApiResponse::internal_error()
        }
    }
}

/// Log out
///
/// Revokes the session the access token belongs to.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 204, description = "Session revoked"),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[post("/api/auth/logout")]
pub async fn logout_handler(user: AuthenticatedUser, data: web::Data<AppState>) -> impl Responder {
    match data.auth.logout.execute(user.session_id).await {
        Ok(()) => ApiResponse::no_content(),
        Err(e) => map_session_error(e),
    }
}

/// Log out everywhere
///
/// Revokes every live session of the caller, including the current one.
#[utoipa::path(
    post,
    path = "/api/auth/logout-all",
    tag = "auth",
    responses(
        (status = 200, description = "Sessions revoked", body = inline(SuccessResponse<LogoutAllResponse>)),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[post("/api/auth/logout-all")]
pub async fn logout_all_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.auth.logout_all.execute(user.user_id).await {
        Ok(revoked) => ApiResponse::success(LogoutAllResponse { revoked }),
        Err(e) => map_session_error(e),
    }
}
