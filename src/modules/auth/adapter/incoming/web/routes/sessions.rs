use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::auth::application::ports::incoming::use_cases::{SessionError, SessionView};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, put, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct PushTokenRequestDto {
    /// New push token; null or blank clears it
    pub push_token: Option<String>,
}

/// List my sessions
#[utoipa::path(
    get,
    path = "/api/auth/sessions",
    tag = "auth",
    responses(
        (status = 200, description = "Live sessions of the caller", body = inline(SuccessResponse<Vec<SessionView>>)),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[get("/api/auth/sessions")]
pub async fn list_sessions_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.auth.list_sessions.execute(user.user_id).await {
        Ok(sessions) => ApiResponse::success(sessions),
        Err(e) => {
            error!(error = %e, user_id = %user.user_id, "Failed to list sessions");
            ApiResponse::internal_error()
        }
    }
}

/// Update push token
///
/// Sets the push token of the session the access token belongs to.
#[utoipa::path(
    put,
    path = "/api/auth/sessions/push-token",
    tag = "auth",
    request_body = PushTokenRequestDto,
    responses(
        (status = 204, description = "Push token updated"),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 404, description = "Session was revoked", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[put("/api/auth/sessions/push-token")]
pub async fn update_push_token_handler(
    user: AuthenticatedUser,
    req: web::Json<PushTokenRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .auth
        .update_push_token
        .execute(user.session_id, req.into_inner().push_token)
        .await
    {
        Ok(()) => ApiResponse::no_content(),
        Err(SessionError::SessionNotFound) => {
            ApiResponse::not_found("SESSION_NOT_FOUND", "Session not found")
        }
        Err(SessionError::RepositoryError(e)) => {
            error!(error = %e, "Failed to update push token");
            ApiResponse::internal_error()
        }
    }
}
