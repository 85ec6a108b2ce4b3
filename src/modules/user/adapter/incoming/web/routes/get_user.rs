use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::{AdminUser, AuthenticatedUser};
use crate::shared::api::ApiResponse;
use crate::user::application::ports::incoming::use_cases::{GetUserError, UserView};
use crate::AppState;
use actix_web::{get, web, HttpResponse, Responder};
use tracing::error;
use uuid::Uuid;

async fn respond(data: &AppState, user_id: Uuid) -> HttpResponse {
    match data.user.get.execute(user_id).await {
        Ok(user) => ApiResponse::success(user),
        Err(GetUserError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(GetUserError::RepositoryError(e)) => {
            error!(error = %e, user_id = %user_id, "Failed to fetch user");
            ApiResponse::internal_error()
        }
    }
}

/// Current user profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "users",
    responses(
        (status = 200, description = "Caller's profile", body = inline(SuccessResponse<UserView>)),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[get("/api/users/me")]
pub async fn get_me_handler(user: AuthenticatedUser, data: web::Data<AppState>) -> impl Responder {
    respond(&data, user.user_id).await
}

/// Get a user by id (admin)
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = inline(SuccessResponse<UserView>)),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 403, description = "Administrator role required", body = ErrorResponse),
        (status = 404, description = "User not found or deleted", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[get("/api/users/{id}")]
pub async fn get_user_handler(
    _admin: AdminUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    respond(&data, path.into_inner()).await
}
