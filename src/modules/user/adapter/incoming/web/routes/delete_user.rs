use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::shared::api::ApiResponse;
use crate::user::application::ports::incoming::use_cases::{
    HardDeleteUserError, RestoreUserError, SoftDeleteUserError, UserView,
};
use crate::AppState;
use actix_web::{delete, post, web, Responder};
use tracing::error;
use uuid::Uuid;

/// Soft-delete a user (admin)
///
/// Also revokes every session the user holds.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 204, description = "User soft-deleted"),
        (status = 400, description = "Attempt to delete own account", body = ErrorResponse),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 403, description = "Administrator role required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[delete("/api/users/{id}")]
pub async fn soft_delete_user_handler(
    admin: AdminUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let user_id = path.into_inner();

    match data.user.soft_delete.execute(admin.user_id(), user_id).await {
        Ok(()) => ApiResponse::no_content(),
        Err(SoftDeleteUserError::CannotDeleteSelf) => {
            ApiResponse::bad_request("CANNOT_DELETE_SELF", "You cannot delete your own account")
        }
        Err(SoftDeleteUserError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(SoftDeleteUserError::RepositoryError(e)) => {
            error!(error = %e, user_id = %user_id, "Failed to soft delete user");
            ApiResponse::internal_error()
        }
    }
}

/// Restore a soft-deleted user (admin)
#[utoipa::path(
    post,
    path = "/api/users/{id}/restore",
    tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User restored", body = inline(SuccessResponse<UserView>)),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 403, description = "Administrator role required", body = ErrorResponse),
        (status = 404, description = "No deleted user with this id", body = ErrorResponse),
        (status = 409, description = "Email taken by a live account", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[post("/api/users/{id}/restore")]
pub async fn restore_user_handler(
    _admin: AdminUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let user_id = path.into_inner();

    match data.user.restore.execute(user_id).await {
        Ok(user) => ApiResponse::success(user),
        Err(RestoreUserError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "Deleted user not found")
        }
        Err(RestoreUserError::EmailAlreadyExists) => ApiResponse::conflict(
            "EMAIL_ALREADY_EXISTS",
            "Email already used by another account",
        ),
        Err(RestoreUserError::RepositoryError(e)) => {
            error!(error = %e, user_id = %user_id, "Failed to restore user");
            ApiResponse::internal_error()
        }
    }
}

/// Permanently delete a user (admin)
///
/// The user's sessions are removed with it.
#[utoipa::path(
    delete,
    path = "/api/users/{id}/permanent",
    tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 204, description = "User removed"),
        (status = 400, description = "Attempt to delete own account", body = ErrorResponse),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 403, description = "Administrator role required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[delete("/api/users/{id}/permanent")]
pub async fn hard_delete_user_handler(
    admin: AdminUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let user_id = path.into_inner();

    match data.user.hard_delete.execute(admin.user_id(), user_id).await {
        Ok(()) => ApiResponse::no_content(),
        Err(HardDeleteUserError::CannotDeleteSelf) => {
            ApiResponse::bad_request("CANNOT_DELETE_SELF", "You cannot delete your own account")
        }
        Err(HardDeleteUserError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(HardDeleteUserError::RepositoryError(e)) => {
            error!(error = %e, user_id = %user_id, "Failed to hard delete user");
            ApiResponse::internal_error()
        }
    }
}
