use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::shared::api::ApiResponse;
use crate::user::application::domain::entities::Role;
use crate::user::application::ports::incoming::use_cases::{
    UpdateUserCommand, UpdateUserCommandError, UpdateUserError, UserView,
};
use crate::AppState;
use actix_web::{put, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Omitted fields stay unchanged. An empty `phone_number` clears it.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequestDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub roles: Option<Vec<Role>>,
    pub is_active: Option<bool>,
}

/// Update a user (admin)
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserRequestDto,
    responses(
        (status = 200, description = "User updated", body = inline(SuccessResponse<UserView>)),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 403, description = "Administrator role required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[put("/api/users/{id}")]
pub async fn update_user_handler(
    _admin: AdminUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdateUserRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let user_id = path.into_inner();
    let dto = req.into_inner();

    let command = match UpdateUserCommand::new(
        dto.first_name,
        dto.last_name,
        dto.phone_number,
        dto.roles,
        dto.is_active,
    ) {
        Ok(cmd) => cmd,
        Err(UpdateUserCommandError::NothingToUpdate) => {
            return ApiResponse::bad_request("NO_CHANGES", "No fields to update")
        }
        Err(UpdateUserCommandError::Field(e)) => {
            return ApiResponse::bad_request(e.code(), &e.to_string())
        }
    };

    match data.user.update.execute(user_id, command).await {
        Ok(user) => ApiResponse::success(user),
        Err(UpdateUserError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(UpdateUserError::RepositoryError(e)) => {
            error!(error = %e, user_id = %user_id, "Failed to update user");
            ApiResponse::internal_error()
        }
    }
}
