use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::shared::api::ApiResponse;
use crate::user::application::domain::entities::Role;
use crate::user::application::ports::incoming::use_cases::{
    CreateUserCommand, CreateUserError, CreateUserInput, UserView,
};
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequestDto {
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "+6281234567890")]
    pub phone_number: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "Analytical1")]
    pub password: String,
    /// Defaults to `["user"]`
    pub roles: Option<Vec<Role>>,
    /// Defaults to `true`
    pub is_active: Option<bool>,
}

impl From<CreateUserRequestDto> for CreateUserInput {
    fn from(dto: CreateUserRequestDto) -> Self {
        Self {
            first_name: dto.first_name,
            last_name: dto.last_name,
            phone_number: dto.phone_number,
            email: dto.email,
            password: dto.password,
            roles: dto.roles,
            is_active: dto.is_active,
        }
    }
}

/// Create a user (admin)
///
/// Sends a welcome email to the new account.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = CreateUserRequestDto,
    responses(
        (status = 201, description = "User created", body = inline(SuccessResponse<UserView>)),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 403, description = "Administrator role required", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[post("/api/users")]
pub async fn create_user_handler(
    admin: AdminUser,
    req: web::Json<CreateUserRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let command = match CreateUserCommand::new(req.into_inner().into(), Some(admin.user_id())) {
        Ok(cmd) => cmd,
        Err(e) => return ApiResponse::bad_request(e.code(), &e.to_string()),
    };

    match data.user.create.execute(command).await {
        Ok(user) => ApiResponse::created(user),
        Err(CreateUserError::EmailAlreadyExists) => {
            ApiResponse::conflict("EMAIL_ALREADY_EXISTS", "Email already in use")
        }
        Err(e) => {
            error!(error = %e, "Failed to create user");
            ApiResponse::internal_error()
        }
    }
}
