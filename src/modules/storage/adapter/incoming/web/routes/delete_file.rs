use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::shared::api::ApiResponse;
use crate::storage::application::ports::incoming::use_cases::DeleteFileError;
use crate::AppState;
use actix_web::{delete, web, Responder};
use tracing::{error, info};

/// Delete a file (admin)
#[utoipa::path(
    delete,
    path = "/api/files/{folder}/{name}",
    tag = "files",
    params(
        ("folder" = String, Path, description = "Storage folder"),
        ("name" = String, Path, description = "Stored file name"),
    ),
    responses(
        (status = 204, description = "File deleted"),
        (status = 400, description = "Invalid path", body = ErrorResponse),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 403, description = "Administrator role required", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[delete("/api/files/{folder}/{name}")]
pub async fn delete_file_handler(
    admin: AdminUser,
    path: web::Path<(String, String)>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (folder, name) = path.into_inner();

    match data.files.delete.execute(&folder, &name).await {
        Ok(()) => {
            info!(admin_id = %admin.user_id(), folder = %folder, name = %name, "File removed");
            ApiResponse::no_content()
        }
        Err(DeleteFileError::NotFound) => {
            ApiResponse::not_found("FILE_NOT_FOUND", "File not found")
        }
        Err(DeleteFileError::InvalidPath) => {
            ApiResponse::bad_request("INVALID_PATH", "Invalid file path")
        }
        Err(DeleteFileError::StorageError(e)) => {
            error!(error = %e, "Failed to delete file");
            ApiResponse::internal_error()
        }
    }
}
