use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::storage::application::ports::incoming::use_cases::ReadFileError;
use crate::AppState;
use actix_web::{get, web, HttpResponse, Responder};
use std::path::Path;
use tracing::error;

fn content_type_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// Download a file
#[utoipa::path(
    get,
    path = "/api/files/{folder}/{name}",
    tag = "files",
    params(
        ("folder" = String, Path, description = "Storage folder"),
        ("name" = String, Path, description = "Stored file name"),
    ),
    responses(
        (status = 200, description = "File content", body = Vec<u8>, content_type = "application/octet-stream"),
        (status = 400, description = "Invalid path", body = ErrorResponse),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[get("/api/files/{folder}/{name}")]
pub async fn get_file_handler(
    _user: AuthenticatedUser,
    path: web::Path<(String, String)>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (folder, name) = path.into_inner();

    match data.files.read.execute(&folder, &name).await {
        Ok(bytes) => HttpResponse::Ok()
            .content_type(content_type_for(&name))
            .body(bytes),
        Err(ReadFileError::NotFound) => ApiResponse::not_found("FILE_NOT_FOUND", "File not found"),
        Err(ReadFileError::InvalidPath) => {
            ApiResponse::bad_request("INVALID_PATH", "Invalid file path")
        }
        Err(ReadFileError::StorageError(e)) => {
            error!(error = %e, folder = %folder, name = %name, "Failed to read file");
            ApiResponse::internal_error()
        }
    }
}
