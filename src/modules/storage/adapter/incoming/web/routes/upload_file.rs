use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::storage::application::domain::UploadPolicyError;
use crate::storage::application::ports::incoming::use_cases::{UploadFileCommand, UploadFileError};
use crate::storage::application::ports::outgoing::StoredFile;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct UploadQuery {
    /// Target folder, a single path segment
    pub folder: String,
    /// Original file name; only its extension is kept
    pub file_name: String,
}

/// Upload a file
///
/// The request body is the raw file content.
#[utoipa::path(
    post,
    path = "/api/files",
    tag = "files",
    params(UploadQuery),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 201, description = "File stored", body = inline(SuccessResponse<StoredFile>)),
        (status = 400, description = "Rejected by upload policy", body = ErrorResponse),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
#[post("/api/files")]
pub async fn upload_file_handler(
    user: AuthenticatedUser,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
    data: web::Data<AppState>,
) -> impl Responder {
    let query = query.into_inner();
    let command = UploadFileCommand::new(query.folder, query.file_name, body.to_vec(), user.user_id);

    match data.files.upload.execute(command).await {
        Ok(stored) => ApiResponse::created(stored),
        Err(UploadFileError::Rejected(reason)) => match reason {
            UploadPolicyError::FileTooLarge { .. } => {
                ApiResponse::payload_too_large("FILE_TOO_LARGE", &reason.to_string())
            }
            UploadPolicyError::EmptyFile => {
                ApiResponse::bad_request("EMPTY_FILE", &reason.to_string())
            }
            UploadPolicyError::InvalidFileName => {
                ApiResponse::bad_request("INVALID_FILE_NAME", &reason.to_string())
            }
            UploadPolicyError::ExtensionNotAllowed(_) => {
                ApiResponse::bad_request("FILE_TYPE_NOT_ALLOWED", &reason.to_string())
            }
        },
        Err(UploadFileError::InvalidFolder) => {
            ApiResponse::bad_request("INVALID_FOLDER", "Invalid folder name")
        }
        Err(UploadFileError::StorageError(e)) => {
            error!(error = %e, "Failed to store upload");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::app_state_builder::{TestAppStateBuilder, TestBackend};
    use crate::tests::support::auth_helper::bearer;
    use crate::user::application::domain::entities::Role;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_upload_success() {
        let backend = TestBackend::new();
        let user = backend.seed_user("ada@example.com", "Password1", vec![Role::User]);
        let tokens = backend.login(&user, "Password1").await;

        let app = test::init_service(
            App::new()
                .app_data(TestAppStateBuilder::from_backend(&backend).build())
                .app_data(backend.token_provider_data())
                .service(upload_file_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/files?folder=docs&file_name=report.pdf")
            .insert_header(bearer(&tokens.access_token))
            .set_payload("%PDF-1.7")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let body: serde_json::Value = test::read_body_json(resp).await;
        let path = body["data"]["path"].as_str().unwrap();
        assert!(path.starts_with("docs/") && path.ends_with(".pdf"));
        assert!(backend.files_root().join(path).exists());
    }

    #[actix_web::test]
    async fn test_upload_disallowed_extension() {
        let backend = TestBackend::new();
        let user = backend.seed_user("ada@example.com", "Password1", vec![Role::User]);
        let tokens = backend.login(&user, "Password1").await;

        let app = test::init_service(
            App::new()
                .app_data(TestAppStateBuilder::from_backend(&backend).build())
                .app_data(backend.token_provider_data())
                .service(upload_file_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/files?folder=docs&file_name=run.sh")
            .insert_header(bearer(&tokens.access_token))
            .set_payload("echo hi")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "FILE_TYPE_NOT_ALLOWED");
    }

    #[actix_web::test]
    async fn test_upload_too_large() {
        let backend = TestBackend::new();
        let user = backend.seed_user("ada@example.com", "Password1", vec![Role::User]);
        let tokens = backend.login(&user, "Password1").await;

        let app = test::init_service(
            App::new()
                .app_data(TestAppStateBuilder::from_backend(&backend).build())
                .app_data(backend.token_provider_data())
                .service(upload_file_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/files?folder=docs&file_name=big.png")
            .insert_header(bearer(&tokens.access_token))
            .set_payload(vec![0u8; TestBackend::MAX_UPLOAD_BYTES as usize + 1])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 413);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "FILE_TOO_LARGE");
    }

    #[actix_web::test]
    async fn test_upload_requires_token() {
        let backend = TestBackend::new();
        let app = test::init_service(
            App::new()
                .app_data(TestAppStateBuilder::from_backend(&backend).build())
                .app_data(backend.token_provider_data())
                .service(upload_file_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/files?folder=docs&file_name=a.png")
            .set_payload("x")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 401);
    }
}
