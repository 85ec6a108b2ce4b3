//! Envelope shapes produced by `ApiResponse`, for the generated docs only.
use serde::Serialize;
use utoipa::ToSchema;

/// `{ "success": true, "data": ... }`
#[derive(Serialize, ToSchema)]
#[serde(bound = "T: Serialize")]
pub struct SuccessResponse<T> {
    #[schema(example = true)]
    pub success: bool,
    pub data: T,
}

/// `{ "success": false, "error": { "code", "message" } }`
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Stable, upper snake case, e.g. `USER_NOT_FOUND`
    #[schema(example = "EMAIL_ALREADY_EXISTS")]
    pub code: String,

    #[schema(example = "A user with this email already exists")]
    pub message: String,
}
