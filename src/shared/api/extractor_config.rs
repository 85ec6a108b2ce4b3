use crate::shared::api::ApiResponse;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::web::{JsonConfig, QueryConfig};

/// Malformed JSON bodies answer with the standard error envelope.
pub fn custom_json_config() -> JsonConfig {
    JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        let response = match err {
            JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                ApiResponse::payload_too_large("PAYLOAD_TOO_LARGE", &message)
            }
            _ => ApiResponse::bad_request("VALIDATION_ERROR", &message),
        };
        InternalError::from_response(err, response).into()
    })
}

/// Bad query strings (`?page=abc`) get the same treatment as bad bodies.
pub fn custom_query_config() -> QueryConfig {
    QueryConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        InternalError::from_response(err, ApiResponse::bad_request("VALIDATION_ERROR", &message))
            .into()
    })
}
