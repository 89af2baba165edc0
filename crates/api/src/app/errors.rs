use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockroom_core::DomainError;

/// Message returned for failures whose detail must not reach callers.
pub const UNEXPECTED_ERROR: &str = "an unexpected error occurred";

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, msg),
        DomainError::Duplicate(msg) | DomainError::Validation(msg) => {
            json_error(StatusCode::CONFLICT, msg)
        }
        DomainError::Communication(msg) => json_error(StatusCode::INTERNAL_SERVER_ERROR, msg),
        DomainError::Storage(detail) | DomainError::Internal(detail) => {
            tracing::error!(error = %detail, "unclassified failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED_ERROR)
        }
    }
}

/// Malformed request bodies.
pub fn rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, rejection.body_text())
}

/// Missing or malformed query parameters.
pub fn query_rejection_to_response(rejection: QueryRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, rejection.body_text())
}

/// `{"error": message}` with the given status.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (status, axum::Json(json!({ "error": message.into() }))).into_response()
}
