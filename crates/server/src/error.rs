// crates/server/src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use branchlog_core::ValidationError;
use branchlog_db::DbError;

/// Structured JSON error response for API errors
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// API error types that map to HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Log record not found: {0}")]
    LogNotFound(i64),

    #[error("Branch not found: {0}")]
    BranchNotFound(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Import file rejected: {0}")]
    InvalidImport(String),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            ApiError::LogNotFound(id) => {
                tracing::warn!(log_id = id, "Log record not found");
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::with_details("Log record not found", format!("Log id: {}", id)),
                )
            }
            ApiError::BranchNotFound(code) => {
                tracing::warn!(branch_code = %code, "Branch not found");
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::with_details("Branch not found", format!("Branch code: {}", code)),
                )
            }
            // The user-facing message the form shows while it stays open;
            // the store is untouched.
            ApiError::Validation(rule) => {
                tracing::warn!(rule = %rule, "Log form validation failed");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse::new(rule.to_string()),
                )
            }
            ApiError::InvalidImport(msg) => {
                tracing::warn!(message = %msg, "Import file rejected");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse::with_details("Import file rejected", msg.clone()),
                )
            }
            ApiError::Database(db_err) => {
                tracing::error!(error = %db_err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_details("Database error", db_err.to_string()),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!(message = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal server error"),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    /// Helper to extract status code and body from a response
    async fn extract_response(response: Response) -> (StatusCode, ErrorResponse) {
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let error_response: ErrorResponse = serde_json::from_slice(&body).unwrap();
        (status, error_response)
    }

    #[tokio::test]
    async fn log_not_found_returns_404() {
        let error = ApiError::LogNotFound(42);
        let (status, body) = extract_response(error.into_response()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "Log record not found");
        assert!(body.details.unwrap().contains("42"));
    }

    #[tokio::test]
    async fn validation_returns_422_with_user_facing_message() {
        let error = ApiError::Validation(ValidationError::RequestAfterDelivery);
        let (status, body) = extract_response(error.into_response()).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body.error,
            "Request date must be before or equal to delivery date."
        );
    }

    #[tokio::test]
    async fn invalid_import_returns_422() {
        let error = ApiError::InvalidImport("not a workbook".to_string());
        let (status, body) = extract_response(error.into_response()).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.error, "Import file rejected");
        assert!(body.details.unwrap().contains("not a workbook"));
    }

    #[tokio::test]
    async fn internal_error_hides_details() {
        let error = ApiError::Internal("pdf writer exploded".to_string());
        let (status, body) = extract_response(error.into_response()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Internal server error");
        // Internal errors should NOT expose details to clients
        assert!(body.details.is_none());
    }

    #[test]
    fn api_error_from_validation_error() {
        let api_err: ApiError = ValidationError::RequestAfterDelivery.into();
        assert!(matches!(api_err, ApiError::Validation(_)));
    }

    #[test]
    fn error_response_serialization_skips_absent_details() {
        let json = serde_json::to_string(&ErrorResponse::new("Test error")).unwrap();
        assert!(json.contains("\"error\":\"Test error\""));
        assert!(!json.contains("details"));

        let json =
            serde_json::to_string(&ErrorResponse::with_details("Test error", "More info")).unwrap();
        assert!(json.contains("\"details\":\"More info\""));
    }
}
