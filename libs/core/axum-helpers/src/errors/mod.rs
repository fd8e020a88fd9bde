pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

/// Body of every error response.
///
/// Clients only rely on `message`; `code` and `error` identify the failure
/// class for logs and programmatic handling.
///
/// # JSON Example
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "Task 0190c4c2-6f1e-7c4a-9d1e-3b1f0a2c5d6e doesn't exist"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Structured details, e.g. every failed validation rule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// One failed validation rule.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldViolation {
    /// Request field the rule applies to
    pub field: String,
    /// Rule message shown to the client
    pub message: String,
    /// Value that was rejected (`null` when the field was missing)
    #[schema(value_type = Object)]
    pub value: serde_json::Value,
}

impl FieldViolation {
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl Serialize,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
        }
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Anything that is not a client mistake becomes [`AppError::ServerError`]:
/// the cause is logged and the client receives HTTP 400 with
/// `"Server error"`, which is the contract existing task clients expect.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query extraction error: {0}")]
    QueryExtractorRejection(#[from] QueryRejection),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<FieldViolation>),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::JsonExtractorRejection(_) => ErrorCode::InvalidJson,
            AppError::QueryExtractorRejection(_) => ErrorCode::InvalidQuery,
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::InvalidId(_) => ErrorCode::InvalidId,
            AppError::BadRequest(_) => ErrorCode::BadRequest,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::ServerError(_) => ErrorCode::ServerError,
            AppError::ServiceUnavailable(_) => ErrorCode::ServiceUnavailable,
        }
    }

    /// The [`ErrorResponse`] this error renders to.
    pub fn to_error_response(&self) -> ErrorResponse {
        let code = self.error_code();
        let (message, details) = match self {
            AppError::JsonExtractorRejection(e) => (e.body_text(), None),
            AppError::QueryExtractorRejection(e) => (e.body_text(), None),
            AppError::Validation(violations) => (
                violations
                    .first()
                    .map(|v| v.message.clone())
                    .unwrap_or_else(|| code.default_message().to_string()),
                Some(json!({ "errors": violations })),
            ),
            AppError::InvalidId(raw) => (format!("Invalid id: {}", raw), None),
            AppError::BadRequest(msg) | AppError::NotFound(msg) => (msg.clone(), None),
            AppError::ServerError(_) => (code.default_message().to_string(), None),
            AppError::ServiceUnavailable(msg) => (msg.clone(), None),
        };

        ErrorResponse {
            code: code.code(),
            error: code.as_str().to_string(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.error_code();
        match &self {
            AppError::ServerError(cause) => {
                tracing::error!(error_code = code.code(), "Server error: {}", cause)
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(error_code = code.code(), "Service unavailable: {}", msg)
            }
            AppError::Validation(violations) => tracing::info!(
                error_code = code.code(),
                failed_rules = violations.len(),
                "Validation failed"
            ),
            other => tracing::info!(error_code = code.code(), "{}", other),
        }

        (self.status(), Json(self.to_error_response())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_hides_cause_and_uses_400() {
        let err = AppError::ServerError("connection reset by peer".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let body = serde_json::to_value(err.to_error_response()).unwrap();
        assert_eq!(body["message"], "Server error");
        assert_eq!(body["error"], "SERVER_ERROR");
        assert!(body.get("details").is_none());
    }

    #[test]
    fn test_validation_message_is_first_violation() {
        let err = AppError::Validation(vec![
            FieldViolation::new("subject", "subject is bad", ""),
            FieldViolation::new("dueDate", "due date is bad", serde_json::Value::Null),
        ]);

        let body = serde_json::to_value(err.to_error_response()).unwrap();
        assert_eq!(body["message"], "subject is bad");
        assert_eq!(body["details"]["errors"][1]["field"], "dueDate");
        assert_eq!(body["details"]["errors"][1]["value"], serde_json::Value::Null);
    }

    #[test]
    fn test_not_found_status() {
        let err = AppError::NotFound("User not found".to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_error_response().message, "User not found");
    }
}
