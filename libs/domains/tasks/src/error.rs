use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, FieldViolation};
use thiserror::Error;
use uuid::Uuid;

use crate::validation::{DUE_DATE_FIELD, INVALID_DUE_DATE_MESSAGE};

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Invalid input: {}", .0.first().map(|v| v.message.as_str()).unwrap_or("no rules failed"))]
    Validation(Vec<FieldViolation>),

    #[error("Due date must be a valid date: {0}")]
    InvalidDueDate(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Task {0} doesn't exist")]
    TaskNotFound(Uuid),

    #[error("Task id is required")]
    MissingTaskId,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::Validation(violations) => AppError::Validation(violations),
            TaskError::InvalidDueDate(raw) => AppError::Validation(vec![FieldViolation::new(
                DUE_DATE_FIELD,
                INVALID_DUE_DATE_MESSAGE,
                raw,
            )]),
            TaskError::InvalidId(raw) => AppError::InvalidId(raw),
            err @ (TaskError::TaskNotFound(_)
            | TaskError::MissingTaskId
            | TaskError::UserNotFound) => AppError::NotFound(err.to_string()),
            TaskError::Database(msg) => AppError::ServerError(msg),
            TaskError::Internal(msg) => AppError::ServerError(msg),
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for TaskError {
    fn from(err: mongodb::error::Error) -> Self {
        TaskError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for TaskError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        TaskError::Internal(format!("BSON serialization failed: {}", err))
    }
}
