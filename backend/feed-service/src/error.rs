/// Error types for the feed service
///
/// A closed taxonomy of failures, translated to HTTP responses in exactly one
/// place (`ResponseError`). Handlers and services return `AppError` values;
/// nothing downstream of this module inspects status codes.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;

/// Result type for feed-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing, malformed, or expired credential
    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    /// Caller is authenticated but not permitted to perform the operation
    #[error("Not authorized: {0}")]
    Forbidden(String),

    /// Referenced post or user is absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input failed validation; carries the field-level violations
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),

    /// Uploaded image has a content type outside the allow-list
    #[error("Invalid image type: {0}")]
    InvalidImageType(String),

    /// A post create/update supplied neither a new image nor an existing one
    #[error("No image provided")]
    MissingImage,

    /// Persistence or blob-store failure; detail is logged, not exposed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::InvalidImageType(_) | AppError::MissingImage => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Storage detail stays in the logs; the client gets a generic message.
        let message = match self {
            AppError::Storage(detail) => {
                tracing::error!(%detail, "storage failure surfaced to client");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let mut body = serde_json::json!({
            "message": message,
            "status": status.as_u16(),
        });
        if let AppError::Validation(violations) = self {
            body["data"] = serde_json::json!(violations);
        }

        HttpResponse::build(status).json(body)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("resource not found".to_string()),
            other => AppError::Storage(other.to_string()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let violations = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldViolation {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value for {}", field)),
                })
            })
            .collect();
        AppError::Validation(violations)
    }
}
