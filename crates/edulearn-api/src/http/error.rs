//! Application error type mapping to HTTP status codes and `{"error": ...}` bodies.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use edulearn_types::error::{CatalogError, EnrollmentError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Catalog (course/lesson) errors.
    Catalog(CatalogError),
    /// Enrollment, completion and progress errors.
    Enrollment(EnrollmentError),
    /// Missing or invalid credentials.
    Unauthorized(String),
    /// Validation error raised by the HTTP layer itself.
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        AppError::Catalog(e)
    }
}

impl From<EnrollmentError> for AppError {
    fn from(e: EnrollmentError) -> Self {
        AppError::Enrollment(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl AppError {
    /// Status code and client-facing message.
    fn parts(&self) -> (StatusCode, String) {
        match self {
            AppError::Catalog(CatalogError::CourseNotFound)
            | AppError::Enrollment(EnrollmentError::CourseNotFound) => {
                (StatusCode::NOT_FOUND, "Course not found".to_string())
            }
            AppError::Catalog(CatalogError::LessonNotFound)
            | AppError::Enrollment(EnrollmentError::LessonNotFound) => {
                (StatusCode::NOT_FOUND, "Lesson not found".to_string())
            }
            AppError::Enrollment(e @ EnrollmentError::StudentNotFound(_)) => {
                (StatusCode::NOT_FOUND, e.to_string())
            }
            AppError::Catalog(e @ CatalogError::Forbidden(_)) => {
                (StatusCode::FORBIDDEN, e.to_string())
            }
            AppError::Catalog(CatalogError::Validation(msg))
            | AppError::Enrollment(EnrollmentError::Validation(msg))
            | AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Catalog(CatalogError::StorageError(msg))
            | AppError::Enrollment(EnrollmentError::StorageError(msg))
            | AppError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.parts();
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
pub(crate) async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
