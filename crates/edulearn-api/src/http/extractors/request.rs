//! Body and path extractors that reject with `{"error": ...}` bodies.
//!
//! axum's own `Json` and `Path` rejections answer in plain text. These
//! wrappers route every failure through [`AppError`] instead.

use axum::extract::{FromRequest, FromRequestParts, Path};
use axum::http::request::Parts;

use edulearn_types::course::CourseId;
use edulearn_types::error::CatalogError;
use edulearn_types::lesson::LessonId;

use crate::http::error::AppError;

/// JSON request body. Malformed or mistyped bodies become a 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Course id from the `{id}` path segment.
///
/// A segment that is not an integer names no course, so it is answered
/// like any other missing course.
#[derive(Debug, Clone, Copy)]
pub struct CoursePath(pub CourseId);

/// Lesson id from the `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct LessonPath(pub LessonId);

impl<S> FromRequestParts<S> for CoursePath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<CourseId>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(CoursePath(id)),
            Err(rejection) => {
                tracing::debug!(path = %parts.uri.path(), %rejection, "unparseable course id");
                Err(CatalogError::CourseNotFound.into())
            }
        }
    }
}

impl<S> FromRequestParts<S> for LessonPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<LessonId>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(LessonPath(id)),
            Err(rejection) => {
                tracing::debug!(path = %parts.uri.path(), %rejection, "unparseable lesson id");
                Err(CatalogError::LessonNotFound.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::IntoResponse;
    use edulearn_types::course::NewCourse;
    use serde_json::json;

    use crate::http::error::body_json;

    fn json_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/courses/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_json_body_is_extracted() {
        let ApiJson(course) = ApiJson::<NewCourse>::from_request(
            json_request(r#"{"title": "Rust", "description": "Systems", "duration": 12}"#),
            &(),
        )
        .await
        .unwrap();
        assert_eq!(course.title, "Rust");
        assert_eq!(course.duration, 12);
    }

    #[tokio::test]
    async fn test_malformed_json_is_400_with_error_body() {
        let err = ApiJson::<NewCourse>::from_request(json_request(r#"{"title": "Rust""#), &())
            .await
            .unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].is_string());
        assert_eq!(body.as_object().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mistyped_field_is_400() {
        let err = ApiJson::<NewCourse>::from_request(
            json_request(r#"{"title": "Rust", "description": "", "duration": "long"}"#),
            &(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_400() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/courses/")
            .body(Body::from(json!({"title": "Rust"}).to_string()))
            .unwrap();
        let err = ApiJson::<NewCourse>::from_request(request, &())
            .await
            .unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }
}
