//! Lesson handlers for the REST API.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use edulearn_types::course::CourseId;
use edulearn_types::lesson::{Lesson, LessonId, LessonUpdate, NewLesson};

use crate::http::error::AppError;
use crate::http::extractors::actor::Viewer;
use crate::http::extractors::request::{ApiJson, LessonPath};
use crate::state::AppState;

/// Outcome of marking a lesson completed.
#[derive(Debug, Serialize)]
pub struct CompletionBody {
    pub lesson_id: LessonId,
    pub course_id: CourseId,
    pub newly_completed: bool,
    pub course_url: String,
}

/// POST /api/lessons/ - Create a lesson in an existing course (staff).
pub async fn create_lesson(
    State(state): State<AppState>,
    Viewer(actor): Viewer,
    ApiJson(body): ApiJson<NewLesson>,
) -> Result<(StatusCode, Json<Lesson>), AppError> {
    let lesson = state.catalog.create_lesson(&actor, body).await?;
    Ok((StatusCode::CREATED, Json(lesson)))
}

/// PUT /api/lessons/{id}/ - Update a lesson (staff).
pub async fn update_lesson(
    State(state): State<AppState>,
    Viewer(actor): Viewer,
    LessonPath(id): LessonPath,
    ApiJson(body): ApiJson<LessonUpdate>,
) -> Result<Json<Lesson>, AppError> {
    let lesson = state.catalog.update_lesson(&actor, id, body).await?;
    Ok(Json(lesson))
}

/// DELETE /api/lessons/{id}/ - Delete a lesson (staff).
pub async fn delete_lesson(
    State(state): State<AppState>,
    Viewer(actor): Viewer,
    LessonPath(id): LessonPath,
) -> Result<StatusCode, AppError> {
    state.catalog.delete_lesson(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/lessons/{id}/complete/ - Mark a lesson completed for the viewer.
pub async fn complete_lesson(
    State(state): State<AppState>,
    viewer: Viewer,
    LessonPath(id): LessonPath,
) -> Result<Json<CompletionBody>, AppError> {
    let email = viewer.require_authenticated()?;
    let result = state.enrollment.mark_completed(email, id).await?;
    let course_id = result.course_id();
    Ok(Json(CompletionBody {
        lesson_id: result.lesson.id,
        course_id,
        newly_completed: result.newly_completed,
        course_url: format!("/api/courses/{course_id}/"),
    }))
}
