//! Course handlers for the REST API.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use edulearn_core::service::catalog::CourseOutline;
use edulearn_types::course::{CourseId, CourseUpdate, NewCourse};
use edulearn_types::enrollment::Progress;
use edulearn_types::lesson::{Lesson, LessonId};
use edulearn_types::student::{RosterEntry, StudentId};

use crate::http::error::AppError;
use crate::http::extractors::actor::Viewer;
use crate::http::extractors::request::{ApiJson, CoursePath};
use crate::state::AppState;

/// Lesson as nested in a course response.
#[derive(Debug, Serialize)]
pub struct LessonBody {
    pub id: LessonId,
    pub title: String,
    pub content: String,
    pub video_url: Option<String>,
}

impl From<Lesson> for LessonBody {
    fn from(lesson: Lesson) -> Self {
        Self {
            id: lesson.id,
            title: lesson.title,
            content: lesson.content,
            video_url: lesson.video_url,
        }
    }
}

/// Course with its lessons nested.
#[derive(Debug, Serialize)]
pub struct CourseBody {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub lessons: Vec<LessonBody>,
}

impl From<CourseOutline> for CourseBody {
    fn from(outline: CourseOutline) -> Self {
        let CourseOutline { course, lessons } = outline;
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            duration: course.duration,
            lessons: lessons.into_iter().map(LessonBody::from).collect(),
        }
    }
}

/// One enrolled student in a roster response.
#[derive(Debug, Serialize)]
pub struct RosterBody {
    pub id: StudentId,
    pub email: String,
    pub name: Option<String>,
    pub enrolled_at: DateTime<Utc>,
}

impl From<RosterEntry> for RosterBody {
    fn from(entry: RosterEntry) -> Self {
        Self {
            id: entry.student.id,
            email: entry.student.email,
            name: entry.student.name,
            enrolled_at: entry.enrolled_at,
        }
    }
}

/// GET /api/courses/ - All courses with nested lessons.
pub async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<CourseBody>>, AppError> {
    let outlines = state.catalog.list_outlines().await?;
    Ok(Json(outlines.into_iter().map(CourseBody::from).collect()))
}

/// GET /api/courses/{id}/ - One course with nested lessons.
pub async fn get_course(
    State(state): State<AppState>,
    CoursePath(id): CoursePath,
) -> Result<Json<CourseBody>, AppError> {
    let outline = state.catalog.get_outline(id).await?;
    Ok(Json(outline.into()))
}

/// POST /api/courses/ - Create a course (staff).
pub async fn create_course(
    State(state): State<AppState>,
    Viewer(actor): Viewer,
    ApiJson(body): ApiJson<NewCourse>,
) -> Result<(StatusCode, Json<CourseBody>), AppError> {
    let course = state.catalog.create_course(&actor, body).await?;
    let outline = CourseOutline {
        course,
        lessons: Vec::new(),
    };
    Ok((StatusCode::CREATED, Json(outline.into())))
}

/// PUT /api/courses/{id}/ - Update a course (staff).
pub async fn update_course(
    State(state): State<AppState>,
    Viewer(actor): Viewer,
    CoursePath(id): CoursePath,
    ApiJson(body): ApiJson<CourseUpdate>,
) -> Result<Json<CourseBody>, AppError> {
    state.catalog.update_course(&actor, id, body).await?;
    let outline = state.catalog.get_outline(id).await?;
    Ok(Json(outline.into()))
}

/// DELETE /api/courses/{id}/ - Delete a course and everything under it (staff).
pub async fn delete_course(
    State(state): State<AppState>,
    Viewer(actor): Viewer,
    CoursePath(id): CoursePath,
) -> Result<StatusCode, AppError> {
    state.catalog.delete_course(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/courses/{id}/students/ - Students enrolled in a course.
pub async fn course_students(
    State(state): State<AppState>,
    viewer: Viewer,
    CoursePath(id): CoursePath,
) -> Result<Json<Vec<RosterBody>>, AppError> {
    viewer.require_authenticated()?;
    let (_, roster) = state.enrollment.course_students(id).await?;
    Ok(Json(roster.into_iter().map(RosterBody::from).collect()))
}

/// GET /api/courses/{id}/progress/ - The viewer's progress through a course.
pub async fn course_progress(
    State(state): State<AppState>,
    Viewer(actor): Viewer,
    CoursePath(id): CoursePath,
) -> Result<Json<Progress>, AppError> {
    let progress = state
        .enrollment
        .course_progress(actor.email.as_deref(), id)
        .await?;
    Ok(Json(progress))
}
