//! Enrollment handler for the REST API.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use edulearn_types::course::CourseId;

use crate::http::error::AppError;
use crate::http::extractors::request::ApiJson;
use crate::state::AppState;

const MISSING_FIELDS: &str = "Email and course_id are required.";

/// Body of `POST /api/enroll/`.
///
/// `course_id` is kept loose so both `3` and `"3"` are accepted.
#[derive(Debug, Default, Deserialize)]
pub struct EnrollRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub course_id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EnrollResponse {
    pub message: String,
}

/// POST /api/enroll/ - Enroll a student (created on first use) in a course.
pub async fn enroll(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<EnrollRequest>,
) -> Result<Json<EnrollResponse>, AppError> {
    let email = body
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::Validation(MISSING_FIELDS.to_string()))?;
    let course_id = parse_course_id(body.course_id.as_ref())?;
    let name = body.name.as_deref().map(str::trim).filter(|n| !n.is_empty());

    let result = state.enrollment.enroll(email, course_id, name).await?;
    Ok(Json(EnrollResponse {
        message: result.message(),
    }))
}

/// Accept an integer or a numeric string. Missing, null, blank, zero and
/// `false` count as absent.
fn parse_course_id(value: Option<&Value>) -> Result<CourseId, AppError> {
    let missing = || AppError::Validation(MISSING_FIELDS.to_string());
    let invalid = || AppError::Validation("course_id must be an integer.".to_string());

    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Err(missing()),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(0) => Err(missing()),
            Some(id) => Ok(CourseId(id)),
            None => Err(invalid()),
        },
        Some(Value::String(s)) if s.trim().is_empty() => Err(missing()),
        Some(Value::String(s)) => s.parse::<CourseId>().map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}
