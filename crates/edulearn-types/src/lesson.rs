use serde::{Deserialize, Serialize};

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::course::{CourseId, double_option};

/// Maximum length of a lesson video URL, in characters.
pub const MAX_VIDEO_URL_LEN: usize = 200;

/// Unique identifier for a lesson (SQLite integer rowid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonId(pub i64);

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LessonId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A single content item inside a course.
///
/// Completion is tracked per student (see `Student` completions), never on
/// the lesson itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub course_id: CourseId,
    pub title: String,
    pub content: String,
    pub video_url: Option<String>,
}

impl fmt::Display for Lesson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Request to create a lesson inside an existing course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLesson {
    pub course_id: CourseId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub video_url: Option<String>,
}

/// Partial update for an existing lesson.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LessonUpdate {
    /// Move the lesson to another course.
    pub course_id: Option<CourseId>,
    pub title: Option<String>,
    pub content: Option<String>,
    /// `Some(None)` clears the video URL.
    #[serde(default, with = "double_option")]
    pub video_url: Option<Option<String>>,
}

impl LessonUpdate {
    /// Apply the update onto `lesson`, returning the merged value.
    pub fn apply(self, mut lesson: Lesson) -> Lesson {
        if let Some(course_id) = self.course_id {
            lesson.course_id = course_id;
        }
        if let Some(title) = self.title {
            lesson.title = title;
        }
        if let Some(content) = self.content {
            lesson.content = content;
        }
        if let Some(video_url) = self.video_url {
            lesson.video_url = video_url;
        }
        lesson
    }
}

/// Check that a video URL is an absolute http(s) URL within the length limit.
pub fn validate_video_url(url: &str) -> Result<(), String> {
    if url.chars().count() > MAX_VIDEO_URL_LEN {
        return Err(format!(
            "video_url must be at most {MAX_VIDEO_URL_LEN} characters"
        ));
    }
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| "video_url must start with http:// or https://".to_string())?;
    if rest.is_empty() || rest.starts_with('/') || rest.contains(char::is_whitespace) {
        return Err(format!("invalid video_url: '{url}'"));
    }
    Ok(())
}
