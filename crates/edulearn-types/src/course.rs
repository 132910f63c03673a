use serde::{Deserialize, Serialize};

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Maximum length of a course title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Unique identifier for a course (SQLite integer rowid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub i64);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CourseId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A course in the catalog.
///
/// Lessons are owned by the course and removed with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    /// Duration in hours.
    pub duration: i32,
    /// Optional reference to a thumbnail image (path or URL).
    pub thumbnail: Option<String>,
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} hrs)", self.title, self.duration)
    }
}

/// Request to create a new course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourse {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub duration: i32,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Partial update for an existing course. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    /// `Some(None)` clears the thumbnail.
    #[serde(default, with = "double_option")]
    pub thumbnail: Option<Option<String>>,
}

impl CourseUpdate {
    /// Apply the update onto `course`, returning the merged value.
    pub fn apply(self, mut course: Course) -> Course {
        if let Some(title) = self.title {
            course.title = title;
        }
        if let Some(description) = self.description {
            course.description = description;
        }
        if let Some(duration) = self.duration {
            course.duration = duration;
        }
        if let Some(thumbnail) = self.thumbnail {
            course.thumbnail = thumbnail;
        }
        course
    }
}

/// Serde helper distinguishing an absent field from an explicit `null`.
pub(crate) mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Course {
        Course {
            id: CourseId(1),
            title: "Rust Basics".to_string(),
            description: "Ownership and borrowing".to_string(),
            duration: 12,
            thumbnail: Some("course_thumbnails/rust.png".to_string()),
        }
    }

    #[test]
    fn test_course_display() {
        assert_eq!(sample().to_string(), "Rust Basics (12 hrs)");
    }

    #[test]
    fn test_course_id_parse() {
        assert_eq!(" 42 ".parse::<CourseId>().unwrap(), CourseId(42));
        assert!("abc".parse::<CourseId>().is_err());
    }

    #[test]
    fn test_course_id_serializes_as_integer() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["duration"], 12);
    }

    #[test]
    fn test_update_apply_partial() {
        let update = CourseUpdate {
            duration: Some(20),
            ..Default::default()
        };
        let updated = update.apply(sample());
        assert_eq!(updated.duration, 20);
        assert_eq!(updated.title, "Rust Basics");
        assert!(updated.thumbnail.is_some());
    }

    #[test]
    fn test_update_null_thumbnail_clears() {
        let update: CourseUpdate = serde_json::from_str(r#"{"thumbnail": null}"#).unwrap();
        assert_eq!(update.thumbnail, Some(None));
        let updated = update.apply(sample());
        assert!(updated.thumbnail.is_none());
    }

    #[test]
    fn test_update_missing_thumbnail_keeps() {
        let update: CourseUpdate = serde_json::from_str(r#"{"title": "Rust 2"}"#).unwrap();
        assert!(update.thumbnail.is_none());
        let updated = update.apply(sample());
        assert_eq!(updated.title, "Rust 2");
        assert!(updated.thumbnail.is_some());
    }
}
