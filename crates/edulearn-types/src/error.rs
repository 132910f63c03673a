use thiserror::Error;

/// Errors related to catalog (course and lesson) operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("course not found")]
    CourseNotFound,

    #[error("lesson not found")]
    LessonNotFound,

    #[error("staff privileges required to {0}")]
    Forbidden(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to enrollment, completion and progress operations.
#[derive(Debug, Error)]
pub enum EnrollmentError {
    #[error("course not found")]
    CourseNotFound,

    #[error("lesson not found")]
    LessonNotFound,

    #[error("no student registered with email '{0}'")]
    StudentNotFound(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from repository operations (used by trait definitions in edulearn-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::Forbidden("delete a course".to_string());
        assert_eq!(err.to_string(), "staff privileges required to delete a course");
    }

    #[test]
    fn test_enrollment_error_display() {
        let err = EnrollmentError::StudentNotFound("ada@example.com".to_string());
        assert_eq!(
            err.to_string(),
            "no student registered with email 'ada@example.com'"
        );
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }
}
