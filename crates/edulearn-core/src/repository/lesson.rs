//! Lesson repository trait definition.

use edulearn_types::course::CourseId;
use edulearn_types::error::RepositoryError;
use edulearn_types::lesson::{Lesson, LessonId, NewLesson};

/// Repository trait for lesson persistence.
pub trait LessonRepository: Send + Sync {
    /// Insert a new lesson. `NotFound` if the referenced course is missing.
    fn create(
        &self,
        lesson: &NewLesson,
    ) -> impl std::future::Future<Output = Result<Lesson, RepositoryError>> + Send;

    /// Get a lesson by id.
    fn get_by_id(
        &self,
        id: LessonId,
    ) -> impl std::future::Future<Output = Result<Option<Lesson>, RepositoryError>> + Send;

    /// Lessons of one course, ordered by id.
    fn list_by_course(
        &self,
        course_id: CourseId,
    ) -> impl std::future::Future<Output = Result<Vec<Lesson>, RepositoryError>> + Send;

    /// Every lesson, ordered by course then id.
    fn list_all(&self) -> impl std::future::Future<Output = Result<Vec<Lesson>, RepositoryError>> + Send;

    /// Number of lessons belonging to a course.
    fn count_by_course(
        &self,
        course_id: CourseId,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Overwrite an existing lesson. `NotFound` if the lesson (or its new
    /// course) does not exist.
    fn update(
        &self,
        lesson: &Lesson,
    ) -> impl std::future::Future<Output = Result<Lesson, RepositoryError>> + Send;

    /// Delete a lesson and every completion entry pointing at it.
    fn delete(
        &self,
        id: LessonId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
