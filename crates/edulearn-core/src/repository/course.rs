//! Course repository trait definition.

use edulearn_types::course::{Course, CourseId, NewCourse};
use edulearn_types::error::RepositoryError;

/// Repository trait for course persistence.
///
/// Implementations live in edulearn-infra (e.g., SqliteCourseRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait CourseRepository: Send + Sync {
    /// Insert a new course and return it with its assigned id.
    fn create(
        &self,
        course: &NewCourse,
    ) -> impl std::future::Future<Output = Result<Course, RepositoryError>> + Send;

    /// Get a course by id.
    fn get_by_id(
        &self,
        id: CourseId,
    ) -> impl std::future::Future<Output = Result<Option<Course>, RepositoryError>> + Send;

    /// List every course, ordered by id.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Course>, RepositoryError>> + Send;

    /// Overwrite an existing course. `NotFound` if the id does not exist.
    fn update(
        &self,
        course: &Course,
    ) -> impl std::future::Future<Output = Result<Course, RepositoryError>> + Send;

    /// Delete a course together with its lessons, enrollments and the
    /// completion entries of those lessons.
    fn delete(
        &self,
        id: CourseId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
