//! Student repository trait definition.
//!
//! Besides the student records themselves, this port owns the two relation
//! sets hanging off a student: course enrollments and lesson completions.
//! Both are idempotent: adding a present member reports `false` instead of
//! failing or duplicating the edge.

use chrono::{DateTime, Utc};

use edulearn_types::course::CourseId;
use edulearn_types::error::RepositoryError;
use edulearn_types::lesson::LessonId;
use edulearn_types::student::{RosterEntry, Student, StudentId};

/// Repository trait for students and their enrollment/completion relations.
pub trait StudentRepository: Send + Sync {
    /// Look up a student by exact email.
    fn get_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<Student>, RepositoryError>> + Send;

    /// Return the student with `email`, creating it when absent.
    ///
    /// `name` is only written when the record is created. The boolean is
    /// true when this call created the record.
    fn find_or_create(
        &self,
        email: &str,
        name: Option<&str>,
    ) -> impl std::future::Future<Output = Result<(Student, bool), RepositoryError>> + Send;

    /// Total number of student records.
    fn count(&self) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Add a course to the student's enrollments.
    ///
    /// Returns false if the student was already enrolled.
    fn add_enrollment(
        &self,
        student_id: StudentId,
        course_id: CourseId,
        at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Whether the student is enrolled in the course.
    fn is_enrolled(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Students enrolled in a course, ordered by email.
    fn list_by_course(
        &self,
        course_id: CourseId,
    ) -> impl std::future::Future<Output = Result<Vec<RosterEntry>, RepositoryError>> + Send;

    /// Add a lesson to the student's completed set.
    ///
    /// Returns false if the lesson was already completed.
    fn add_completion(
        &self,
        student_id: StudentId,
        lesson_id: LessonId,
        at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Completed lessons of the student that belong to `course_id`, ordered by id.
    fn completed_in_course(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> impl std::future::Future<Output = Result<Vec<LessonId>, RepositoryError>> + Send;
}
