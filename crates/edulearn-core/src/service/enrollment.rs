//! Enrollment, completion and progress service.
//!
//! The state transitions of a student's relationship to courses and lessons:
//!
//! - `enroll` finds or creates the student by email and adds the course to
//!   their enrollments. Enrolling twice is a success reported as
//!   `AlreadyEnrolled`.
//! - `mark_completed` adds a lesson to an existing student's completed set.
//!   Unlike enrollment it never creates the student.
//! - `course_progress` derives the completion percentage of one course from
//!   the per-student completed set, filtered to that course.

use chrono::Utc;

use edulearn_types::course::{Course, CourseId};
use edulearn_types::enrollment::{CompletionResult, EnrollmentOutcome, EnrollmentResult, Progress};
use edulearn_types::error::{EnrollmentError, RepositoryError};
use edulearn_types::lesson::{Lesson, LessonId};
use edulearn_types::student::{MAX_NAME_LEN, RosterEntry, Student, normalize_email};

use crate::repository::course::CourseRepository;
use crate::repository::lesson::LessonRepository;
use crate::repository::student::StudentRepository;
use crate::service::progress::percentage;

/// Service orchestrating enrollment and completion state.
pub struct EnrollmentService<C: CourseRepository, L: LessonRepository, S: StudentRepository> {
    course_repo: C,
    lesson_repo: L,
    student_repo: S,
}

impl<C: CourseRepository, L: LessonRepository, S: StudentRepository> EnrollmentService<C, L, S> {
    pub fn new(course_repo: C, lesson_repo: L, student_repo: S) -> Self {
        Self {
            course_repo,
            lesson_repo,
            student_repo,
        }
    }

    /// Enroll the student identified by `email` in a course.
    ///
    /// The student is created on first enrollment; `name` is recorded only
    /// at creation. The enrollment edge is added with a single idempotent
    /// insert, so two concurrent calls cannot both report `Enrolled`.
    #[tracing::instrument(name = "enroll", skip(self, email, name), fields(course_id = %course_id))]
    pub async fn enroll(
        &self,
        email: &str,
        course_id: CourseId,
        name: Option<&str>,
    ) -> Result<EnrollmentResult, EnrollmentError> {
        let course = self.require_course(course_id).await?;

        let email = normalize_email(email).map_err(EnrollmentError::Validation)?;
        let name = validate_name(name)?;

        let (student, student_created) = self
            .student_repo
            .find_or_create(&email, name.as_deref())
            .await
            .map_err(storage)?;

        let inserted = self
            .student_repo
            .add_enrollment(student.id, course.id, Utc::now())
            .await
            .map_err(|e| match e {
                // The course vanished between the lookup and the insert.
                RepositoryError::NotFound => EnrollmentError::CourseNotFound,
                other => storage(other),
            })?;

        let outcome = if inserted {
            EnrollmentOutcome::Enrolled
        } else {
            EnrollmentOutcome::AlreadyEnrolled
        };
        tracing::info!(
            student_id = %student.id,
            student_created,
            outcome = %outcome,
            "enrollment processed"
        );

        Ok(EnrollmentResult {
            outcome,
            student,
            course,
            student_created,
        })
    }

    /// Record that the student identified by `email` completed a lesson.
    ///
    /// Fails with `LessonNotFound` or `StudentNotFound` without writing
    /// anything. Completing a lesson twice is not an error.
    #[tracing::instrument(name = "mark_completed", skip(self, email), fields(lesson_id = %lesson_id))]
    pub async fn mark_completed(
        &self,
        email: &str,
        lesson_id: LessonId,
    ) -> Result<CompletionResult, EnrollmentError> {
        let lesson = self.require_lesson(lesson_id).await?;

        let email = email.trim();
        let student = self
            .student_repo
            .get_by_email(email)
            .await
            .map_err(storage)?
            .ok_or_else(|| EnrollmentError::StudentNotFound(email.to_string()))?;

        let newly_completed = self
            .student_repo
            .add_completion(student.id, lesson.id, Utc::now())
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => EnrollmentError::LessonNotFound,
                other => storage(other),
            })?;
        tracing::info!(student_id = %student.id, newly_completed, "lesson completion recorded");

        Ok(CompletionResult {
            student,
            lesson,
            newly_completed,
        })
    }

    /// Progress of the viewer identified by `email` through a course.
    ///
    /// A viewer without a student record (anonymous, or a staff user who
    /// never enrolled) gets 0% and an empty completed set, not an error.
    pub async fn course_progress(
        &self,
        email: Option<&str>,
        course_id: CourseId,
    ) -> Result<Progress, EnrollmentError> {
        let course = self.require_course(course_id).await?;

        let student = match email {
            Some(email) => self
                .student_repo
                .get_by_email(email.trim())
                .await
                .map_err(storage)?,
            None => None,
        };

        self.compute_progress(student, &course).await
    }

    /// Progress of `student` through `course`.
    pub async fn compute_progress(
        &self,
        student: Option<Student>,
        course: &Course,
    ) -> Result<Progress, EnrollmentError> {
        let total_lessons = self
            .lesson_repo
            .count_by_course(course.id)
            .await
            .map_err(storage)?;

        let Some(student) = student else {
            tracing::debug!(course_id = %course.id, "no student record for viewer");
            return Ok(Progress::absent(course.id, total_lessons));
        };

        let completed_lessons = self
            .student_repo
            .completed_in_course(student.id, course.id)
            .await
            .map_err(storage)?;

        let percentage = percentage(completed_lessons.len() as u64, total_lessons);
        tracing::debug!(
            course_id = %course.id,
            student_id = %student.id,
            completed = completed_lessons.len(),
            total_lessons,
            percentage,
            "progress computed"
        );

        Ok(Progress {
            course_id: course.id,
            student: Some(student),
            total_lessons,
            completed_lessons,
            percentage,
        })
    }

    /// Students enrolled in a course, ordered by email.
    pub async fn course_students(
        &self,
        course_id: CourseId,
    ) -> Result<(Course, Vec<RosterEntry>), EnrollmentError> {
        let course = self.require_course(course_id).await?;
        let roster = self
            .student_repo
            .list_by_course(course_id)
            .await
            .map_err(storage)?;
        Ok((course, roster))
    }

    /// Whether the student identified by `email` is enrolled in a course.
    /// Unknown emails are simply not enrolled.
    pub async fn is_enrolled(&self, email: &str, course_id: CourseId) -> Result<bool, EnrollmentError> {
        let Some(student) = self
            .student_repo
            .get_by_email(email.trim())
            .await
            .map_err(storage)?
        else {
            return Ok(false);
        };
        self.student_repo
            .is_enrolled(student.id, course_id)
            .await
            .map_err(storage)
    }

    /// Total number of student records.
    pub async fn student_count(&self) -> Result<u64, EnrollmentError> {
        self.student_repo.count().await.map_err(storage)
    }

    async fn require_course(&self, id: CourseId) -> Result<Course, EnrollmentError> {
        self.course_repo
            .get_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(EnrollmentError::CourseNotFound)
    }

    async fn require_lesson(&self, id: LessonId) -> Result<Lesson, EnrollmentError> {
        self.lesson_repo
            .get_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(EnrollmentError::LessonNotFound)
    }
}

fn storage(e: RepositoryError) -> EnrollmentError {
    EnrollmentError::StorageError(e.to_string())
}

fn validate_name(name: Option<&str>) -> Result<Option<String>, EnrollmentError> {
    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    if name.chars().count() > MAX_NAME_LEN {
        return Err(EnrollmentError::Validation(format!(
            "name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(Some(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::course::CourseRepository;
    use crate::repository::lesson::LessonRepository;
    use crate::repository::memory::MemoryStore;
    use edulearn_types::course::NewCourse;
    use edulearn_types::lesson::NewLesson;

    type TestService = EnrollmentService<MemoryStore, MemoryStore, MemoryStore>;

    fn service() -> (TestService, MemoryStore) {
        let store = MemoryStore::new();
        (
            EnrollmentService::new(store.clone(), store.clone(), store.clone()),
            store,
        )
    }

    async fn seed_course(store: &MemoryStore, title: &str, lessons: usize) -> (Course, Vec<Lesson>) {
        let course = CourseRepository::create(
            store,
            &NewCourse {
                title: title.to_string(),
                description: String::new(),
                duration: 4,
                thumbnail: None,
            },
        )
        .await
        .unwrap();

        let mut created = Vec::new();
        for i in 0..lessons {
            let lesson = LessonRepository::create(
                store,
                &NewLesson {
                    course_id: course.id,
                    title: format!("{title} {i}"),
                    content: String::new(),
                    video_url: None,
                },
            )
            .await
            .unwrap();
            created.push(lesson);
        }
        (course, created)
    }

    #[tokio::test]
    async fn test_enroll_new_email_creates_one_student_and_edge() {
        let (svc, store) = service();
        let (course, _) = seed_course(&store, "Rust", 0).await;

        let result = svc
            .enroll("ada@example.com", course.id, Some("Ada"))
            .await
            .unwrap();

        assert_eq!(result.outcome, EnrollmentOutcome::Enrolled);
        assert!(result.student_created);
        assert_eq!(result.student.name.as_deref(), Some("Ada"));
        assert_eq!(result.message(), "ada@example.com has been enrolled in Rust");
        assert_eq!(store.student_count(), 1);
        assert_eq!(store.enrollment_count(), 1);
    }

    #[tokio::test]
    async fn test_enroll_twice_is_already_enrolled_without_duplicate() {
        let (svc, store) = service();
        let (course, _) = seed_course(&store, "Rust", 0).await;

        svc.enroll("ada@example.com", course.id, None).await.unwrap();
        let again = svc.enroll("ada@example.com", course.id, None).await.unwrap();
        let third = svc.enroll(" ada@example.com ", course.id, None).await.unwrap();

        assert_eq!(again.outcome, EnrollmentOutcome::AlreadyEnrolled);
        assert!(!again.student_created);
        assert_eq!(third.outcome, EnrollmentOutcome::AlreadyEnrolled);
        assert_eq!(again.message(), "ada@example.com is already enrolled in Rust");
        assert_eq!(store.student_count(), 1);
        assert_eq!(store.enrollment_count(), 1);
    }

    #[tokio::test]
    async fn test_enroll_name_only_set_on_creation() {
        let (svc, store) = service();
        let (rust, _) = seed_course(&store, "Rust", 0).await;
        let (go, _) = seed_course(&store, "Go", 0).await;

        svc.enroll("ada@example.com", rust.id, Some("Ada")).await.unwrap();
        let second = svc
            .enroll("ada@example.com", go.id, Some("Countess"))
            .await
            .unwrap();

        assert_eq!(second.outcome, EnrollmentOutcome::Enrolled);
        assert_eq!(second.student.name.as_deref(), Some("Ada"));
        assert_eq!(store.enrollment_count(), 2);
    }

    #[tokio::test]
    async fn test_enroll_missing_course_creates_nothing() {
        let (svc, store) = service();
        let err = svc
            .enroll("ada@example.com", CourseId(42), None)
            .await
            .unwrap_err();
        assert!(matches!(err, EnrollmentError::CourseNotFound));
        assert_eq!(store.student_count(), 0);
    }

    #[tokio::test]
    async fn test_enroll_resolves_course_before_checking_email() {
        let (svc, store) = service();
        let err = svc.enroll("x", CourseId(999), None).await.unwrap_err();
        assert!(matches!(err, EnrollmentError::CourseNotFound));
        assert_eq!(store.student_count(), 0);
    }

    #[tokio::test]
    async fn test_enroll_validates_email_and_name() {
        let (svc, store) = service();
        let (course, _) = seed_course(&store, "Rust", 0).await;

        assert!(matches!(
            svc.enroll("", course.id, None).await,
            Err(EnrollmentError::Validation(_))
        ));
        assert!(matches!(
            svc.enroll("not-an-email", course.id, None).await,
            Err(EnrollmentError::Validation(_))
        ));
        let long_name = "n".repeat(101);
        assert!(matches!(
            svc.enroll("ada@example.com", course.id, Some(&long_name)).await,
            Err(EnrollmentError::Validation(_))
        ));
        assert_eq!(store.student_count(), 0);
    }

    #[tokio::test]
    async fn test_mark_completed_unknown_student_is_not_found_and_records_nothing() {
        let (svc, store) = service();
        let (_, lessons) = seed_course(&store, "Rust", 2).await;

        let err = svc
            .mark_completed("ghost@example.com", lessons[0].id)
            .await
            .unwrap_err();
        assert!(matches!(err, EnrollmentError::StudentNotFound(_)));
        assert_eq!(store.completion_count(), 0);
        assert_eq!(store.student_count(), 0);
    }

    #[tokio::test]
    async fn test_mark_completed_unknown_lesson() {
        let (svc, store) = service();
        let (course, _) = seed_course(&store, "Rust", 0).await;
        svc.enroll("ada@example.com", course.id, None).await.unwrap();

        let err = svc
            .mark_completed("ada@example.com", LessonId(999))
            .await
            .unwrap_err();
        assert!(matches!(err, EnrollmentError::LessonNotFound));
    }

    #[tokio::test]
    async fn test_mark_completed_is_idempotent() {
        let (svc, store) = service();
        let (course, lessons) = seed_course(&store, "Rust", 2).await;
        svc.enroll("ada@example.com", course.id, None).await.unwrap();

        let first = svc.mark_completed("ada@example.com", lessons[0].id).await.unwrap();
        let second = svc.mark_completed("ada@example.com", lessons[0].id).await.unwrap();

        assert!(first.newly_completed);
        assert!(!second.newly_completed);
        assert_eq!(first.course_id(), course.id);
        assert_eq!(store.completion_count(), 1);
    }

    #[tokio::test]
    async fn test_progress_two_of_four_is_fifty() {
        let (svc, store) = service();
        let (course, lessons) = seed_course(&store, "Rust", 4).await;
        svc.enroll("ada@example.com", course.id, None).await.unwrap();
        svc.mark_completed("ada@example.com", lessons[0].id).await.unwrap();
        svc.mark_completed("ada@example.com", lessons[2].id).await.unwrap();

        let progress = svc
            .course_progress(Some("ada@example.com"), course.id)
            .await
            .unwrap();
        assert_eq!(progress.total_lessons, 4);
        assert_eq!(progress.completed_lessons, vec![lessons[0].id, lessons[2].id]);
        assert_eq!(progress.percentage, 50.0);
        assert!(progress.student.is_some());
    }

    #[tokio::test]
    async fn test_progress_empty_course_is_zero() {
        let (svc, store) = service();
        let (course, _) = seed_course(&store, "Empty", 0).await;
        svc.enroll("ada@example.com", course.id, None).await.unwrap();

        let progress = svc
            .course_progress(Some("ada@example.com"), course.id)
            .await
            .unwrap();
        assert_eq!(progress.total_lessons, 0);
        assert_eq!(progress.percentage, 0.0);
    }

    #[tokio::test]
    async fn test_progress_filters_completions_by_course() {
        let (svc, store) = service();
        let (rust, rust_lessons) = seed_course(&store, "Rust", 3).await;
        let (go, go_lessons) = seed_course(&store, "Go", 2).await;
        svc.enroll("ada@example.com", rust.id, None).await.unwrap();
        svc.enroll("ada@example.com", go.id, None).await.unwrap();

        svc.mark_completed("ada@example.com", rust_lessons[0].id).await.unwrap();
        for lesson in &go_lessons {
            svc.mark_completed("ada@example.com", lesson.id).await.unwrap();
        }

        let rust_progress = svc.course_progress(Some("ada@example.com"), rust.id).await.unwrap();
        assert_eq!(rust_progress.completed_lessons, vec![rust_lessons[0].id]);
        assert_eq!(rust_progress.percentage, 33.33);

        let go_progress = svc.course_progress(Some("ada@example.com"), go.id).await.unwrap();
        assert_eq!(go_progress.percentage, 100.0);
        assert!(go_progress.is_complete());
    }

    #[tokio::test]
    async fn test_progress_without_student_record_is_absent() {
        let (svc, store) = service();
        let (course, _) = seed_course(&store, "Rust", 3).await;

        let anonymous = svc.course_progress(None, course.id).await.unwrap();
        assert!(anonymous.student.is_none());
        assert_eq!(anonymous.total_lessons, 3);
        assert_eq!(anonymous.percentage, 0.0);

        let staff = svc
            .course_progress(Some("grace@example.com"), course.id)
            .await
            .unwrap();
        assert!(staff.student.is_none());
        assert!(staff.completed_lessons.is_empty());
    }

    #[tokio::test]
    async fn test_progress_unknown_course() {
        let (svc, _) = service();
        assert!(matches!(
            svc.course_progress(None, CourseId(5)).await,
            Err(EnrollmentError::CourseNotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_course_cascades_to_completions() {
        let (svc, store) = service();
        let (rust, rust_lessons) = seed_course(&store, "Rust", 2).await;
        let (go, go_lessons) = seed_course(&store, "Go", 1).await;
        svc.enroll("ada@example.com", rust.id, None).await.unwrap();
        svc.mark_completed("ada@example.com", rust_lessons[0].id).await.unwrap();
        svc.mark_completed("ada@example.com", go_lessons[0].id).await.unwrap();

        CourseRepository::delete(&store, rust.id).await.unwrap();

        assert_eq!(store.completion_count(), 1);
        assert_eq!(store.enrollment_count(), 0);
        let go_progress = svc.course_progress(Some("ada@example.com"), go.id).await.unwrap();
        assert_eq!(go_progress.percentage, 100.0);
    }

    #[tokio::test]
    async fn test_course_students_roster() {
        let (svc, store) = service();
        let (course, _) = seed_course(&store, "Rust", 0).await;
        svc.enroll("zoe@example.com", course.id, None).await.unwrap();
        svc.enroll("ada@example.com", course.id, Some("Ada")).await.unwrap();

        let (fetched, roster) = svc.course_students(course.id).await.unwrap();
        assert_eq!(fetched.id, course.id);
        let emails: Vec<&str> = roster.iter().map(|r| r.student.email.as_str()).collect();
        assert_eq!(emails, vec!["ada@example.com", "zoe@example.com"]);

        assert!(svc.is_enrolled("ada@example.com", course.id).await.unwrap());
        assert!(!svc.is_enrolled("nobody@example.com", course.id).await.unwrap());
        assert_eq!(svc.student_count().await.unwrap(), 2);
    }
}
