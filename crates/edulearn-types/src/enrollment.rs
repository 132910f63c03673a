//! Results of enrollment, completion and progress operations.

use serde::{Deserialize, Serialize};

use std::fmt;

use crate::course::{Course, CourseId};
use crate::lesson::{Lesson, LessonId};
use crate::student::Student;

/// Whether an enroll call added a new membership edge.
///
/// Both variants are successes; `AlreadyEnrolled` is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentOutcome {
    Enrolled,
    AlreadyEnrolled,
}

impl fmt::Display for EnrollmentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrollmentOutcome::Enrolled => write!(f, "enrolled"),
            EnrollmentOutcome::AlreadyEnrolled => write!(f, "already_enrolled"),
        }
    }
}

/// Outcome of `EnrollmentService::enroll`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentResult {
    pub outcome: EnrollmentOutcome,
    pub student: Student,
    pub course: Course,
    /// True when the student record was created by this call.
    pub student_created: bool,
}

impl EnrollmentResult {
    /// Human-readable message for the outcome.
    pub fn message(&self) -> String {
        match self.outcome {
            EnrollmentOutcome::Enrolled => format!(
                "{} has been enrolled in {}",
                self.student.email, self.course.title
            ),
            EnrollmentOutcome::AlreadyEnrolled => format!(
                "{} is already enrolled in {}",
                self.student.email, self.course.title
            ),
        }
    }
}

/// Outcome of `EnrollmentService::mark_completed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResult {
    pub student: Student,
    pub lesson: Lesson,
    /// False when the lesson was already in the student's completed set.
    pub newly_completed: bool,
}

impl CompletionResult {
    /// The course the completed lesson belongs to.
    pub fn course_id(&self) -> CourseId {
        self.lesson.course_id
    }
}

/// A student's progress through one course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub course_id: CourseId,
    /// `None` when the viewer has no student record (anonymous or staff).
    pub student: Option<Student>,
    pub total_lessons: u64,
    /// Lessons of this course the student completed, in id order.
    pub completed_lessons: Vec<LessonId>,
    /// Percentage in `0.0..=100.0`, rounded to two decimal places.
    pub percentage: f64,
}

impl Progress {
    /// Progress for a viewer without a student record.
    pub fn absent(course_id: CourseId, total_lessons: u64) -> Self {
        Self {
            course_id,
            student: None,
            total_lessons,
            completed_lessons: Vec::new(),
            percentage: 0.0,
        }
    }

    pub fn completed_count(&self) -> u64 {
        self.completed_lessons.len() as u64
    }

    pub fn is_complete(&self) -> bool {
        self.total_lessons > 0 && self.completed_count() == self.total_lessons
    }
}
