//! SQLite student repository implementation.
//!
//! Students live in `students`; their relations in the `enrollments` and
//! `completions` link tables. Relation inserts use `INSERT OR IGNORE` on the
//! composite primary key, so each add is a single atomic statement and
//! reports through `rows_affected` whether the edge is new.

use chrono::{DateTime, Utc};
use edulearn_core::repository::student::StudentRepository;
use edulearn_types::course::CourseId;
use edulearn_types::error::RepositoryError;
use edulearn_types::lesson::LessonId;
use edulearn_types::student::{RosterEntry, Student, StudentId};
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, write_error};

/// SQLite-backed implementation of `StudentRepository`.
#[derive(Clone)]
pub struct SqliteStudentRepository {
    pool: DatabasePool,
}

impl SqliteStudentRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn student_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Student, RepositoryError> {
    let map = |e: sqlx::Error| RepositoryError::Query(e.to_string());
    Ok(Student {
        id: StudentId(row.try_get("id").map_err(map)?),
        email: row.try_get("email").map_err(map)?,
        name: row.try_get("name").map_err(map)?,
    })
}

impl StudentRepository for SqliteStudentRepository {
    async fn get_by_email(&self, email: &str) -> Result<Option<Student>, RepositoryError> {
        let row = sqlx::query("SELECT id, email, name FROM students WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(student_from_row).transpose()
    }

    async fn find_or_create(
        &self,
        email: &str,
        name: Option<&str>,
    ) -> Result<(Student, bool), RepositoryError> {
        let inserted = sqlx::query(
            "INSERT INTO students (email, name) VALUES (?, ?) ON CONFLICT(email) DO NOTHING",
        )
        .bind(email)
        .bind(name)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?
        .rows_affected()
            == 1;

        // Read back through the writer so the row is visible even if the
        // insert was ours a moment ago.
        let row = sqlx::query("SELECT id, email, name FROM students WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok((student_from_row(&row)?, inserted))
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(count as u64)
    }

    async fn add_enrollment(
        &self,
        student_id: StudentId,
        course_id: CourseId,
        at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO enrollments (student_id, course_id, enrolled_at) VALUES (?, ?, ?)",
        )
        .bind(student_id.0)
        .bind(course_id.0)
        .bind(format_datetime(&at))
        .execute(&self.pool.writer)
        .await
        .map_err(write_error)?;

        Ok(result.rows_affected() == 1)
    }

    async fn is_enrolled(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<bool, RepositoryError> {
        let row = sqlx::query("SELECT 1 FROM enrollments WHERE student_id = ? AND course_id = ?")
            .bind(student_id.0)
            .bind(course_id.0)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(row.is_some())
    }

    async fn list_by_course(&self, course_id: CourseId) -> Result<Vec<RosterEntry>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT s.id, s.email, s.name, e.enrolled_at
             FROM enrollments e
             JOIN students s ON s.id = e.student_id
             WHERE e.course_id = ?
             ORDER BY s.email",
        )
        .bind(course_id.0)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut roster = Vec::with_capacity(rows.len());
        for row in &rows {
            let enrolled_at: String = row
                .try_get("enrolled_at")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            roster.push(RosterEntry {
                student: student_from_row(row)?,
                enrolled_at: parse_datetime(&enrolled_at)?,
            });
        }
        Ok(roster)
    }

    async fn add_completion(
        &self,
        student_id: StudentId,
        lesson_id: LessonId,
        at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO completions (student_id, lesson_id, completed_at) VALUES (?, ?, ?)",
        )
        .bind(student_id.0)
        .bind(lesson_id.0)
        .bind(format_datetime(&at))
        .execute(&self.pool.writer)
        .await
        .map_err(write_error)?;

        Ok(result.rows_affected() == 1)
    }

    async fn completed_in_course(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<Vec<LessonId>, RepositoryError> {
        let rows: Vec<(i64,)> = sqlx::query_as(
            "SELECT c.lesson_id
             FROM completions c
             JOIN lessons l ON l.id = c.lesson_id
             WHERE c.student_id = ? AND l.course_id = ?
             ORDER BY c.lesson_id",
        )
        .bind(student_id.0)
        .bind(course_id.0)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(rows.into_iter().map(|(id,)| LessonId(id)).collect())
    }
}
