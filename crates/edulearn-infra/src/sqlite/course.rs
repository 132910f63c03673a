//! SQLite course repository implementation.
//!
//! Implements `CourseRepository` from `edulearn-core` using sqlx with split read/write pools.

use edulearn_core::repository::course::CourseRepository;
use edulearn_types::course::{Course, CourseId, NewCourse};
use edulearn_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `CourseRepository`.
#[derive(Clone)]
pub struct SqliteCourseRepository {
    pool: DatabasePool,
}

impl SqliteCourseRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn course_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Course, RepositoryError> {
    let map = |e: sqlx::Error| RepositoryError::Query(e.to_string());
    Ok(Course {
        id: CourseId(row.try_get("id").map_err(map)?),
        title: row.try_get("title").map_err(map)?,
        description: row.try_get("description").map_err(map)?,
        duration: row.try_get("duration").map_err(map)?,
        thumbnail: row.try_get("thumbnail").map_err(map)?,
    })
}

impl CourseRepository for SqliteCourseRepository {
    async fn create(&self, course: &NewCourse) -> Result<Course, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO courses (title, description, duration, thumbnail) VALUES (?, ?, ?, ?)",
        )
        .bind(&course.title)
        .bind(&course.description)
        .bind(course.duration)
        .bind(&course.thumbnail)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(Course {
            id: CourseId(result.last_insert_rowid()),
            title: course.title.clone(),
            description: course.description.clone(),
            duration: course.duration,
            thumbnail: course.thumbnail.clone(),
        })
    }

    async fn get_by_id(&self, id: CourseId) -> Result<Option<Course>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM courses WHERE id = ?")
            .bind(id.0)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(course_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Course>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM courses ORDER BY id")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(course_from_row).collect()
    }

    async fn update(&self, course: &Course) -> Result<Course, RepositoryError> {
        let result = sqlx::query(
            "UPDATE courses SET title = ?, description = ?, duration = ?, thumbnail = ? WHERE id = ?",
        )
        .bind(&course.title)
        .bind(&course.description)
        .bind(course.duration)
        .bind(&course.thumbnail)
        .bind(course.id.0)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(course.clone())
    }

    async fn delete(&self, id: CourseId) -> Result<(), RepositoryError> {
        // Lessons, enrollments and (through lessons) completions cascade.
        let result = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
