//! SQLite lesson repository implementation.

use edulearn_core::repository::lesson::LessonRepository;
use edulearn_types::course::CourseId;
use edulearn_types::error::RepositoryError;
use edulearn_types::lesson::{Lesson, LessonId, NewLesson};
use sqlx::Row;

use super::pool::DatabasePool;
use super::write_error;

/// SQLite-backed implementation of `LessonRepository`.
#[derive(Clone)]
pub struct SqliteLessonRepository {
    pool: DatabasePool,
}

impl SqliteLessonRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn lesson_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Lesson, RepositoryError> {
    let map = |e: sqlx::Error| RepositoryError::Query(e.to_string());
    Ok(Lesson {
        id: LessonId(row.try_get("id").map_err(map)?),
        course_id: CourseId(row.try_get("course_id").map_err(map)?),
        title: row.try_get("title").map_err(map)?,
        content: row.try_get("content").map_err(map)?,
        video_url: row.try_get("video_url").map_err(map)?,
    })
}

impl LessonRepository for SqliteLessonRepository {
    async fn create(&self, lesson: &NewLesson) -> Result<Lesson, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO lessons (course_id, title, content, video_url) VALUES (?, ?, ?, ?)",
        )
        .bind(lesson.course_id.0)
        .bind(&lesson.title)
        .bind(&lesson.content)
        .bind(&lesson.video_url)
        .execute(&self.pool.writer)
        .await
        .map_err(write_error)?;

        Ok(Lesson {
            id: LessonId(result.last_insert_rowid()),
            course_id: lesson.course_id,
            title: lesson.title.clone(),
            content: lesson.content.clone(),
            video_url: lesson.video_url.clone(),
        })
    }

    async fn get_by_id(&self, id: LessonId) -> Result<Option<Lesson>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM lessons WHERE id = ?")
            .bind(id.0)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(lesson_from_row).transpose()
    }

    async fn list_by_course(&self, course_id: CourseId) -> Result<Vec<Lesson>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM lessons WHERE course_id = ? ORDER BY id")
            .bind(course_id.0)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(lesson_from_row).collect()
    }

    async fn list_all(&self) -> Result<Vec<Lesson>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM lessons ORDER BY course_id, id")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(lesson_from_row).collect()
    }

    async fn count_by_course(&self, course_id: CourseId) -> Result<u64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM lessons WHERE course_id = ?")
            .bind(course_id.0)
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(count as u64)
    }

    async fn update(&self, lesson: &Lesson) -> Result<Lesson, RepositoryError> {
        let result = sqlx::query(
            "UPDATE lessons SET course_id = ?, title = ?, content = ?, video_url = ? WHERE id = ?",
        )
        .bind(lesson.course_id.0)
        .bind(&lesson.title)
        .bind(&lesson.content)
        .bind(&lesson.video_url)
        .bind(lesson.id.0)
        .execute(&self.pool.writer)
        .await
        .map_err(write_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(lesson.clone())
    }

    async fn delete(&self, id: LessonId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM lessons WHERE id = ?")
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
