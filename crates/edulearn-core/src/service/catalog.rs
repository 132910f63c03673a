//! Course catalog service.
//!
//! Public reads over courses and lessons, plus the staff-only mutations.
//! Every mutation takes the calling [`Actor`] explicitly and refuses
//! non-staff callers before touching storage.

use edulearn_types::actor::Actor;
use edulearn_types::course::{Course, CourseId, CourseUpdate, MAX_TITLE_LEN, NewCourse};
use edulearn_types::error::{CatalogError, RepositoryError};
use edulearn_types::lesson::{Lesson, LessonId, LessonUpdate, NewLesson, validate_video_url};

use crate::repository::course::CourseRepository;
use crate::repository::lesson::LessonRepository;

/// A course together with its lessons, in id order.
#[derive(Debug, Clone)]
pub struct CourseOutline {
    pub course: Course,
    pub lessons: Vec<Lesson>,
}

/// Service over the course catalog.
///
/// Generic over repository traits to maintain clean architecture --
/// edulearn-core never depends on edulearn-infra.
pub struct CatalogService<C: CourseRepository, L: LessonRepository> {
    course_repo: C,
    lesson_repo: L,
}

impl<C: CourseRepository, L: LessonRepository> CatalogService<C, L> {
    pub fn new(course_repo: C, lesson_repo: L) -> Self {
        Self {
            course_repo,
            lesson_repo,
        }
    }

    /// List every course, ordered by id.
    pub async fn list_courses(&self) -> Result<Vec<Course>, CatalogError> {
        self.course_repo.list().await.map_err(storage)
    }

    /// List every course with its lessons nested, ordered by course id.
    ///
    /// Two queries regardless of catalog size.
    pub async fn list_outlines(&self) -> Result<Vec<CourseOutline>, CatalogError> {
        let courses = self.course_repo.list().await.map_err(storage)?;
        let mut lessons = self.lesson_repo.list_all().await.map_err(storage)?.into_iter().peekable();

        let mut outlines = Vec::with_capacity(courses.len());
        for course in courses {
            let mut own = Vec::new();
            // Lessons are sorted by course id, so skip orphans from a
            // concurrent delete and take the run matching this course.
            while lessons.next_if(|l| l.course_id < course.id).is_some() {}
            while let Some(lesson) = lessons.next_if(|l| l.course_id == course.id) {
                own.push(lesson);
            }
            outlines.push(CourseOutline {
                course,
                lessons: own,
            });
        }
        Ok(outlines)
    }

    /// Get a course by id.
    pub async fn get_course(&self, id: CourseId) -> Result<Course, CatalogError> {
        self.course_repo
            .get_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(CatalogError::CourseNotFound)
    }

    /// Get a course and its lessons.
    pub async fn get_outline(&self, id: CourseId) -> Result<CourseOutline, CatalogError> {
        let course = self.get_course(id).await?;
        let lessons = self
            .lesson_repo
            .list_by_course(id)
            .await
            .map_err(storage)?;
        Ok(CourseOutline { course, lessons })
    }

    /// Get a lesson by id.
    pub async fn get_lesson(&self, id: LessonId) -> Result<Lesson, CatalogError> {
        self.lesson_repo
            .get_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(CatalogError::LessonNotFound)
    }

    #[tracing::instrument(name = "create_course", skip(self, actor, request), fields(title = %request.title))]
    pub async fn create_course(
        &self,
        actor: &Actor,
        request: NewCourse,
    ) -> Result<Course, CatalogError> {
        require_staff(actor, "create a course")?;

        let request = NewCourse {
            title: validate_title(&request.title)?,
            description: request.description.trim().to_string(),
            duration: validate_duration(request.duration)?,
            thumbnail: normalize_optional(request.thumbnail),
        };

        let course = self.course_repo.create(&request).await.map_err(storage)?;
        tracing::info!(course_id = %course.id, "course created");
        Ok(course)
    }

    #[tracing::instrument(name = "update_course", skip(self, actor, update), fields(course_id = %id))]
    pub async fn update_course(
        &self,
        actor: &Actor,
        id: CourseId,
        update: CourseUpdate,
    ) -> Result<Course, CatalogError> {
        require_staff(actor, "update a course")?;

        let update = CourseUpdate {
            title: update.title.as_deref().map(validate_title).transpose()?,
            description: update.description.map(|d| d.trim().to_string()),
            duration: update.duration.map(validate_duration).transpose()?,
            thumbnail: update.thumbnail.map(normalize_optional),
        };

        let current = self.get_course(id).await?;
        let merged = update.apply(current);

        let course = self
            .course_repo
            .update(&merged)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CatalogError::CourseNotFound,
                other => storage(other),
            })?;
        tracing::info!("course updated");
        Ok(course)
    }

    /// Delete a course. Its lessons, enrollments and the completions of its
    /// lessons go with it.
    #[tracing::instrument(name = "delete_course", skip(self, actor), fields(course_id = %id))]
    pub async fn delete_course(&self, actor: &Actor, id: CourseId) -> Result<(), CatalogError> {
        require_staff(actor, "delete a course")?;

        self.course_repo.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => CatalogError::CourseNotFound,
            other => storage(other),
        })?;
        tracing::info!("course deleted");
        Ok(())
    }

    #[tracing::instrument(name = "create_lesson", skip(self, actor, request), fields(course_id = %request.course_id))]
    pub async fn create_lesson(
        &self,
        actor: &Actor,
        request: NewLesson,
    ) -> Result<Lesson, CatalogError> {
        require_staff(actor, "create a lesson")?;

        let request = NewLesson {
            course_id: request.course_id,
            title: validate_title(&request.title)?,
            content: request.content,
            video_url: validate_video(request.video_url)?,
        };

        // Surface a missing course as such rather than as a storage failure.
        self.get_course(request.course_id).await?;

        let lesson = self
            .lesson_repo
            .create(&request)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CatalogError::CourseNotFound,
                other => storage(other),
            })?;
        tracing::info!(lesson_id = %lesson.id, "lesson created");
        Ok(lesson)
    }

    #[tracing::instrument(name = "update_lesson", skip(self, actor, update), fields(lesson_id = %id))]
    pub async fn update_lesson(
        &self,
        actor: &Actor,
        id: LessonId,
        update: LessonUpdate,
    ) -> Result<Lesson, CatalogError> {
        require_staff(actor, "update a lesson")?;

        let update = LessonUpdate {
            course_id: update.course_id,
            title: update.title.as_deref().map(validate_title).transpose()?,
            content: update.content,
            video_url: update.video_url.map(validate_video).transpose()?,
        };

        let current = self.get_lesson(id).await?;
        if let Some(course_id) = update.course_id {
            self.get_course(course_id).await?;
        }
        let merged = update.apply(current);

        let lesson = self
            .lesson_repo
            .update(&merged)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CatalogError::LessonNotFound,
                other => storage(other),
            })?;
        tracing::info!("lesson updated");
        Ok(lesson)
    }

    #[tracing::instrument(name = "delete_lesson", skip(self, actor), fields(lesson_id = %id))]
    pub async fn delete_lesson(&self, actor: &Actor, id: LessonId) -> Result<(), CatalogError> {
        require_staff(actor, "delete a lesson")?;

        self.lesson_repo.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => CatalogError::LessonNotFound,
            other => storage(other),
        })?;
        tracing::info!("lesson deleted");
        Ok(())
    }
}

fn storage(e: RepositoryError) -> CatalogError {
    CatalogError::StorageError(e.to_string())
}

fn require_staff(actor: &Actor, action: &str) -> Result<(), CatalogError> {
    if actor.is_staff {
        Ok(())
    } else {
        tracing::warn!(actor = ?actor.email, action, "staff privileges required");
        Err(CatalogError::Forbidden(action.to_string()))
    }
}

fn validate_title(title: &str) -> Result<String, CatalogError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CatalogError::Validation("title cannot be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CatalogError::Validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(title.to_string())
}

fn validate_duration(duration: i32) -> Result<i32, CatalogError> {
    if duration < 0 {
        return Err(CatalogError::Validation(
            "duration cannot be negative".to_string(),
        ));
    }
    Ok(duration)
}

fn validate_video(url: Option<String>) -> Result<Option<String>, CatalogError> {
    match normalize_optional(url) {
        Some(url) => {
            validate_video_url(&url).map_err(CatalogError::Validation)?;
            Ok(Some(url))
        }
        None => Ok(None),
    }
}

/// Blank optional strings are stored as absent.
fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
