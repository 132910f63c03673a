//! In-memory repository used by the service tests.
//!
//! One `MemoryStore` implements every repository trait over shared state, so
//! cascades behave like the SQLite schema.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use edulearn_types::course::{Course, CourseId, NewCourse};
use edulearn_types::error::RepositoryError;
use edulearn_types::lesson::{Lesson, LessonId, NewLesson};
use edulearn_types::student::{RosterEntry, Student, StudentId};

use super::course::CourseRepository;
use super::lesson::LessonRepository;
use super::student::StudentRepository;

#[derive(Default)]
pub(crate) struct MemoryState {
    next_id: i64,
    pub courses: BTreeMap<CourseId, Course>,
    pub lessons: BTreeMap<LessonId, Lesson>,
    pub students: BTreeMap<StudentId, Student>,
    pub enrollments: BTreeMap<(StudentId, CourseId), DateTime<Utc>>,
    pub completions: BTreeSet<(StudentId, LessonId)>,
}

impl MemoryState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone, Default)]
pub(crate) struct MemoryStore {
    pub state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enrollment_count(&self) -> usize {
        self.state.lock().unwrap().enrollments.len()
    }

    pub fn completion_count(&self) -> usize {
        self.state.lock().unwrap().completions.len()
    }

    pub fn student_count(&self) -> usize {
        self.state.lock().unwrap().students.len()
    }
}

impl CourseRepository for MemoryStore {
    async fn create(&self, course: &NewCourse) -> Result<Course, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let id = CourseId(state.next_id());
        let created = Course {
            id,
            title: course.title.clone(),
            description: course.description.clone(),
            duration: course.duration,
            thumbnail: course.thumbnail.clone(),
        };
        state.courses.insert(id, created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: CourseId) -> Result<Option<Course>, RepositoryError> {
        Ok(self.state.lock().unwrap().courses.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Course>, RepositoryError> {
        Ok(self.state.lock().unwrap().courses.values().cloned().collect())
    }

    async fn update(&self, course: &Course) -> Result<Course, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        match state.courses.get_mut(&course.id) {
            Some(existing) => {
                *existing = course.clone();
                Ok(course.clone())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete(&self, id: CourseId) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if state.courses.remove(&id).is_none() {
            return Err(RepositoryError::NotFound);
        }
        let removed: BTreeSet<LessonId> = state
            .lessons
            .values()
            .filter(|l| l.course_id == id)
            .map(|l| l.id)
            .collect();
        state.lessons.retain(|lid, _| !removed.contains(lid));
        state.completions.retain(|(_, lid)| !removed.contains(lid));
        state.enrollments.retain(|(_, cid), _| *cid != id);
        Ok(())
    }
}

impl LessonRepository for MemoryStore {
    async fn create(&self, lesson: &NewLesson) -> Result<Lesson, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if !state.courses.contains_key(&lesson.course_id) {
            return Err(RepositoryError::NotFound);
        }
        let id = LessonId(state.next_id());
        let created = Lesson {
            id,
            course_id: lesson.course_id,
            title: lesson.title.clone(),
            content: lesson.content.clone(),
            video_url: lesson.video_url.clone(),
        };
        state.lessons.insert(id, created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: LessonId) -> Result<Option<Lesson>, RepositoryError> {
        Ok(self.state.lock().unwrap().lessons.get(&id).cloned())
    }

    async fn list_by_course(&self, course_id: CourseId) -> Result<Vec<Lesson>, RepositoryError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .lessons
            .values()
            .filter(|l| l.course_id == course_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Lesson>, RepositoryError> {
        let mut lessons: Vec<Lesson> =
            self.state.lock().unwrap().lessons.values().cloned().collect();
        lessons.sort_by_key(|l| (l.course_id, l.id));
        Ok(lessons)
    }

    async fn count_by_course(&self, course_id: CourseId) -> Result<u64, RepositoryError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .lessons
            .values()
            .filter(|l| l.course_id == course_id)
            .count() as u64)
    }

    async fn update(&self, lesson: &Lesson) -> Result<Lesson, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if !state.courses.contains_key(&lesson.course_id) {
            return Err(RepositoryError::NotFound);
        }
        match state.lessons.get_mut(&lesson.id) {
            Some(existing) => {
                *existing = lesson.clone();
                Ok(lesson.clone())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete(&self, id: LessonId) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if state.lessons.remove(&id).is_none() {
            return Err(RepositoryError::NotFound);
        }
        state.completions.retain(|(_, lid)| *lid != id);
        Ok(())
    }
}

impl StudentRepository for MemoryStore {
    async fn get_by_email(&self, email: &str) -> Result<Option<Student>, RepositoryError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .students
            .values()
            .find(|s| s.email == email)
            .cloned())
    }

    async fn find_or_create(
        &self,
        email: &str,
        name: Option<&str>,
    ) -> Result<(Student, bool), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state.students.values().find(|s| s.email == email) {
            return Ok((existing.clone(), false));
        }
        let id = StudentId(state.next_id());
        let student = Student {
            id,
            email: email.to_string(),
            name: name.map(str::to_string),
        };
        state.students.insert(id, student.clone());
        Ok((student, true))
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.state.lock().unwrap().students.len() as u64)
    }

    async fn add_enrollment(
        &self,
        student_id: StudentId,
        course_id: CourseId,
        at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if state.enrollments.contains_key(&(student_id, course_id)) {
            return Ok(false);
        }
        state.enrollments.insert((student_id, course_id), at);
        Ok(true)
    }

    async fn is_enrolled(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<bool, RepositoryError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .enrollments
            .contains_key(&(student_id, course_id)))
    }

    async fn list_by_course(&self, course_id: CourseId) -> Result<Vec<RosterEntry>, RepositoryError> {
        let state = self.state.lock().unwrap();
        let mut roster: Vec<RosterEntry> = state
            .enrollments
            .iter()
            .filter(|((_, cid), _)| *cid == course_id)
            .filter_map(|((sid, _), at)| {
                state.students.get(sid).map(|s| RosterEntry {
                    student: s.clone(),
                    enrolled_at: *at,
                })
            })
            .collect();
        roster.sort_by(|a, b| a.student.email.cmp(&b.student.email));
        Ok(roster)
    }

    async fn add_completion(
        &self,
        student_id: StudentId,
        lesson_id: LessonId,
        _at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .completions
            .insert((student_id, lesson_id)))
    }

    async fn completed_in_course(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<Vec<LessonId>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .completions
            .iter()
            .filter(|(sid, _)| *sid == student_id)
            .filter(|(_, lid)| {
                state
                    .lessons
                    .get(lid)
                    .is_some_and(|l| l.course_id == course_id)
            })
            .map(|(_, lid)| *lid)
            .collect())
    }
}
