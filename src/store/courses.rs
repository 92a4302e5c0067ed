//! Course records and their store.
//!
//! A course carries identity, display color and an ordered list of weekly
//! schedule blocks. Deleting a course does not cascade into assignments
//! or study sessions; their `courseId` references are allowed to dangle
//! and lookups simply return `None`.

use crate::libs::storage::{Storage, COURSES_KEY};
use crate::store::persister::Persister;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One weekly schedule block. `day` is 0 = Sunday .. 6 = Saturday,
/// times are "HH:MM" strings. Overlap between blocks is not validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSchedule {
    pub day: u8,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    pub code: String,
    pub instructor: String,
    pub location: String,
    pub color: String,
    pub schedule: Vec<CourseSchedule>,
    pub created_at: NaiveDateTime,
}

/// The mutable fields of a course, as collected from the user.
#[derive(Debug, Clone)]
pub struct CourseForm {
    pub name: String,
    pub code: String,
    pub instructor: String,
    pub location: String,
    pub color: String,
    pub schedule: Vec<CourseSchedule>,
}

#[derive(Debug, Clone)]
pub enum CourseAction {
    Set(Vec<Course>),
    Add(Course),
    Update(Course),
    Delete(String),
}

/// Pure state transition for the course collection.
pub fn reduce(state: Vec<Course>, action: CourseAction) -> Vec<Course> {
    match action {
        CourseAction::Set(courses) => courses,
        CourseAction::Add(course) => {
            let mut courses = state;
            courses.push(course);
            courses
        }
        CourseAction::Update(course) => state
            .into_iter()
            .map(|c| if c.id == course.id { course.clone() } else { c })
            .collect(),
        CourseAction::Delete(id) => state.into_iter().filter(|c| c.id != id).collect(),
    }
}

pub struct Courses {
    courses: Vec<Course>,
    load_failed: bool,
    persister: Persister,
}

impl Courses {
    /// Loads the course collection from storage.
    ///
    /// A missing document yields an empty store; a corrupt or unreadable
    /// one yields an empty store flagged degraded. No write is issued for
    /// the load itself.
    pub async fn load(storage: &Storage) -> Self {
        let (courses, load_failed) = match storage.load::<Vec<Course>>(COURSES_KEY).await {
            Ok(loaded) => (loaded.unwrap_or_default(), false),
            Err(e) => {
                tracing::warn!(error = %e, "loading courses failed, starting empty");
                (Vec::new(), true)
            }
        };
        Courses {
            courses,
            load_failed,
            persister: Persister::spawn(storage.clone(), COURSES_KEY),
        }
    }

    /// Adds a new course and returns it. The id is a fresh UUID v4 and
    /// `createdAt` is the current local time.
    pub fn add(&mut self, form: CourseForm) -> Course {
        let course = Course {
            id: Uuid::new_v4().to_string(),
            name: form.name,
            code: form.code,
            instructor: form.instructor,
            location: form.location,
            color: form.color,
            schedule: form.schedule,
            created_at: Local::now().naive_local(),
        };
        self.dispatch(CourseAction::Add(course.clone()));
        course
    }

    /// Replaces the mutable fields of the course with `id`, preserving
    /// id and `createdAt`. Silently a no-op when the id is unknown.
    pub fn update(&mut self, id: &str, form: CourseForm) {
        let Some(existing) = self.get(id) else {
            return;
        };
        let updated = Course {
            id: existing.id.clone(),
            name: form.name,
            code: form.code,
            instructor: form.instructor,
            location: form.location,
            color: form.color,
            schedule: form.schedule,
            created_at: existing.created_at,
        };
        self.dispatch(CourseAction::Update(updated));
    }

    /// Removes the course with `id`. Silently a no-op when absent.
    pub fn delete(&mut self, id: &str) {
        self.dispatch(CourseAction::Delete(id.to_string()));
    }

    pub fn get(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn all(&self) -> &[Course] {
        &self.courses
    }

    /// True when the initial load had to fall back to an empty store.
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// Takes the most recent durability-write failure, if any.
    pub fn take_write_error(&self) -> Option<String> {
        self.persister.take_error().map(|e| e.to_string())
    }

    /// Waits for all queued writes. Called before process exit; regular
    /// mutations never block on this.
    pub async fn flush(&self) {
        self.persister.flush().await;
    }

    fn dispatch(&mut self, action: CourseAction) {
        let state = std::mem::take(&mut self.courses);
        self.courses = reduce(state, action);
        self.persister.enqueue(&self.courses);
    }
}
