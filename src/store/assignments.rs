//! Assignment records and their store.

use crate::libs::storage::{Storage, ASSIGNMENTS_KEY};
use crate::store::persister::Persister;
use chrono::{Local, NaiveDateTime};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of an assignment. The lowercase strings are part of the
/// persisted format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentType {
    Assignment,
    Exam,
    Project,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// An academic assignment or deadline.
///
/// `course_id` is a weak reference: the course may have been deleted, in
/// which course lookups return `None` and the assignment stays intact.
/// `completed_date` is present exactly while `completed` is true; it is
/// cleared when completion is toggled back off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub title: String,
    pub course_id: String,
    pub due_date: NaiveDateTime,
    #[serde(rename = "type")]
    pub kind: AssignmentType,
    pub priority: Priority,
    pub description: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

/// The fields collected from the user when creating or editing an
/// assignment. Completion state is managed by the store, not the form.
#[derive(Debug, Clone)]
pub struct AssignmentForm {
    pub title: String,
    pub course_id: String,
    pub due_date: NaiveDateTime,
    pub kind: AssignmentType,
    pub priority: Priority,
    pub description: String,
}

#[derive(Debug, Clone)]
pub enum AssignmentAction {
    Set(Vec<Assignment>),
    Add(Assignment),
    Update(Assignment),
    Delete(String),
    ToggleComplete { id: String, at: NaiveDateTime },
}

/// Pure state transition for the assignment collection.
///
/// `ToggleComplete` flips `completed` and sets `completed_date` to `at`
/// on the false-to-true transition, clearing it on the way back.
pub fn reduce(state: Vec<Assignment>, action: AssignmentAction) -> Vec<Assignment> {
    match action {
        AssignmentAction::Set(assignments) => assignments,
        AssignmentAction::Add(assignment) => {
            let mut assignments = state;
            assignments.push(assignment);
            assignments
        }
        AssignmentAction::Update(assignment) => state
            .into_iter()
            .map(|a| if a.id == assignment.id { assignment.clone() } else { a })
            .collect(),
        AssignmentAction::Delete(id) => state.into_iter().filter(|a| a.id != id).collect(),
        AssignmentAction::ToggleComplete { id, at } => state
            .into_iter()
            .map(|mut a| {
                if a.id == id {
                    a.completed = !a.completed;
                    a.completed_date = if a.completed { Some(at) } else { None };
                }
                a
            })
            .collect(),
    }
}

/// Filters and sorts the upcoming assignments: incomplete, due at or
/// after `now`, ascending by due date. The sort is stable, so records
/// sharing a due date keep their insertion order.
pub fn upcoming(assignments: &[Assignment], now: NaiveDateTime) -> Vec<Assignment> {
    let mut upcoming: Vec<Assignment> = assignments
        .iter()
        .filter(|a| !a.completed && a.due_date >= now)
        .cloned()
        .collect();
    upcoming.sort_by_key(|a| a.due_date);
    upcoming
}

pub struct Assignments {
    assignments: Vec<Assignment>,
    load_failed: bool,
    persister: Persister,
}

impl Assignments {
    pub async fn load(storage: &Storage) -> Self {
        let (assignments, load_failed) = match storage.load::<Vec<Assignment>>(ASSIGNMENTS_KEY).await {
            Ok(loaded) => (loaded.unwrap_or_default(), false),
            Err(e) => {
                tracing::warn!(error = %e, "loading assignments failed, starting empty");
                (Vec::new(), true)
            }
        };
        Assignments {
            assignments,
            load_failed,
            persister: Persister::spawn(storage.clone(), ASSIGNMENTS_KEY),
        }
    }

    /// Adds a new assignment, initially incomplete, and returns it.
    pub fn add(&mut self, form: AssignmentForm) -> Assignment {
        let assignment = Assignment {
            id: Uuid::new_v4().to_string(),
            title: form.title,
            course_id: form.course_id,
            due_date: form.due_date,
            kind: form.kind,
            priority: form.priority,
            description: form.description,
            completed: false,
            completed_date: None,
            created_at: Local::now().naive_local(),
        };
        self.dispatch(AssignmentAction::Add(assignment.clone()));
        assignment
    }

    /// Replaces the mutable fields of the assignment with `id`,
    /// preserving id, creation time and completion state. Silently a
    /// no-op when the id is unknown.
    pub fn update(&mut self, id: &str, form: AssignmentForm) {
        let Some(existing) = self.get(id) else {
            return;
        };
        let updated = Assignment {
            id: existing.id.clone(),
            title: form.title,
            course_id: form.course_id,
            due_date: form.due_date,
            kind: form.kind,
            priority: form.priority,
            description: form.description,
            completed: existing.completed,
            completed_date: existing.completed_date,
            created_at: existing.created_at,
        };
        self.dispatch(AssignmentAction::Update(updated));
    }

    pub fn delete(&mut self, id: &str) {
        self.dispatch(AssignmentAction::Delete(id.to_string()));
    }

    /// Flips the completion state of the assignment with `id`.
    pub fn toggle_complete(&mut self, id: &str) {
        self.dispatch(AssignmentAction::ToggleComplete {
            id: id.to_string(),
            at: Local::now().naive_local(),
        });
    }

    pub fn get(&self, id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.id == id)
    }

    pub fn by_course(&self, course_id: &str) -> Vec<&Assignment> {
        self.assignments.iter().filter(|a| a.course_id == course_id).collect()
    }

    /// Incomplete assignments due at or after now, soonest first.
    pub fn upcoming(&self) -> Vec<Assignment> {
        upcoming(&self.assignments, Local::now().naive_local())
    }

    pub fn all(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    pub fn take_write_error(&self) -> Option<String> {
        self.persister.take_error().map(|e| e.to_string())
    }

    pub async fn flush(&self) {
        self.persister.flush().await;
    }

    fn dispatch(&mut self, action: AssignmentAction) {
        let state = std::mem::take(&mut self.assignments);
        self.assignments = reduce(state, action);
        self.persister.enqueue(&self.assignments);
    }
}
