//! Study session records and their store.
//!
//! Sessions are immutable once recorded: the only operations are append
//! (from a completed timer run) and delete. `duration` is authoritative,
//! tracked by the timer itself, and may differ slightly from
//! `end_time - start_time`. `date` is the bucketing reference used by
//! the calendar and statistics views, normally the day the session
//! started.

use crate::libs::storage::{Storage, STUDY_SESSIONS_KEY};
use crate::store::persister::Persister;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: String,
    pub course_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// Total studied time in seconds.
    pub duration: i64,
    pub notes: String,
    pub date: NaiveDateTime,
}

/// A completed timer run, ready to be recorded.
#[derive(Debug, Clone)]
pub struct SessionForm {
    pub course_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub duration: i64,
    pub notes: String,
    pub date: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub enum SessionAction {
    Set(Vec<StudySession>),
    Add(StudySession),
    Delete(String),
}

/// Pure state transition for the session collection. There is no update
/// variant; sessions are append-only until deleted.
pub fn reduce(state: Vec<StudySession>, action: SessionAction) -> Vec<StudySession> {
    match action {
        SessionAction::Set(sessions) => sessions,
        SessionAction::Add(session) => {
            let mut sessions = state;
            sessions.push(session);
            sessions
        }
        SessionAction::Delete(id) => state.into_iter().filter(|s| s.id != id).collect(),
    }
}

pub struct Sessions {
    sessions: Vec<StudySession>,
    load_failed: bool,
    persister: Persister,
}

impl Sessions {
    pub async fn load(storage: &Storage) -> Self {
        let (sessions, load_failed) = match storage.load::<Vec<StudySession>>(STUDY_SESSIONS_KEY).await {
            Ok(loaded) => (loaded.unwrap_or_default(), false),
            Err(e) => {
                tracing::warn!(error = %e, "loading study sessions failed, starting empty");
                (Vec::new(), true)
            }
        };
        Sessions {
            sessions,
            load_failed,
            persister: Persister::spawn(storage.clone(), STUDY_SESSIONS_KEY),
        }
    }

    /// Records a completed session and returns it.
    pub fn add(&mut self, form: SessionForm) -> StudySession {
        let session = StudySession {
            id: Uuid::new_v4().to_string(),
            course_id: form.course_id,
            start_time: form.start_time,
            end_time: form.end_time,
            duration: form.duration,
            notes: form.notes,
            date: form.date,
        };
        self.dispatch(SessionAction::Add(session.clone()));
        session
    }

    pub fn delete(&mut self, id: &str) {
        self.dispatch(SessionAction::Delete(id.to_string()));
    }

    pub fn get(&self, id: &str) -> Option<&StudySession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn by_course(&self, course_id: &str) -> Vec<&StudySession> {
        self.sessions.iter().filter(|s| s.course_id == course_id).collect()
    }

    pub fn all(&self) -> &[StudySession] {
        &self.sessions
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

    fn dispatch(&mut self, action: SessionAction) {
        let state = std::mem::take(&mut self.sessions);
        self.sessions = reduce(state, action);
        self.persister.enqueue(&self.sessions);
    }
}
