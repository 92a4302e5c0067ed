//! Single-session study timer accumulator.
//!
//! The timer counts whole elapsed seconds while running, toggles
//! between running and paused, and survives app suspension: ticks stop
//! while the process is backgrounded, so on resume the wall-clock gap
//! is added to the counter once. Stopping freezes the counter and opens
//! the save-or-discard decision; saving turns the accumulated run into
//! a [`SessionForm`] for the session store, discarding just drops it.
//!
//! The accumulated duration is authoritative for the recorded session:
//! because paused time is excluded, it is usually smaller than
//! `end - start`.

use crate::store::sessions::SessionForm;
use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Running,
    Paused,
    Stopped,
}

#[derive(Debug, Clone)]
pub struct Timer {
    course_id: String,
    started_at: NaiveDateTime,
    elapsed_seconds: i64,
    state: TimerState,
    background_since: Option<NaiveDateTime>,
}

impl Timer {
    /// Starts a running timer for `course_id` at `now`.
    pub fn start(course_id: &str, now: NaiveDateTime) -> Self {
        Timer {
            course_id: course_id.to_string(),
            started_at: now,
            elapsed_seconds: 0,
            state: TimerState::Running,
            background_since: None,
        }
    }

    /// One real-time second has passed. Counts only while running.
    pub fn tick(&mut self) {
        if self.state == TimerState::Running {
            self.elapsed_seconds += 1;
        }
    }

    /// Toggles between running and paused. No effect once stopped.
    pub fn toggle(&mut self) {
        self.state = match self.state {
            TimerState::Running => TimerState::Paused,
            TimerState::Paused => TimerState::Running,
            TimerState::Stopped => TimerState::Stopped,
        };
    }

    /// The app is being suspended. Only a running timer needs the
    /// wall-clock correction later.
    pub fn enter_background(&mut self, now: NaiveDateTime) {
        if self.state == TimerState::Running {
            self.background_since = Some(now);
        }
    }

    /// The app is back in the foreground. Adds the suspension gap in
    /// whole seconds, exactly once, and only if the timer was running
    /// when it happened.
    pub fn leave_background(&mut self, now: NaiveDateTime) {
        if let Some(since) = self.background_since.take() {
            if self.state == TimerState::Running {
                self.elapsed_seconds += (now - since).num_seconds().max(0);
            }
        }
    }

    /// Freezes the counter and opens the save-or-discard decision.
    pub fn stop(&mut self) {
        self.state = TimerState::Stopped;
    }

    /// Turns the stopped run into a session record ending at `now`.
    /// The accumulated count, not `now - started_at`, is the duration.
    pub fn into_session(self, notes: &str, now: NaiveDateTime) -> SessionForm {
        SessionForm {
            course_id: self.course_id,
            start_time: self.started_at,
            end_time: now,
            duration: self.elapsed_seconds,
            notes: notes.to_string(),
            date: now,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn elapsed_seconds(&self) -> i64 {
        self.elapsed_seconds
    }

    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    pub fn started_at(&self) -> NaiveDateTime {
        self.started_at
    }
}
