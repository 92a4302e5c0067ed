//! Display implementation for studyflow application messages.
//!
//! Central conversion of structured message data into the human-readable
//! text shown on the terminal. Keeping every user-facing string in one
//! place keeps wording consistent and makes future localization a single
//! file change.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // Course messages
            Message::CourseAdded(name) => format!("Course '{}' added", name),
            Message::CourseUpdated(name) => format!("Course '{}' updated", name),
            Message::CourseDeleted => "Course deleted".to_string(),
            Message::CourseNotFound(id) => format!("No course found with id '{}'", id),
            Message::NoCourses => "No courses yet. Add one with 'studyflow course add'".to_string(),

            // Assignment messages
            Message::AssignmentAdded(title) => format!("Assignment '{}' added", title),
            Message::AssignmentUpdated(title) => format!("Assignment '{}' updated", title),
            Message::AssignmentDeleted => "Assignment deleted".to_string(),
            Message::AssignmentNotFound(id) => format!("No assignment found with id '{}'", id),
            Message::AssignmentCompleted(title) => format!("Assignment '{}' marked as completed", title),
            Message::AssignmentReopened(title) => format!("Assignment '{}' marked as not completed", title),
            Message::NoAssignments => "No assignments yet".to_string(),
            Message::NoUpcomingAssignments => "No upcoming assignments. All caught up!".to_string(),

            // Session messages
            Message::SessionSaved(duration) => format!("Study session saved ({})", duration),
            Message::SessionDiscarded => "Study session discarded".to_string(),
            Message::SessionDeleted => "Study session deleted".to_string(),
            Message::SessionNotFound(id) => format!("No study session found with id '{}'", id),
            Message::NoSessions => "No study sessions recorded yet".to_string(),

            // Timer messages
            Message::TimerStarted(course) => format!("Timer started for '{}'. Press Ctrl+C to stop", course),
            Message::TimerStopped(elapsed) => format!("Timer stopped at {}", elapsed),
            Message::ConfirmSaveSession => "Save this study session?".to_string(),
            Message::PromptSessionNotes => "Session notes".to_string(),

            // Settings messages
            Message::SettingsSaved => "Settings saved".to_string(),
            Message::ThemeSwitched(theme) => format!("Theme switched to {}", theme),
            Message::NotificationToggled(kind, enabled) => {
                format!("{} notifications {}", kind, if *enabled { "enabled" } else { "disabled" })
            }

            // Calendar messages
            Message::AgendaHeader(date) => format!("Agenda for {}", date),
            Message::NoAgendaEntries(date) => format!("Nothing scheduled for {}", date),
            Message::MarkedDatesCount(count) => format!("{} dates with events in the calendar window", count),

            // Storage messages
            Message::StorageLoadDegraded(key) => {
                format!("Stored '{}' data could not be read; starting with empty data", key)
            }
            Message::StorageWriteFailed(detail) => {
                format!("Changes could not be saved and may be lost on restart: {}", detail)
            }
            Message::DataCleared => "All app data cleared".to_string(),
            Message::ConfirmReset => "This will delete all courses, assignments, sessions and settings. Continue?".to_string(),
            Message::ResetCancelled => "Reset cancelled".to_string(),
        };
        write!(f, "{}", text)
    }
}
