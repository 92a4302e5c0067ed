//! Due-date classification for assignment display.
//!
//! The checks run in a fixed priority order and the first match wins:
//! overdue, due within two hours, due today, due tomorrow, due within
//! the next seven days, due later. Hour and day distances truncate
//! toward zero, so an assignment due in 90 minutes classifies as
//! `DueInHours(1)`.

use crate::libs::formatter::day_name;
use chrono::{Datelike, Days, NaiveDateTime};
use std::fmt::{Display, Formatter, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DueStatus {
    Overdue,
    /// Due within the next two hours; carries the whole hours left.
    DueInHours(i64),
    /// Due later today; carries the "HH:MM" time.
    DueToday(String),
    DueTomorrow(String),
    /// Due within the next seven days; carries weekday name and time.
    DueThisWeek { weekday: String, time: String },
    /// Carries a "Mon DD" date and the time.
    DueLater { date: String, time: String },
}

/// Classifies `due` relative to `now`.
pub fn classify(due: NaiveDateTime, now: NaiveDateTime) -> DueStatus {
    let hours_until = (due - now).num_hours();
    let days_until = (due - now).num_days();

    // num_hours truncates toward zero, so anything less than a full
    // hour past due still lands in the zero-hours bucket below.
    if hours_until < 0 {
        return DueStatus::Overdue;
    }
    if hours_until < 2 {
        return DueStatus::DueInHours(hours_until);
    }
    let time = due.format("%H:%M").to_string();
    if due.date() == now.date() {
        return DueStatus::DueToday(time);
    }
    if Some(due.date()) == now.date().checked_add_days(Days::new(1)) {
        return DueStatus::DueTomorrow(time);
    }
    if days_until < 7 {
        return DueStatus::DueThisWeek {
            weekday: day_name(due.weekday().num_days_from_sunday() as usize).to_string(),
            time,
        };
    }
    DueStatus::DueLater {
        date: due.format("%b %d").to_string(),
        time,
    }
}

impl Display for DueStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            DueStatus::Overdue => write!(f, "Overdue"),
            DueStatus::DueInHours(h) => write!(f, "Due in {}h", h),
            DueStatus::DueToday(time) => write!(f, "Due {}", time),
            DueStatus::DueTomorrow(time) => write!(f, "Tomorrow, {}", time),
            DueStatus::DueThisWeek { weekday, time } => write!(f, "{}, {}", weekday, time),
            DueStatus::DueLater { date, time } => write!(f, "{}, {}", date, time),
        }
    }
}
