//! Calendar day agendas and marked-date computation.
//!
//! Pure, read-only combinators over the in-memory course and assignment
//! collections; the calendar views recompute them on every relevant
//! state change.

use crate::libs::formatter::time_string_to_minutes;
use crate::store::assignments::Assignment;
use crate::store::courses::{Course, CourseSchedule};
use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime, Timelike};
use std::collections::BTreeMap;

/// Default sliding window for marked-date computation: 120 days
/// starting 30 days before today.
pub const MARKED_WINDOW_DAYS: i64 = 120;
pub const MARKED_START_OFFSET_DAYS: i64 = -30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgendaFilter {
    All,
    Classes,
    Assignments,
}

/// One entry in a day agenda, ordered by time of day.
#[derive(Debug, Clone, PartialEq)]
pub enum AgendaEntry {
    /// A scheduled class meeting on this weekday.
    Class {
        course: Course,
        schedule: CourseSchedule,
    },
    /// An incomplete assignment due this calendar day. The course is
    /// optional: a dangling `courseId` keeps the assignment visible.
    Assignment {
        assignment: Assignment,
        course: Option<Course>,
    },
}

impl AgendaEntry {
    /// Minutes from midnight used as the sort key. Classes sort by
    /// their schedule start, assignments by the due time of day.
    pub fn time_of_day(&self) -> u32 {
        match self {
            AgendaEntry::Class { schedule, .. } => time_string_to_minutes(&schedule.start_time),
            AgendaEntry::Assignment { assignment, .. } => {
                assignment.due_date.hour() * 60 + assignment.due_date.minute()
            }
        }
    }
}

/// Collects the agenda for one calendar day.
///
/// Classes are schedule blocks whose weekday matches `date`;
/// assignments are incomplete ones due that exact calendar day
/// (year/month/day equality, not a 24-hour window). The merged list is
/// sorted ascending by time of day; entries sharing a time keep their
/// collection order, classes first.
pub fn day_agenda(
    courses: &[Course],
    assignments: &[Assignment],
    date: NaiveDate,
    filter: AgendaFilter,
) -> Vec<AgendaEntry> {
    let weekday = date.weekday().num_days_from_sunday() as u8;
    let mut entries = Vec::new();

    if matches!(filter, AgendaFilter::All | AgendaFilter::Classes) {
        for course in courses {
            for schedule in &course.schedule {
                if schedule.day == weekday {
                    entries.push(AgendaEntry::Class {
                        course: course.clone(),
                        schedule: schedule.clone(),
                    });
                }
            }
        }
    }

    if matches!(filter, AgendaFilter::All | AgendaFilter::Assignments) {
        for assignment in assignments {
            if !assignment.completed && assignment.due_date.date() == date {
                let course = courses.iter().find(|c| c.id == assignment.course_id).cloned();
                entries.push(AgendaEntry::Assignment {
                    assignment: assignment.clone(),
                    course,
                });
            }
        }
    }

    entries.sort_by_key(|e| e.time_of_day());
    entries
}

/// Calendar marking for a single date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayMark {
    /// The date has at least one class meeting or assignment due.
    pub marked: bool,
    /// The date is the one currently selected in the calendar.
    pub selected: bool,
}

/// Computes calendar marks over a sliding window around today.
///
/// A date is marked when any course meets on its weekday or any
/// incomplete assignment is due on exactly that date. The selected date
/// always appears with the `selected` flag, whether or not it carries
/// events.
pub fn marked_dates(
    courses: &[Course],
    assignments: &[Assignment],
    selected: NaiveDate,
    today: NaiveDate,
    window_days: i64,
    start_offset_days: i64,
) -> BTreeMap<NaiveDate, DayMark> {
    let mut marked = BTreeMap::new();
    let start = offset_date(today, start_offset_days);

    for i in 0..window_days {
        let date = offset_date(start, i);
        let weekday = date.weekday().num_days_from_sunday() as u8;

        let has_classes = courses.iter().any(|c| c.schedule.iter().any(|s| s.day == weekday));
        let has_assignments = assignments
            .iter()
            .any(|a| !a.completed && a.due_date.date() == date);

        if has_classes || has_assignments {
            marked.insert(
                date,
                DayMark {
                    marked: true,
                    selected: false,
                },
            );
        }
    }

    marked.entry(selected).or_default().selected = true;
    marked
}

/// Marked dates with the default 120-day window starting 30 days back.
pub fn marked_dates_default(
    courses: &[Course],
    assignments: &[Assignment],
    selected: NaiveDate,
) -> BTreeMap<NaiveDate, DayMark> {
    marked_dates(
        courses,
        assignments,
        selected,
        Local::now().date_naive(),
        MARKED_WINDOW_DAYS,
        MARKED_START_OFFSET_DAYS,
    )
}

/// Calendar-day equality, ignoring the time of day.
pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

fn offset_date(date: NaiveDate, days: i64) -> NaiveDate {
    if days >= 0 {
        date.checked_add_days(Days::new(days as u64)).unwrap_or(date)
    } else {
        date.checked_sub_days(Days::new((-days) as u64)).unwrap_or(date)
    }
}
