//! Study-time aggregation over recorded sessions.
//!
//! Pure functions consumed by the statistics view. The weekly window is
//! a rolling seven days ending at `now` (full-timestamp comparison);
//! per-day buckets use calendar-day equality on the session's `date`
//! field, which is the authoritative bucketing reference.

use crate::store::sessions::StudySession;
use chrono::{Days, Duration, NaiveDate, NaiveDateTime};
use std::collections::HashMap;

/// Total studied seconds for one course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseStudyTime {
    pub course_id: String,
    pub seconds: i64,
}

/// One day of the trailing-week series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyStudyTime {
    pub date: NaiveDate,
    pub seconds: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyTimeStats {
    /// Sum of all session durations, in seconds.
    pub total_seconds: i64,
    /// Sum over sessions dated within the last seven days.
    pub weekly_seconds: i64,
    /// Rounded percent change of the current seven-day window against
    /// the prior one.
    pub weekly_percent_change: i64,
    /// Per-course totals, largest first.
    pub by_course: Vec<CourseStudyTime>,
}

/// Computes the aggregate statistics for a session collection.
pub fn aggregates(sessions: &[StudySession], now: NaiveDateTime) -> StudyTimeStats {
    StudyTimeStats {
        total_seconds: total_time(sessions),
        weekly_seconds: weekly_time(sessions, now),
        weekly_percent_change: weekly_percent_change(sessions, now),
        by_course: time_by_course(sessions),
    }
}

/// Sum of all durations; zero for an empty collection.
pub fn total_time(sessions: &[StudySession]) -> i64 {
    sessions.iter().map(|s| s.duration).sum()
}

/// Sum of durations for sessions dated within the last seven days.
pub fn weekly_time(sessions: &[StudySession], now: NaiveDateTime) -> i64 {
    let one_week_ago = now - Duration::days(7);
    sessions
        .iter()
        .filter(|s| s.date >= one_week_ago)
        .map(|s| s.duration)
        .sum()
}

/// Percent change of the current seven-day window against the seven
/// days before it. An empty prior window reports +100 when the current
/// one has any time, otherwise 0.
pub fn weekly_percent_change(sessions: &[StudySession], now: NaiveDateTime) -> i64 {
    let one_week_ago = now - Duration::days(7);
    let two_weeks_ago = now - Duration::days(14);

    let current = weekly_time(sessions, now);
    let prior: i64 = sessions
        .iter()
        .filter(|s| s.date >= two_weeks_ago && s.date < one_week_ago)
        .map(|s| s.duration)
        .sum();

    if prior == 0 {
        return if current > 0 { 100 } else { 0 };
    }
    (((current - prior) as f64 / prior as f64) * 100.0).round() as i64
}

/// Group-sum of durations keyed by course, sorted descending by total
/// with ties broken by course id so the order is stable across runs.
pub fn time_by_course(sessions: &[StudySession]) -> Vec<CourseStudyTime> {
    let mut totals: HashMap<&str, i64> = HashMap::new();
    for session in sessions {
        *totals.entry(session.course_id.as_str()).or_insert(0) += session.duration;
    }

    let mut by_course: Vec<CourseStudyTime> = totals
        .into_iter()
        .map(|(course_id, seconds)| CourseStudyTime {
            course_id: course_id.to_string(),
            seconds,
        })
        .collect();
    by_course.sort_by(|a, b| {
        b.seconds
            .cmp(&a.seconds)
            .then_with(|| a.course_id.cmp(&b.course_id))
    });
    by_course
}

/// Sum of durations for sessions dated on exactly `date`.
pub fn time_by_date(sessions: &[StudySession], date: NaiveDate) -> i64 {
    sessions
        .iter()
        .filter(|s| s.date.date() == date)
        .map(|s| s.duration)
        .sum()
}

/// Per-day totals for the last seven calendar days, oldest first,
/// zero-filled. Feeds the activity trend chart.
pub fn daily_series(sessions: &[StudySession], today: NaiveDate) -> Vec<DailyStudyTime> {
    let mut buckets: HashMap<NaiveDate, i64> = HashMap::new();
    for session in sessions {
        *buckets.entry(session.date.date()).or_insert(0) += session.duration;
    }

    (0..7)
        .rev()
        .map(|i| {
            let date = today.checked_sub_days(Days::new(i)).unwrap_or(today);
            DailyStudyTime {
                date,
                seconds: buckets.get(&date).copied().unwrap_or(0),
            }
        })
        .collect()
}
