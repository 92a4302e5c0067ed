//! Duration and time-of-day formatting utilities.
//!
//! Everything here is display-only: durations in seconds become strings
//! like "2h 30m", the timer view uses zero-padded "MM:SS" / "HH:MM:SS",
//! and schedule times round-trip between "HH:MM" strings and minutes
//! from midnight. Malformed input never panics; it degrades to zero.

const DAY_NAMES: [&str; 7] = ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];
const DAY_SHORT_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Formats seconds as a readable duration like "2h 30m" or "45m 10s".
///
/// Seconds are only shown when `show_seconds` is set or nothing larger
/// is present; negative input is treated as zero.
pub fn format_duration(seconds: i64, show_seconds: bool) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 || (hours > 0 && show_seconds) {
        parts.push(format!("{}m", minutes));
    }
    if show_seconds || (hours == 0 && minutes == 0) {
        parts.push(format!("{}s", secs));
    }

    if parts.is_empty() {
        "0s".to_string()
    } else {
        parts.join(" ")
    }
}

/// Formats seconds for the running timer: "MM:SS", or "HH:MM:SS" once
/// an hour has accumulated.
pub fn format_timer_display(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Full weekday name for a 0 = Sunday .. 6 = Saturday index, or "" when
/// out of range.
pub fn day_name(index: usize) -> &'static str {
    DAY_NAMES.get(index).copied().unwrap_or("")
}

pub fn day_short_name(index: usize) -> &'static str {
    DAY_SHORT_NAMES.get(index).copied().unwrap_or("")
}

/// Parses an "HH:MM" string into hours and minutes, zero on anything
/// malformed.
pub fn parse_time_string(time: &str) -> (u32, u32) {
    let Some((hours, minutes)) = time.split_once(':') else {
        return (0, 0);
    };
    (hours.parse().unwrap_or(0), minutes.parse().unwrap_or(0))
}

/// Minutes from midnight for an "HH:MM" string.
pub fn time_string_to_minutes(time: &str) -> u32 {
    let (hours, minutes) = parse_time_string(time);
    hours * 60 + minutes
}

/// The inverse of [`time_string_to_minutes`].
pub fn minutes_to_time_string(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
