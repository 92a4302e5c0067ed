use crate::libs::formatter::format_duration;
use crate::libs::messages::Message;
use crate::libs::stats::{aggregates, daily_series};
use crate::libs::storage::Storage;
use crate::libs::view::View;
use crate::msg_warning;
use crate::store::courses::Courses;
use crate::store::sessions::Sessions;
use anyhow::Result;
use chrono::Local;

pub async fn cmd() -> Result<()> {
    let storage = Storage::new();
    let courses = Courses::load(&storage).await;
    let sessions = Sessions::load(&storage).await;
    if sessions.load_failed() {
        msg_warning!(Message::StorageLoadDegraded("study_sessions".to_string()));
    }

    let now = Local::now().naive_local();
    let stats = aggregates(sessions.all(), now);

    println!("Total study time:  {}", format_duration(stats.total_seconds, false));
    println!("This week:         {}", format_duration(stats.weekly_seconds, false));
    let direction = if stats.weekly_percent_change >= 0 { "increase" } else { "decrease" };
    println!(
        "                   {}% {} from last week",
        stats.weekly_percent_change.abs(),
        direction
    );

    if !stats.by_course.is_empty() {
        println!("\nBy course:");
        View::study_by_course(&stats.by_course, courses.all());
    }

    println!("\nLast 7 days:");
    View::daily_series(&daily_series(sessions.all(), now.date()));
    Ok(())
}
