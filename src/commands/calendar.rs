use crate::libs::agenda::{day_agenda, marked_dates_default, AgendaFilter};
use crate::libs::messages::Message;
use crate::libs::storage::Storage;
use crate::libs::view::View;
use crate::store::assignments::Assignments;
use crate::store::courses::Courses;
use crate::{msg_print, msg_warning};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    Classes,
    Assignments,
}

#[derive(Debug, Args)]
pub struct CalendarArgs {
    #[arg(long, short, default_value = "today", help = "Day to show (YYYY-MM-DD or 'today')")]
    date: String,
    #[arg(long, short, value_enum, default_value = "all", help = "What to include in the agenda")]
    filter: FilterArg,
}

pub async fn cmd(args: CalendarArgs) -> Result<()> {
    let date = parse_date(&args.date)?;
    let filter = match args.filter {
        FilterArg::All => AgendaFilter::All,
        FilterArg::Classes => AgendaFilter::Classes,
        FilterArg::Assignments => AgendaFilter::Assignments,
    };

    let storage = Storage::new();
    let courses = Courses::load(&storage).await;
    let assignments = Assignments::load(&storage).await;
    if courses.load_failed() {
        msg_warning!(Message::StorageLoadDegraded("courses".to_string()));
    }
    if assignments.load_failed() {
        msg_warning!(Message::StorageLoadDegraded("assignments".to_string()));
    }

    msg_print!(Message::AgendaHeader(date.format("%Y-%m-%d").to_string()));
    let entries = day_agenda(courses.all(), assignments.all(), date, filter);
    if entries.is_empty() {
        msg_print!(Message::NoAgendaEntries(date.format("%Y-%m-%d").to_string()));
    } else {
        View::agenda(&entries);
    }

    let marked = marked_dates_default(courses.all(), assignments.all(), date);
    let event_count = marked.values().filter(|m| m.marked).count();
    msg_print!(Message::MarkedDatesCount(event_count));
    Ok(())
}

fn parse_date(date: &str) -> Result<NaiveDate> {
    if date.eq_ignore_ascii_case("today") {
        Ok(Local::now().date_naive())
    } else {
        Ok(NaiveDate::parse_from_str(date, "%Y-%m-%d")?)
    }
}
