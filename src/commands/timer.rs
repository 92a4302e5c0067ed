//! Interactive study timer.
//!
//! Ticks once per second while the terminal shows the elapsed time.
//! Enter toggles pause/resume, Ctrl+C stops the session and opens the
//! save-or-discard prompt. The tick interval is dropped as soon as the
//! loop exits so no counter outlives the session.

use crate::libs::formatter::{format_duration, format_timer_display};
use crate::libs::messages::Message;
use crate::libs::storage::Storage;
use crate::libs::timer::Timer;
use crate::store::courses::Courses;
use crate::store::sessions::Sessions;
use crate::{msg_bail_anyhow, msg_print, msg_success, msg_warning};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, Duration};

#[derive(Debug, Args)]
pub struct TimerArgs {
    #[arg(help = "Course to study for (id prefix or code)")]
    course: String,
}

pub async fn cmd(args: TimerArgs) -> Result<()> {
    let storage = Storage::new();
    let courses = Courses::load(&storage).await;
    let mut sessions = Sessions::load(&storage).await;

    let Some(course) = courses
        .all()
        .iter()
        .find(|c| c.id.starts_with(&args.course) || c.code == args.course)
    else {
        msg_bail_anyhow!(Message::CourseNotFound(args.course));
    };

    msg_print!(Message::TimerStarted(course.name.clone()));
    println!("Press Enter to pause/resume.");

    let mut timer = Timer::start(&course.id, Local::now().naive_local());
    let mut ticker = interval(Duration::from_secs(1));
    ticker.tick().await; // the first tick completes immediately
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                timer.tick();
                let state = if timer.is_running() { "" } else { " (paused)" };
                print!("\r  {}{}   ", format_timer_display(timer.elapsed_seconds()), state);
                let _ = std::io::stdout().flush();
            }
            line = lines.next_line(), if stdin_open => {
                stdin_open = apply_console_line(&mut timer, line);
            }
            _ = tokio::signal::ctrl_c() => {
                timer.stop();
                break;
            }
        }
    }
    drop(ticker);
    println!();

    msg_print!(Message::TimerStopped(format_timer_display(timer.elapsed_seconds())));

    let save = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::ConfirmSaveSession.to_string())
        .default(true)
        .interact()?;
    if !save {
        msg_print!(Message::SessionDiscarded);
        return Ok(());
    }

    let notes: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptSessionNotes.to_string())
        .allow_empty(true)
        .interact_text()?;

    let duration = timer.elapsed_seconds();
    sessions.add(timer.into_session(&notes, Local::now().naive_local()));
    sessions.flush().await;
    if let Some(detail) = sessions.take_write_error() {
        msg_warning!(Message::StorageWriteFailed(detail));
    }
    msg_success!(Message::SessionSaved(format_duration(duration, true)));
    Ok(())
}

/// Reacts to one console read: a line toggles pause/resume; end of
/// input or a read error means there is no console to poll, so the
/// caller must stop selecting on it (an exhausted stream resolves
/// immediately and would otherwise spin the loop). Returns whether
/// more input may arrive.
pub fn apply_console_line(timer: &mut Timer, line: std::io::Result<Option<String>>) -> bool {
    match line {
        Ok(Some(_)) => {
            timer.toggle();
            true
        }
        Ok(None) | Err(_) => false,
    }
}
