//! Command-line surface of the studyflow application.
//!
//! Each subcommand lives in its own module with a clap `Args` struct
//! and an async `cmd` entry point. Commands load the stores they need,
//! apply mutations, then flush the persistence queues before returning
//! so nothing is lost when the process exits.

pub mod assignment;
pub mod calendar;
pub mod course;
pub mod reset;
pub mod session;
pub mod settings;
pub mod stats;
pub mod timer;

use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Manage courses and their weekly schedule")]
    Course(course::CourseArgs),
    #[command(about = "Manage assignments and deadlines")]
    Assignment(assignment::AssignmentArgs),
    #[command(about = "List or delete recorded study sessions")]
    Session(session::SessionArgs),
    #[command(about = "Run a study timer for a course")]
    Timer(timer::TimerArgs),
    #[command(about = "Show the agenda for a day")]
    Calendar(calendar::CalendarArgs),
    #[command(about = "Show study time statistics")]
    Stats,
    #[command(about = "Show or change user settings")]
    Settings(settings::SettingsArgs),
    #[command(about = "Delete all locally stored app data")]
    Reset,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> anyhow::Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Course(args) => course::cmd(args).await,
            Commands::Assignment(args) => assignment::cmd(args).await,
            Commands::Session(args) => session::cmd(args).await,
            Commands::Timer(args) => timer::cmd(args).await,
            Commands::Calendar(args) => calendar::cmd(args).await,
            Commands::Stats => stats::cmd().await,
            Commands::Settings(args) => settings::cmd(args).await,
            Commands::Reset => reset::cmd().await,
        }
    }
}
