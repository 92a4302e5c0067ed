//! # StudyFlow - Personal Study Planner
//!
//! A command-line utility for tracking courses, assignments and study
//! timer sessions, with calendar and statistics views on top of a
//! local JSON persistence layer.
//!
//! ## Features
//!
//! - **Course Management**: Weekly class schedules with per-course colors
//! - **Assignment Tracking**: Due dates, priorities and completion state
//! - **Study Timer**: Pause/resume session timer with background-gap correction
//! - **Calendar Views**: Day agendas and marked-date computation
//! - **Statistics**: Total, weekly and per-course study-time aggregation
//! - **Local Persistence**: One JSON document per store with date-field revival
//!
//! ## Usage
//!
//! ```rust,no_run
//! use studyflow::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod libs;
pub mod store;
