//! Core library modules for the studyflow application.
//!
//! Serves as the main entry point for all studyflow library components,
//! providing a centralized access point to the application's core
//! functionality.
//!
//! ## Features
//!
//! - **Core Infrastructure**: Data directory resolution, JSON persistence, messaging
//! - **Derived Views**: Day agendas, marked dates, due-date classification
//! - **Statistics**: Study-time aggregation over recorded sessions
//! - **Timer**: Single-session elapsed-time accumulator with background correction
//! - **User Interface**: Console rendering and duration formatting
//!
//! ## Usage
//!
//! ```rust,no_run
//! use studyflow::libs::storage::Storage;
//! use studyflow::store::courses::Courses;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let storage = Storage::new();
//! let courses = Courses::load(&storage).await;
//! # Ok(())
//! # }
//! ```

pub mod agenda;
pub mod data_storage;
pub mod due;
pub mod formatter;
pub mod messages;
pub mod stats;
pub mod storage;
pub mod timer;
pub mod view;
