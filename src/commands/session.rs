use crate::libs::messages::Message;
use crate::libs::storage::Storage;
use crate::libs::view::View;
use crate::store::courses::Courses;
use crate::store::sessions::{Sessions, StudySession};
use crate::{msg_bail_anyhow, msg_print, msg_success, msg_warning};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Debug, Subcommand)]
enum SessionCommand {
    #[command(about = "List recorded study sessions")]
    List {
        #[arg(long, help = "Only sessions of this course (id prefix)")]
        course: Option<String>,
    },
    #[command(about = "Delete a study session")]
    Delete {
        #[arg(help = "Session id (prefix is enough)")]
        id: String,
    },
}

pub async fn cmd(args: SessionArgs) -> Result<()> {
    let storage = Storage::new();
    let courses = Courses::load(&storage).await;
    let mut sessions = Sessions::load(&storage).await;
    if sessions.load_failed() {
        msg_warning!(Message::StorageLoadDegraded("study_sessions".to_string()));
    }

    match args.command {
        SessionCommand::List { course } => {
            let listed: Vec<StudySession> = match course {
                Some(course) => {
                    let course_id = courses
                        .all()
                        .iter()
                        .find(|c| c.id.starts_with(&course))
                        .map_or(course, |c| c.id.clone());
                    sessions.by_course(&course_id).into_iter().cloned().collect()
                }
                None => sessions.all().to_vec(),
            };
            if listed.is_empty() {
                msg_print!(Message::NoSessions);
            } else {
                View::sessions(&listed, courses.all());
            }
        }
        SessionCommand::Delete { id } => {
            let Some(existing) = sessions
                .get(&id)
                .or_else(|| sessions.all().iter().find(|s| s.id.starts_with(&id)))
            else {
                msg_bail_anyhow!(Message::SessionNotFound(id));
            };
            let session_id = existing.id.clone();
            sessions.delete(&session_id);
            msg_success!(Message::SessionDeleted);
        }
    }

    sessions.flush().await;
    if let Some(detail) = sessions.take_write_error() {
        msg_warning!(Message::StorageWriteFailed(detail));
    }
    Ok(())
}
