use crate::libs::messages::Message;
use crate::libs::storage::Storage;
use crate::libs::view::View;
use crate::store::assignments::{Assignment, AssignmentForm, AssignmentType, Assignments, Priority};
use crate::store::courses::Courses;
use crate::{msg_bail_anyhow, msg_print, msg_success, msg_warning};
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct AssignmentArgs {
    #[command(subcommand)]
    command: AssignmentCommand,
}

#[derive(Debug, Subcommand)]
enum AssignmentCommand {
    #[command(about = "Add a new assignment")]
    Add {
        #[arg(long, help = "Assignment title")]
        title: String,
        #[arg(long, help = "Course id (prefix is enough)")]
        course: String,
        #[arg(long, help = "Due date: 'YYYY-MM-DD HH:MM' or 'YYYY-MM-DD' (23:59)")]
        due: String,
        #[arg(long = "type", value_enum, default_value = "assignment")]
        kind: AssignmentType,
        #[arg(long, value_enum, default_value = "medium")]
        priority: Priority,
        #[arg(long, default_value = "", help = "Additional notes")]
        description: String,
    },
    #[command(about = "List assignments")]
    List {
        #[arg(long, help = "Only incomplete assignments due from now on, soonest first")]
        upcoming: bool,
        #[arg(long, help = "Only assignments of this course (id prefix)")]
        course: Option<String>,
    },
    #[command(about = "Edit an assignment (unset fields keep their value)")]
    Edit {
        #[arg(help = "Assignment id (prefix is enough)")]
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, help = "Course id (prefix is enough)")]
        course: Option<String>,
        #[arg(long, help = "Due date: 'YYYY-MM-DD HH:MM' or 'YYYY-MM-DD'")]
        due: Option<String>,
        #[arg(long = "type", value_enum)]
        kind: Option<AssignmentType>,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        #[arg(long)]
        description: Option<String>,
    },
    #[command(about = "Toggle completion of an assignment")]
    Done {
        #[arg(help = "Assignment id (prefix is enough)")]
        id: String,
    },
    #[command(about = "Delete an assignment")]
    Delete {
        #[arg(help = "Assignment id (prefix is enough)")]
        id: String,
    },
}

pub async fn cmd(args: AssignmentArgs) -> Result<()> {
    let storage = Storage::new();
    let courses = Courses::load(&storage).await;
    let mut assignments = Assignments::load(&storage).await;
    if assignments.load_failed() {
        msg_warning!(Message::StorageLoadDegraded("assignments".to_string()));
    }

    match args.command {
        AssignmentCommand::Add {
            title,
            course,
            due,
            kind,
            priority,
            description,
        } => {
            // Course references may dangle; an unmatched value is kept
            // as given.
            let course_id = match resolve_course_id(&courses, &course) {
                Some(id) => id,
                None => course,
            };
            let assignment = assignments.add(AssignmentForm {
                title,
                course_id,
                due_date: parse_due(&due)?,
                kind,
                priority,
                description,
            });
            msg_success!(Message::AssignmentAdded(assignment.title));
        }
        AssignmentCommand::List { upcoming, course } => {
            let listed: Vec<Assignment> = if upcoming {
                assignments.upcoming()
            } else if let Some(course) = course {
                let course_id = resolve_course_id(&courses, &course).unwrap_or(course);
                assignments.by_course(&course_id).into_iter().cloned().collect()
            } else {
                assignments.all().to_vec()
            };
            if listed.is_empty() {
                msg_print!(if upcoming {
                    Message::NoUpcomingAssignments
                } else {
                    Message::NoAssignments
                });
            } else {
                View::assignments(&listed, courses.all());
            }
        }
        AssignmentCommand::Edit {
            id,
            title,
            course,
            due,
            kind,
            priority,
            description,
        } => {
            let Some(existing) = resolve(&assignments, &id) else {
                msg_bail_anyhow!(Message::AssignmentNotFound(id));
            };
            let course_id = match course {
                Some(course) => resolve_course_id(&courses, &course).unwrap_or(course),
                None => existing.course_id.clone(),
            };
            let form = AssignmentForm {
                title: title.unwrap_or_else(|| existing.title.clone()),
                course_id,
                due_date: match due {
                    Some(due) => parse_due(&due)?,
                    None => existing.due_date,
                },
                kind: kind.unwrap_or(existing.kind),
                priority: priority.unwrap_or(existing.priority),
                description: description.unwrap_or_else(|| existing.description.clone()),
            };
            let assignment_id = existing.id.clone();
            assignments.update(&assignment_id, form.clone());
            msg_success!(Message::AssignmentUpdated(form.title));
        }
        AssignmentCommand::Done { id } => {
            let Some(existing) = resolve(&assignments, &id) else {
                msg_bail_anyhow!(Message::AssignmentNotFound(id));
            };
            let assignment_id = existing.id.clone();
            let title = existing.title.clone();
            let was_completed = existing.completed;
            assignments.toggle_complete(&assignment_id);
            if was_completed {
                msg_success!(Message::AssignmentReopened(title));
            } else {
                msg_success!(Message::AssignmentCompleted(title));
            }
        }
        AssignmentCommand::Delete { id } => {
            let Some(existing) = resolve(&assignments, &id) else {
                msg_bail_anyhow!(Message::AssignmentNotFound(id));
            };
            let assignment_id = existing.id.clone();
            assignments.delete(&assignment_id);
            msg_success!(Message::AssignmentDeleted);
        }
    }

    assignments.flush().await;
    if let Some(detail) = assignments.take_write_error() {
        msg_warning!(Message::StorageWriteFailed(detail));
    }
    Ok(())
}

fn resolve<'a>(assignments: &'a Assignments, id: &str) -> Option<&'a Assignment> {
    assignments
        .get(id)
        .or_else(|| assignments.all().iter().find(|a| a.id.starts_with(id)))
}

fn resolve_course_id(courses: &Courses, id: &str) -> Option<String> {
    courses
        .get(id)
        .or_else(|| courses.all().iter().find(|c| c.id.starts_with(id)))
        .map(|c| c.id.clone())
}

/// Parses a due date; a bare date defaults to end of day.
fn parse_due(due: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(due, "%Y-%m-%d %H:%M") {
        return Ok(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(due, "%Y-%m-%d") {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN);
        return Ok(NaiveDateTime::new(date, end_of_day));
    }
    anyhow::bail!("invalid due date '{}', expected 'YYYY-MM-DD HH:MM' or 'YYYY-MM-DD'", due)
}
