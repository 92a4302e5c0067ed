use crate::libs::messages::Message;
use crate::libs::storage::Storage;
use crate::libs::view::View;
use crate::store::courses::{CourseForm, CourseSchedule, Courses};
use crate::{msg_bail_anyhow, msg_print, msg_success, msg_warning};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct CourseArgs {
    #[command(subcommand)]
    command: CourseCommand,
}

#[derive(Debug, Subcommand)]
enum CourseCommand {
    #[command(about = "Add a new course")]
    Add {
        #[arg(long, help = "Course name")]
        name: String,
        #[arg(long, help = "Course code, e.g. CS101")]
        code: String,
        #[arg(long, default_value = "", help = "Instructor name")]
        instructor: String,
        #[arg(long, default_value = "", help = "Room or building")]
        location: String,
        #[arg(long, default_value = "#13A4EC", help = "Display color as hex")]
        color: String,
        #[arg(
            long = "block",
            value_name = "DAY:START-END",
            help = "Weekly block like 1:09:00-10:30 (0 = Sunday), repeatable"
        )]
        blocks: Vec<String>,
    },
    #[command(about = "List all courses")]
    List,
    #[command(about = "Edit a course (unset fields keep their value)")]
    Edit {
        #[arg(help = "Course id (prefix is enough)")]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        instructor: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long = "block", value_name = "DAY:START-END", help = "Replaces the whole schedule when given")]
        blocks: Vec<String>,
    },
    #[command(about = "Delete a course (assignments and sessions keep their reference)")]
    Delete {
        #[arg(help = "Course id (prefix is enough)")]
        id: String,
    },
}

pub async fn cmd(args: CourseArgs) -> Result<()> {
    let storage = Storage::new();
    let mut courses = Courses::load(&storage).await;
    if courses.load_failed() {
        msg_warning!(Message::StorageLoadDegraded("courses".to_string()));
    }

    match args.command {
        CourseCommand::Add {
            name,
            code,
            instructor,
            location,
            color,
            blocks,
        } => {
            let schedule = parse_blocks(&blocks)?;
            let course = courses.add(CourseForm {
                name,
                code,
                instructor,
                location,
                color,
                schedule,
            });
            msg_success!(Message::CourseAdded(course.name));
        }
        CourseCommand::List => {
            if courses.all().is_empty() {
                msg_print!(Message::NoCourses);
            } else {
                View::courses(courses.all());
            }
        }
        CourseCommand::Edit {
            id,
            name,
            code,
            instructor,
            location,
            color,
            blocks,
        } => {
            let Some(existing) = resolve(&courses, &id) else {
                msg_bail_anyhow!(Message::CourseNotFound(id));
            };
            let form = CourseForm {
                name: name.unwrap_or_else(|| existing.name.clone()),
                code: code.unwrap_or_else(|| existing.code.clone()),
                instructor: instructor.unwrap_or_else(|| existing.instructor.clone()),
                location: location.unwrap_or_else(|| existing.location.clone()),
                color: color.unwrap_or_else(|| existing.color.clone()),
                schedule: if blocks.is_empty() {
                    existing.schedule.clone()
                } else {
                    parse_blocks(&blocks)?
                },
            };
            let course_id = existing.id.clone();
            courses.update(&course_id, form.clone());
            msg_success!(Message::CourseUpdated(form.name));
        }
        CourseCommand::Delete { id } => {
            let Some(existing) = resolve(&courses, &id) else {
                msg_bail_anyhow!(Message::CourseNotFound(id));
            };
            let course_id = existing.id.clone();
            courses.delete(&course_id);
            msg_success!(Message::CourseDeleted);
        }
    }

    courses.flush().await;
    if let Some(detail) = courses.take_write_error() {
        msg_warning!(Message::StorageWriteFailed(detail));
    }
    Ok(())
}

/// Looks up a course by full id or unique-enough prefix.
fn resolve<'a>(courses: &'a Courses, id: &str) -> Option<&'a crate::store::courses::Course> {
    courses.get(id).or_else(|| courses.all().iter().find(|c| c.id.starts_with(id)))
}

/// Parses "DAY:START-END" blocks like "1:09:00-10:30".
fn parse_blocks(blocks: &[String]) -> Result<Vec<CourseSchedule>> {
    blocks
        .iter()
        .map(|block| {
            let (day, times) = block
                .split_once(':')
                .ok_or_else(|| anyhow::anyhow!("invalid schedule block '{}'", block))?;
            let (start, end) = times
                .split_once('-')
                .ok_or_else(|| anyhow::anyhow!("invalid schedule block '{}'", block))?;
            let day: u8 = day.parse().map_err(|_| anyhow::anyhow!("invalid weekday in '{}'", block))?;
            if day > 6 {
                anyhow::bail!("weekday must be 0-6 in '{}'", block);
            }
            Ok(CourseSchedule {
                day,
                start_time: start.to_string(),
                end_time: end.to_string(),
            })
        })
        .collect()
}
