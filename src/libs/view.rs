use crate::libs::agenda::AgendaEntry;
use crate::libs::due::classify;
use crate::libs::formatter::{day_short_name, format_duration, minutes_to_time_string};
use crate::libs::stats::{CourseStudyTime, DailyStudyTime};
use crate::store::assignments::Assignment;
use crate::store::courses::Course;
use crate::store::sessions::StudySession;
use chrono::{Datelike, Local};
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn courses(courses: &[Course]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "CODE", "NAME", "INSTRUCTOR", "LOCATION", "BLOCKS"]);
        for course in courses {
            table.add_row(row![
                short_id(&course.id),
                course.code,
                course.name,
                course.instructor,
                course.location,
                course.schedule.len()
            ]);
        }
        table.printstd();
    }

    pub fn assignments(assignments: &[Assignment], courses: &[Course]) {
        let now = Local::now().naive_local();
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "COURSE", "TYPE", "PRIORITY", "DUE", "DONE"]);
        for assignment in assignments {
            let course_code = courses
                .iter()
                .find(|c| c.id == assignment.course_id)
                .map_or("?", |c| c.code.as_str());
            table.add_row(row![
                short_id(&assignment.id),
                assignment.title,
                course_code,
                format!("{:?}", assignment.kind).to_lowercase(),
                format!("{:?}", assignment.priority).to_lowercase(),
                classify(assignment.due_date, now),
                if assignment.completed { "✔" } else { "" }
            ]);
        }
        table.printstd();
    }

    pub fn sessions(sessions: &[StudySession], courses: &[Course]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "COURSE", "DATE", "START", "END", "DURATION", "NOTES"]);
        for session in sessions {
            let course_code = courses
                .iter()
                .find(|c| c.id == session.course_id)
                .map_or("?", |c| c.code.as_str());
            table.add_row(row![
                short_id(&session.id),
                course_code,
                session.date.format("%Y-%m-%d"),
                session.start_time.format("%H:%M"),
                session.end_time.format("%H:%M"),
                format_duration(session.duration, false),
                session.notes
            ]);
        }
        table.printstd();
    }

    pub fn agenda(entries: &[AgendaEntry]) {
        let mut table = Table::new();

        table.add_row(row!["TIME", "WHAT", "DETAIL"]);
        for entry in entries {
            match entry {
                AgendaEntry::Class { course, schedule } => {
                    table.add_row(row![
                        format!("{} - {}", schedule.start_time, schedule.end_time),
                        format!("Class: {}", course.code),
                        course.location
                    ]);
                }
                AgendaEntry::Assignment { assignment, course } => {
                    table.add_row(row![
                        minutes_to_time_string(entry.time_of_day()),
                        format!("Due: {}", assignment.title),
                        course.as_ref().map_or("?".to_string(), |c| c.code.clone())
                    ]);
                }
            }
        }
        table.printstd();
    }

    pub fn study_by_course(by_course: &[CourseStudyTime], courses: &[Course]) {
        let mut table = Table::new();

        table.add_row(row!["COURSE", "STUDIED"]);
        for entry in by_course {
            let course_code = courses
                .iter()
                .find(|c| c.id == entry.course_id)
                .map_or("?", |c| c.code.as_str());
            table.add_row(row![course_code, format_duration(entry.seconds, false)]);
        }
        table.printstd();
    }

    pub fn daily_series(series: &[DailyStudyTime]) {
        let mut table = Table::new();

        table.add_row(row!["DAY", "STUDIED"]);
        for day in series {
            table.add_row(row![
                day_short_name(day.date.weekday().num_days_from_sunday() as usize),
                format_duration(day.seconds, false)
            ]);
        }
        table.printstd();
    }
}

// Records carry UUIDs; eight characters are enough for the console.
fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
