//! `university course add|get|list|students`

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use university_core::{Course, CourseCode};

use super::{block_on, connect, output, student::ListArgs};

#[derive(Subcommand, Debug)]
pub enum CourseCommand {
    /// Register a new course. Fails if the code is already taken.
    Add(AddCourseArgs),

    /// Show one course.
    Get(CourseQueryArgs),

    /// List all courses in registration order.
    List(ListArgs),

    /// List the students enrolled in a course.
    Students(CourseQueryArgs),
}

#[derive(Args, Debug)]
pub struct AddCourseArgs {
    /// Course code (e.g. "SIS-103").
    pub code: String,

    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub instructor: String,
}

#[derive(Args, Debug)]
pub struct CourseQueryArgs {
    pub code: String,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run(server: &str, cmd: CourseCommand) -> Result<()> {
    block_on(run_async(server, cmd))?
}

async fn run_async(server: &str, cmd: CourseCommand) -> Result<()> {
    let client = connect(server).await?;
    match cmd {
        CourseCommand::Add(args) => {
            let course = Course {
                code: CourseCode::from(args.code),
                title: args.title,
                instructor: args.instructor,
            };
            let code = course.code.clone();
            let added = client
                .add_course(course)
                .await
                .with_context(|| format!("failed to add course '{code}'"))?;
            println!("✓ Added course {} ({})", added.title, added.code);
        }
        CourseCommand::Get(args) => {
            let code = CourseCode::from(args.code);
            let course = client
                .get_course(&code)
                .await
                .with_context(|| format!("failed to get course '{code}'"))?;
            output::print_course(&course, args.json)?;
        }
        CourseCommand::List(args) => {
            let courses = client
                .list_courses()
                .await
                .context("failed to list courses")?;
            output::print_courses("Courses", &courses, args.json)?;
        }
        CourseCommand::Students(args) => {
            let code = CourseCode::from(args.code);
            let students = client
                .students_for_course(&code)
                .await
                .with_context(|| format!("failed to list students of course '{code}'"))?;
            output::print_students(&format!("Students in {code}"), &students, args.json)?;
        }
    }
    Ok(())
}
