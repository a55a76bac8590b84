//! `university student add|get|list|courses`

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use university_core::{Student, StudentId};

use super::{block_on, connect, output};

#[derive(Subcommand, Debug)]
pub enum StudentCommand {
    /// Register a new student. Fails if the id is already taken.
    Add(AddStudentArgs),

    /// Show one student.
    Get(StudentQueryArgs),

    /// List all students in registration order.
    List(ListArgs),

    /// List the courses a student is enrolled in.
    Courses(StudentQueryArgs),
}

#[derive(Args, Debug)]
pub struct AddStudentArgs {
    /// Student identifier (e.g. national ID number).
    pub id: String,

    #[arg(long)]
    pub first_names: String,

    #[arg(long)]
    pub last_names: String,

    /// Degree program (e.g. "Systems Engineering").
    #[arg(long)]
    pub program: String,
}

#[derive(Args, Debug)]
pub struct StudentQueryArgs {
    pub id: String,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run(server: &str, cmd: StudentCommand) -> Result<()> {
    block_on(run_async(server, cmd))?
}

async fn run_async(server: &str, cmd: StudentCommand) -> Result<()> {
    let client = connect(server).await?;
    match cmd {
        StudentCommand::Add(args) => {
            let student = Student {
                id: StudentId::from(args.id),
                first_names: args.first_names,
                last_names: args.last_names,
                program: args.program,
            };
            let id = student.id.clone();
            let added = client
                .add_student(student)
                .await
                .with_context(|| format!("failed to add student '{id}'"))?;
            println!("✓ Added student {} ({})", added.full_name(), added.id);
        }
        StudentCommand::Get(args) => {
            let id = StudentId::from(args.id);
            let student = client
                .get_student(&id)
                .await
                .with_context(|| format!("failed to get student '{id}'"))?;
            output::print_student(&student, args.json)?;
        }
        StudentCommand::List(args) => {
            let students = client
                .list_students()
                .await
                .context("failed to list students")?;
            output::print_students("Students", &students, args.json)?;
        }
        StudentCommand::Courses(args) => {
            let id = StudentId::from(args.id);
            let courses = client
                .courses_for_student(&id)
                .await
                .with_context(|| format!("failed to list courses of student '{id}'"))?;
            output::print_courses(&format!("Courses of {id}"), &courses, args.json)?;
        }
    }
    Ok(())
}
