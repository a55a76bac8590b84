//! `university demo`: a scripted session against a running server.
//!
//! Registers one student and two courses, enrolls the student in both,
//! shows that a repeated enrollment is rejected, then prints both relation
//! queries and the full listings.

use anyhow::{bail, Context, Result};
use colored::Colorize;

use university_core::{Course, CourseCode, Student, StudentId};
use university_server::{ClientError, UniversityClient};

use super::{block_on, connect, output};

pub fn run(server: &str) -> Result<()> {
    block_on(run_async(server))?
}

fn sample_student() -> Student {
    Student {
        id: StudentId::from("12345"),
        first_names: "Ros".to_string(),
        last_names: "Icela".to_string(),
        program: "Systems Engineering".to_string(),
    }
}

fn sample_courses() -> [Course; 2] {
    [
        Course {
            code: CourseCode::from("SIS-103"),
            title: "Programming Fundamentals".to_string(),
            instructor: "Dr. Carlos Rodriguez".to_string(),
        },
        Course {
            code: CourseCode::from("MAT-20"),
            title: "Differential Calculus".to_string(),
            instructor: "Dra. Ana Martinez".to_string(),
        },
    ]
}

fn step(n: u32, text: &str) {
    println!("\n{} {}", format!("{n}.").bold(), text.bold());
}

async fn run_async(server: &str) -> Result<()> {
    let client = connect(server).await?;
    let student = sample_student();
    let courses = sample_courses();

    step(1, "Registering a student");
    let added = client
        .add_student(student.clone())
        .await
        .context("failed to register demo student")?;
    println!("  ✓ {} ({})", added.full_name(), added.id);

    step(2, "Registering courses");
    for course in &courses {
        let added = client
            .add_course(course.clone())
            .await
            .with_context(|| format!("failed to register demo course '{}'", course.code))?;
        println!("  ✓ {} ({})", added.title, added.code);
    }

    step(3, "Enrolling the student in both courses");
    for course in &courses {
        let message = client
            .enroll(&student.id, &course.code)
            .await
            .with_context(|| format!("failed to enroll in '{}'", course.code))?;
        println!("  ✓ {message}");
    }
    expect_duplicate_rejected(&client, &student, &courses[0]).await?;

    step(4, "Courses of the student");
    let enrolled = client
        .courses_for_student(&student.id)
        .await
        .context("failed to list the student's courses")?;
    output::print_courses(&format!("Courses of {}", student.first_names), &enrolled, false)?;

    step(5, &format!("Students in {}", courses[0].title));
    let attending = client
        .students_for_course(&courses[0].code)
        .await
        .context("failed to list the course's students")?;
    output::print_students(&format!("Students in {}", courses[0].code), &attending, false)?;

    step(6, "Registry summary");
    let students = client.list_students().await.context("failed to list students")?;
    output::print_students("Students", &students, false)?;
    let all_courses = client.list_courses().await.context("failed to list courses")?;
    output::print_courses("Courses", &all_courses, false)?;

    println!("\n{}", "Demo completed.".green().bold());
    Ok(())
}

async fn expect_duplicate_rejected(
    client: &UniversityClient,
    student: &Student,
    course: &Course,
) -> Result<()> {
    match client.enroll(&student.id, &course.code).await {
        Err(ClientError::AlreadyExists(message)) => {
            println!("  ✓ duplicate enrollment rejected: {}", message.yellow());
            Ok(())
        }
        Err(err) => Err(err).context("duplicate enrollment failed with the wrong error"),
        Ok(_) => bail!("duplicate enrollment of '{}' in '{}' was accepted", student.id, course.code),
    }
}
