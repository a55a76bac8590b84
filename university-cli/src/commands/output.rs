//! Table and JSON rendering shared by the client commands.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use university_core::{Course, Student};

#[derive(Tabled)]
struct StudentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "PROGRAM")]
    program: String,
}

#[derive(Tabled)]
struct CourseRow {
    #[tabled(rename = "CODE")]
    code: String,
    #[tabled(rename = "TITLE")]
    title: String,
    #[tabled(rename = "INSTRUCTOR")]
    instructor: String,
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("failed to serialize JSON output")?
    );
    Ok(())
}

pub fn print_students(heading: &str, students: &[Student], json: bool) -> Result<()> {
    if json {
        return print_json(students);
    }
    println!("{} ({})", heading.bold(), students.len());
    if students.is_empty() {
        println!("{}", "No students.".bright_black());
        return Ok(());
    }
    let rows = students.iter().map(|s| StudentRow {
        id: s.id.to_string(),
        name: s.full_name(),
        program: s.program.clone(),
    });
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}

pub fn print_courses(heading: &str, courses: &[Course], json: bool) -> Result<()> {
    if json {
        return print_json(courses);
    }
    println!("{} ({})", heading.bold(), courses.len());
    if courses.is_empty() {
        println!("{}", "No courses.".bright_black());
        return Ok(());
    }
    let rows = courses.iter().map(|c| CourseRow {
        code: c.code.to_string(),
        title: c.title.clone(),
        instructor: c.instructor.clone(),
    });
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}

pub fn print_student(student: &Student, json: bool) -> Result<()> {
    if json {
        return print_json(student);
    }
    print_students("Student", std::slice::from_ref(student), json)
}

pub fn print_course(course: &Course, json: bool) -> Result<()> {
    if json {
        return print_json(course);
    }
    print_courses("Course", std::slice::from_ref(course), json)
}
