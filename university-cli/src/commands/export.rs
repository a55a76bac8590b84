//! `university export <path>`: dump the server's registry as a roster file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use university_core::{roster, EnrollmentPair, Roster};
use university_server::UniversityClient;

use super::{block_on, connect};

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Destination YAML file. Parent directories are created as needed.
    pub path: PathBuf,
}

impl ExportArgs {
    pub fn run(self, server: &str) -> Result<()> {
        let roster = block_on(async {
            let client = connect(server).await?;
            fetch_roster(&client).await
        })??;

        roster::save_roster_at(&self.path, &roster)
            .with_context(|| format!("failed to write roster to {}", self.path.display()))?;
        println!(
            "✓ Exported {} students, {} courses, {} enrollments to {}",
            roster.students.len(),
            roster.courses.len(),
            roster.enrollments.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Rebuild the full roster through the public operations.
async fn fetch_roster(client: &UniversityClient) -> Result<Roster> {
    let students = client
        .list_students()
        .await
        .context("failed to list students")?;
    let courses = client
        .list_courses()
        .await
        .context("failed to list courses")?;

    let mut enrollments = Vec::new();
    for student in &students {
        let enrolled = client
            .courses_for_student(&student.id)
            .await
            .with_context(|| format!("failed to list courses of student '{}'", student.id))?;
        enrollments.extend(
            enrolled
                .into_iter()
                .map(|course| EnrollmentPair::new(student.id.clone(), course.code)),
        );
    }

    Ok(Roster {
        students,
        courses,
        enrollments,
    })
}
