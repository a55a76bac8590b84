//! `university enroll <student-id> <course-code>`

use anyhow::{Context, Result};
use clap::Args;

use university_core::{CourseCode, StudentId};

use super::{block_on, connect};

/// Enroll a student in a course.
#[derive(Args, Debug)]
pub struct EnrollArgs {
    pub student_id: String,
    pub course_code: String,
}

impl EnrollArgs {
    pub fn run(self, server: &str) -> Result<()> {
        block_on(self.run_async(server))?
    }

    async fn run_async(self, server: &str) -> Result<()> {
        let client = connect(server).await?;
        let student_id = StudentId::from(self.student_id);
        let course_code = CourseCode::from(self.course_code);
        let message = client
            .enroll(&student_id, &course_code)
            .await
            .with_context(|| format!("failed to enroll '{student_id}' in '{course_code}'"))?;
        println!("✓ {message}");
        Ok(())
    }
}
