//! University: in-memory student/course enrollment registry over gRPC.
//!
//! # Usage
//!
//! ```text
//! university serve [--listen <addr>] [--seed <roster.yaml>]
//! university student add <id> --first-names <..> --last-names <..> --program <..>
//! university student get|courses <id> [--json]
//! university student list [--json]
//! university course add <code> --title <..> --instructor <..>
//! university course get|students <code> [--json]
//! university course list [--json]
//! university enroll <student-id> <course-code>
//! university export <roster.yaml>
//! university demo
//! ```
//!
//! Client commands talk to `--server` (env `UNIVERSITY_SERVER`).

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    course::CourseCommand, enroll::EnrollArgs, export::ExportArgs, serve::ServeArgs,
    student::StudentCommand,
};
use university_server::config::{DEFAULT_SERVER_URI, SERVER_URI_ENV};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "university",
    version,
    about = "Register students and courses and manage enrollments",
    long_about = None,
)]
struct Cli {
    /// gRPC endpoint of a running `university serve`.
    #[arg(long, global = true, env = SERVER_URI_ENV, default_value = DEFAULT_SERVER_URI)]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the gRPC server in the foreground.
    Serve(ServeArgs),

    /// Register and query students.
    Student {
        #[command(subcommand)]
        command: StudentCommand,
    },

    /// Register and query courses.
    Course {
        #[command(subcommand)]
        command: CourseCommand,
    },

    /// Enroll a student in a course.
    Enroll(EnrollArgs),

    /// Write the server's full contents to a roster file usable with `serve --seed`.
    Export(ExportArgs),

    /// Walk through a sample session against the server.
    Demo,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(args) => args.run(),
        Commands::Student { command } => commands::student::run(&cli.server, command),
        Commands::Course { command } => commands::course::run(&cli.server, command),
        Commands::Enroll(args) => args.run(&cli.server),
        Commands::Export(args) => args.run(&cli.server),
        Commands::Demo => commands::demo::run(&cli.server),
    }
}
