//! CLI command definitions and dispatch for the `edl` binary.
//!
//! Uses clap derive macros for argument parsing. Catalog management is grouped
//! under nouns (`edl course create`, `edl lesson add`); the student actions
//! are top-level verbs (`edl enroll`, `edl complete`, `edl progress`).
//!
//! The CLI talks to the database directly and acts as a local staff operator.

pub mod course;
pub mod key;
pub mod lesson;
pub mod status;
pub mod student;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use console::style;

use edulearn_types::actor::Actor;

/// Email recorded for catalog changes made from the command line.
pub const LOCAL_OPERATOR: &str = "operator@localhost";

/// The actor every CLI command runs as.
pub fn local_operator() -> Actor {
    Actor::staff(LOCAL_OPERATOR)
}

/// Manage Edulearn courses, lessons and students.
#[derive(Parser)]
#[command(name = "edl", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (defaults to config.toml, then 8000).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to config.toml, then 127.0.0.1).
        #[arg(long)]
        host: Option<String>,
    },

    /// Manage courses (create, list, show, update, delete, students).
    Course {
        #[command(subcommand)]
        action: course::CourseCommand,
    },

    /// Manage lessons (add, update, delete).
    Lesson {
        #[command(subcommand)]
        action: lesson::LessonCommand,
    },

    /// Enroll a student in a course, creating the student on first use.
    Enroll {
        /// Student email.
        #[arg(long)]
        email: String,

        /// Course id.
        #[arg(long)]
        course: i64,

        /// Student name, recorded only when the student is created.
        #[arg(long)]
        name: Option<String>,
    },

    /// Mark a lesson completed for an existing student.
    Complete {
        /// Student email.
        #[arg(long)]
        email: String,

        /// Lesson id.
        #[arg(long)]
        lesson: i64,
    },

    /// Show a student's progress through a course.
    Progress {
        /// Course id.
        #[arg(long)]
        course: i64,

        /// Student email. Omit to see the lesson count only.
        #[arg(long)]
        email: Option<String>,
    },

    /// Manage API keys (create, list).
    Key {
        #[command(subcommand)]
        action: key::KeyCommand,
    },

    /// System status dashboard.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Ask before a destructive action. `--force` and `--json` skip the prompt.
pub(crate) fn confirm(prompt: String, force: bool, json: bool) -> anyhow::Result<bool> {
    if force || json {
        return Ok(true);
    }

    let confirmed = dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;

    if !confirmed {
        println!("  Cancelled.");
    }
    Ok(confirmed)
}

/// Print a one-line success message.
pub(crate) fn success(message: impl std::fmt::Display) {
    println!("  {} {}", style("✓").green().bold(), message);
}
