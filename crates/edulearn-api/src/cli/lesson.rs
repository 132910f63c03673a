//! Lesson CLI commands: add, update, delete.

use anyhow::Result;
use clap::Subcommand;
use console::style;

use edulearn_types::course::CourseId;
use edulearn_types::lesson::{LessonId, LessonUpdate, NewLesson};

use crate::cli::{confirm, local_operator, success};
use crate::state::AppState;

/// Lesson management subcommands.
#[derive(Subcommand)]
pub enum LessonCommand {
    /// Add a lesson to a course.
    Add {
        /// Course id.
        #[arg(long)]
        course: i64,

        /// Lesson title.
        #[arg(long)]
        title: String,

        /// Lesson body text.
        #[arg(long, default_value = "")]
        content: String,

        /// Link to a video (http or https).
        #[arg(long)]
        video_url: Option<String>,
    },

    /// Update fields of a lesson. Omitted fields are left as they are.
    Update {
        /// Lesson id.
        id: i64,

        /// Move the lesson to another course.
        #[arg(long)]
        course: Option<i64>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        content: Option<String>,

        #[arg(long, conflicts_with = "clear_video")]
        video_url: Option<String>,

        /// Remove the video link.
        #[arg(long)]
        clear_video: bool,
    },

    /// Delete a lesson and its completion records.
    #[command(alias = "rm")]
    Delete {
        /// Lesson id.
        id: i64,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}

/// Dispatch a `lesson` subcommand.
pub async fn handle_lesson_command(action: LessonCommand, state: &AppState, json: bool) -> Result<()> {
    match action {
        LessonCommand::Add {
            course,
            title,
            content,
            video_url,
        } => {
            let request = NewLesson {
                course_id: CourseId(course),
                title,
                content,
                video_url,
            };
            let lesson = state.catalog.create_lesson(&local_operator(), request).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&lesson)?);
            } else {
                success(format!(
                    "Lesson {} '{}' added to course {}",
                    style(lesson.id).bold(),
                    style(&lesson.title).cyan(),
                    lesson.course_id
                ));
            }
        }

        LessonCommand::Update {
            id,
            course,
            title,
            content,
            video_url,
            clear_video,
        } => {
            let video_url = if clear_video {
                Some(None)
            } else {
                video_url.map(Some)
            };
            let update = LessonUpdate {
                course_id: course.map(CourseId),
                title,
                content,
                video_url,
            };
            let lesson = state
                .catalog
                .update_lesson(&local_operator(), LessonId(id), update)
                .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&lesson)?);
            } else {
                success(format!(
                    "Lesson {} updated: '{}'",
                    style(lesson.id).bold(),
                    lesson.title
                ));
            }
        }

        LessonCommand::Delete { id, force } => {
            let lesson = state.catalog.get_lesson(LessonId(id)).await?;

            let prompt = format!(
                "Delete lesson '{}' and everyone's completion of it?",
                style(&lesson.title).red().bold()
            );
            if !confirm(prompt, force, json)? {
                return Ok(());
            }

            state.catalog.delete_lesson(&local_operator(), lesson.id).await?;

            if json {
                println!("{}", serde_json::json!({"deleted": true, "id": lesson.id}));
            } else {
                println!(
                    "  {} Lesson '{}' deleted.",
                    style("✓").red().bold(),
                    lesson.title
                );
            }
        }
    }

    Ok(())
}
