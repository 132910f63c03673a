//! Course CLI commands: create, list, show, update, delete, students.

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use edulearn_types::course::{CourseId, CourseUpdate, NewCourse};

use crate::cli::{confirm, local_operator, success};
use crate::state::AppState;

/// Course management subcommands.
#[derive(Subcommand)]
pub enum CourseCommand {
    /// Create a course.
    Create {
        /// Course title.
        #[arg(long)]
        title: String,

        /// Duration in hours.
        #[arg(long)]
        duration: i32,

        /// Longer description.
        #[arg(long, default_value = "")]
        description: String,

        /// Thumbnail image path.
        #[arg(long)]
        thumbnail: Option<String>,
    },

    /// List all courses.
    #[command(alias = "ls")]
    List,

    /// Show a course and its lessons.
    Show {
        /// Course id.
        id: i64,
    },

    /// Update fields of a course. Omitted fields are left as they are.
    Update {
        /// Course id.
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        duration: Option<i32>,

        #[arg(long, conflicts_with = "clear_thumbnail")]
        thumbnail: Option<String>,

        /// Remove the thumbnail.
        #[arg(long)]
        clear_thumbnail: bool,
    },

    /// Delete a course with its lessons, enrollments and completions.
    #[command(alias = "rm")]
    Delete {
        /// Course id.
        id: i64,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// List students enrolled in a course.
    Students {
        /// Course id.
        id: i64,
    },
}

/// Dispatch a `course` subcommand.
pub async fn handle_course_command(action: CourseCommand, state: &AppState, json: bool) -> Result<()> {
    match action {
        CourseCommand::Create {
            title,
            duration,
            description,
            thumbnail,
        } => {
            let request = NewCourse {
                title,
                description,
                duration,
                thumbnail,
            };
            create_course(state, request, json).await
        }
        CourseCommand::List => list_courses(state, json).await,
        CourseCommand::Show { id } => show_course(state, CourseId(id), json).await,
        CourseCommand::Update {
            id,
            title,
            description,
            duration,
            thumbnail,
            clear_thumbnail,
        } => {
            let thumbnail = if clear_thumbnail {
                Some(None)
            } else {
                thumbnail.map(Some)
            };
            let update = CourseUpdate {
                title,
                description,
                duration,
                thumbnail,
            };
            update_course(state, CourseId(id), update, json).await
        }
        CourseCommand::Delete { id, force } => delete_course(state, CourseId(id), force, json).await,
        CourseCommand::Students { id } => list_students(state, CourseId(id), json).await,
    }
}

async fn create_course(state: &AppState, request: NewCourse, json: bool) -> Result<()> {
    let course = state.catalog.create_course(&local_operator(), request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&course)?);
        return Ok(());
    }

    success(format!(
        "Course {} created: {}",
        style(course.id).bold(),
        style(&course).cyan()
    ));
    println!(
        "    Add lessons with: {}",
        style(format!("edl lesson add --course {} --title <title>", course.id)).yellow()
    );
    Ok(())
}

/// List all courses with their lesson counts.
async fn list_courses(state: &AppState, json: bool) -> Result<()> {
    let outlines = state.catalog.list_outlines().await?;

    if json {
        let rows: Vec<serde_json::Value> = outlines
            .iter()
            .map(|o| {
                serde_json::json!({
                    "course": o.course,
                    "lessons": o.lessons.len(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if outlines.is_empty() {
        println!();
        println!(
            "  {} No courses yet. Create one with: {}",
            style("i").blue().bold(),
            style("edl course create --title <title> --duration <hours>").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("Hours").fg(Color::White),
        Cell::new("Lessons").fg(Color::White),
        Cell::new("Description").fg(Color::White),
    ]);

    for outline in &outlines {
        let course = &outline.course;
        table.add_row(vec![
            Cell::new(course.id).fg(Color::DarkGrey),
            Cell::new(&course.title).fg(Color::Cyan),
            Cell::new(course.duration),
            Cell::new(outline.lessons.len()),
            Cell::new(truncate(&course.description, 50)),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    Ok(())
}

async fn show_course(state: &AppState, id: CourseId, json: bool) -> Result<()> {
    let outline = state.catalog.get_outline(id).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "course": outline.course,
                "lessons": outline.lessons,
            }))?
        );
        return Ok(());
    }

    let course = &outline.course;
    println!();
    println!("  {}", style(&course.title).cyan().bold());
    println!("  {}  {} hrs", style("Duration:").bold(), course.duration);
    if let Some(thumbnail) = &course.thumbnail {
        println!("  {} {}", style("Thumbnail:").bold(), style(thumbnail).dim());
    }
    if !course.description.is_empty() {
        println!();
        println!("  {}", course.description);
    }
    println!();

    if outline.lessons.is_empty() {
        println!("  {}", style("No lessons yet.").dim());
    } else {
        println!("  {}", style("── Lessons ──").dim());
        for lesson in &outline.lessons {
            let video = match &lesson.video_url {
                Some(url) => format!("  {}", style(url).dim()),
                None => String::new(),
            };
            println!("  {:>4}  {}{}", style(lesson.id).dim(), lesson.title, video);
        }
    }
    println!();
    Ok(())
}

async fn update_course(state: &AppState, id: CourseId, update: CourseUpdate, json: bool) -> Result<()> {
    let course = state
        .catalog
        .update_course(&local_operator(), id, update)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&course)?);
    } else {
        success(format!("Course {} updated: {}", style(course.id).bold(), course));
    }
    Ok(())
}

async fn delete_course(state: &AppState, id: CourseId, force: bool, json: bool) -> Result<()> {
    let course = state.catalog.get_course(id).await?;

    let prompt = format!(
        "Permanently delete course '{}' with its lessons and enrollments?",
        style(&course.title).red().bold()
    );
    if !confirm(prompt, force, json)? {
        return Ok(());
    }

    state.catalog.delete_course(&local_operator(), id).await?;

    if json {
        println!("{}", serde_json::json!({"deleted": true, "id": id}));
    } else {
        println!(
            "  {} Course '{}' deleted.",
            style("✓").red().bold(),
            course.title
        );
    }
    Ok(())
}

async fn list_students(state: &AppState, id: CourseId, json: bool) -> Result<()> {
    let (course, roster) = state.enrollment.course_students(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&roster)?);
        return Ok(());
    }

    println!();
    println!(
        "  Students enrolled in {} ({})",
        style(&course.title).cyan().bold(),
        roster.len()
    );
    println!();

    if roster.is_empty() {
        println!(
            "  {} Nobody yet. Enroll someone with: {}",
            style("i").blue().bold(),
            style(format!("edl enroll --email <email> --course {}", course.id)).yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Email").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Enrolled").fg(Color::White),
    ]);

    for entry in &roster {
        table.add_row(vec![
            Cell::new(&entry.student.email).fg(Color::Cyan),
            Cell::new(entry.student.name.as_deref().unwrap_or("-")),
            Cell::new(entry.enrolled_at.format("%Y-%m-%d %H:%M")).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
    println!();
    Ok(())
}

/// Cut `s` to at most `max` characters, marking the cut with an ellipsis.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
}
