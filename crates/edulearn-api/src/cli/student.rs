//! Student CLI commands: enroll, complete, progress.

use anyhow::Result;
use console::style;

use edulearn_types::course::CourseId;
use edulearn_types::enrollment::EnrollmentOutcome;
use edulearn_types::lesson::LessonId;

use crate::cli::success;
use crate::state::AppState;

/// Enroll a student in a course.
///
/// # Examples
///
/// ```bash
/// edl enroll --email ada@example.com --course 3 --name "Ada Lovelace"
/// ```
pub async fn enroll(
    state: &AppState,
    email: &str,
    course_id: CourseId,
    name: Option<&str>,
    json: bool,
) -> Result<()> {
    let result = state.enrollment.enroll(email, course_id, name).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match result.outcome {
        EnrollmentOutcome::Enrolled => success(result.message()),
        EnrollmentOutcome::AlreadyEnrolled => {
            println!("  {} {}", style("i").blue().bold(), result.message());
        }
    }
    if result.student_created {
        println!("    {}", style("New student record created.").dim());
    }
    Ok(())
}

/// Mark a lesson completed for an existing student.
pub async fn complete(state: &AppState, email: &str, lesson_id: LessonId, json: bool) -> Result<()> {
    let result = state.enrollment.mark_completed(email, lesson_id).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "email": result.student.email,
                "lesson_id": result.lesson.id,
                "course_id": result.course_id(),
                "newly_completed": result.newly_completed,
            }))?
        );
        return Ok(());
    }

    if result.newly_completed {
        success(format!(
            "{} completed '{}'",
            result.student.email,
            style(&result.lesson.title).cyan()
        ));
    } else {
        println!(
            "  {} {} had already completed '{}'",
            style("i").blue().bold(),
            result.student.email,
            result.lesson.title
        );
    }
    println!(
        "    See progress with: {}",
        style(format!(
            "edl progress --course {} --email {}",
            result.course_id(),
            result.student.email
        ))
        .yellow()
    );
    Ok(())
}

/// Show progress through a course, for a student or for nobody in particular.
pub async fn progress(
    state: &AppState,
    course_id: CourseId,
    email: Option<&str>,
    json: bool,
) -> Result<()> {
    let course = state.catalog.get_course(course_id).await?;
    let progress = state.enrollment.course_progress(email, course_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&progress)?);
        return Ok(());
    }

    println!();
    println!("  {}", style(&course.title).cyan().bold());
    match &progress.student {
        Some(student) => println!("  {} {}", style("Student:").bold(), student),
        None => println!("  {}", style("No student record for this viewer.").dim()),
    }
    println!(
        "  {} {}/{} lessons  {}",
        style("Progress:").bold(),
        progress.completed_count(),
        progress.total_lessons,
        format_percentage(progress.percentage, progress.is_complete())
    );
    println!("  {}", bar(progress.percentage, 30));
    println!();
    Ok(())
}

fn format_percentage(percentage: f64, complete: bool) -> String {
    let text = format!("{percentage:.2}%");
    if complete {
        style(text).green().bold().to_string()
    } else if percentage > 0.0 {
        style(text).yellow().to_string()
    } else {
        style(text).dim().to_string()
    }
}

/// Text progress bar `width` cells wide.
fn bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use edulearn_types::course::NewCourse;
    use edulearn_types::lesson::NewLesson;

    use crate::cli::local_operator;
    use crate::state::test_state;

    #[test]
    fn test_bar() {
        assert_eq!(bar(0.0, 4), "░░░░");
        assert_eq!(bar(50.0, 4), "██░░");
        assert_eq!(bar(100.0, 4), "████");
        assert_eq!(bar(33.33, 3), "█░░");
    }

    #[tokio::test]
    async fn test_enroll_complete_progress_flow() {
        let (state, _dir) = test_state().await;
        let operator = local_operator();
        let course = state
            .catalog
            .create_course(
                &operator,
                NewCourse {
                    title: "Rust".to_string(),
                    description: String::new(),
                    duration: 3,
                    thumbnail: None,
                },
            )
            .await
            .unwrap();
        let lesson = state
            .catalog
            .create_lesson(
                &operator,
                NewLesson {
                    course_id: course.id,
                    title: "Ownership".to_string(),
                    content: String::new(),
                    video_url: None,
                },
            )
            .await
            .unwrap();

        // Completing before the student exists fails.
        assert!(complete(&state, "ada@example.com", lesson.id, true).await.is_err());

        enroll(&state, "ada@example.com", course.id, Some("Ada"), true)
            .await
            .unwrap();
        complete(&state, "ada@example.com", lesson.id, true).await.unwrap();
        progress(&state, course.id, Some("ada@example.com"), true)
            .await
            .unwrap();

        let p = state
            .enrollment
            .course_progress(Some("ada@example.com"), course.id)
            .await
            .unwrap();
        assert!(p.is_complete());
    }
}
