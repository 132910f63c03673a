//! System status dashboard command.

use anyhow::Result;
use console::style;

use edulearn_core::repository::api_key::ApiKeyRepository;

use crate::state::AppState;

/// Display system status dashboard.
///
/// Shows catalog and student counts, issued keys, configuration and version.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let outlines = state.catalog.list_outlines().await?;
    let lessons: usize = outlines.iter().map(|o| o.lessons.len()).sum();
    let students = state.enrollment.student_count().await?;
    let keys = state.api_keys.list().await?;
    let staff_keys = keys.iter().filter(|k| k.is_staff).count();

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "catalog": {
                "courses": outlines.len(),
                "lessons": lessons,
            },
            "students": students,
            "api_keys": {
                "total": keys.len(),
                "staff": staff_keys,
            },
            "server": {
                "bind": state.config.server.bind_addr(),
                "otel": state.config.enable_otel,
            },
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Edulearn v{}",
        style("📚").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Catalog ──").dim());
    println!("  Courses:  {}", style(outlines.len()).bold());
    println!("  Lessons:  {}", style(lessons).bold());
    println!();

    println!("  {}", style("── Students ──").dim());
    println!("  Registered: {}", style(students).bold());
    println!();

    println!("  {}", style("── API Keys ──").dim());
    println!("  Issued: {}", style(keys.len()).bold());
    if staff_keys > 0 {
        println!("  Staff:  {}", style(staff_keys).yellow());
    }
    println!();

    println!("  {}", style("── System ──").dim());
    println!(
        "  Data dir: {}",
        style(state.data_dir.display()).dim()
    );
    println!(
        "  Database: {}",
        style("SQLite (WAL mode)").dim()
    );
    println!(
        "  Server:   {}",
        style(format!("http://{}", state.config.server.bind_addr())).dim()
    );
    println!();

    Ok(())
}
