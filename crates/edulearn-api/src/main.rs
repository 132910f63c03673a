//! Edulearn CLI and REST API entry point.
//!
//! Binary name: `edl`
//!
//! Parses CLI arguments, loads configuration, initializes tracing, the
//! database and services, then dispatches to the appropriate command handler
//! or starts the REST API server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use edulearn_infra::config::load_global_config;
use edulearn_infra::data_dir::resolve_data_dir;
use edulearn_observe::tracing_setup::{init_tracing, shutdown_tracing, TracingOptions};
use edulearn_types::course::CourseId;
use edulearn_types::lesson::LessonId;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need config or app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "edl", &mut std::io::stdout());
        return Ok(());
    }

    let data_dir = resolve_data_dir();
    let config = load_global_config(&data_dir).await;

    // Set up tracing based on verbosity; RUST_LOG wins when set
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 if matches!(cli.command, Commands::Serve { .. }) => "info",
        0 => "warn",
        1 => "info,edulearn_api=debug,edulearn_core=debug,edulearn_infra=debug",
        _ => "trace",
    };
    let options = TracingOptions::new(filter)
        .json(config.json_logs)
        .otel(config.enable_otel);
    init_tracing(&options)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Initialize application state (DB, services)
    let state = AppState::init(data_dir, config).await?;

    let result = run(cli, state).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli, state: AppState) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            if !cli.quiet {
                println!(
                    "  {} Edulearn API listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}/api/courses/")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }
            tracing::info!(%addr, "server started");

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            tracing::info!("server stopped");
            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Course { action } => {
            cli::course::handle_course_command(action, &state, cli.json).await?;
        }

        Commands::Lesson { action } => {
            cli::lesson::handle_lesson_command(action, &state, cli.json).await?;
        }

        Commands::Enroll {
            email,
            course,
            name,
        } => {
            cli::student::enroll(&state, &email, CourseId(course), name.as_deref(), cli.json)
                .await?;
        }

        Commands::Complete { email, lesson } => {
            cli::student::complete(&state, &email, LessonId(lesson), cli.json).await?;
        }

        Commands::Progress { course, email } => {
            cli::student::progress(&state, CourseId(course), email.as_deref(), cli.json).await?;
        }

        Commands::Key { action } => {
            cli::key::handle_key_command(action, &state, cli.json).await?;
        }

        Commands::Status => {
            cli::status::status(&state, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
