//! API key CLI commands: create, list.

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use edulearn_core::repository::api_key::ApiKeyRepository;
use edulearn_types::student::normalize_email;

use crate::state::AppState;

/// API key subcommands.
#[derive(Subcommand)]
pub enum KeyCommand {
    /// Issue a new API key. The key is printed once and never stored in plaintext.
    Create {
        /// Email the key acts as.
        #[arg(long)]
        email: String,

        /// Grant staff privileges (catalog management).
        #[arg(long)]
        staff: bool,
    },

    /// List issued keys (metadata only).
    #[command(alias = "ls")]
    List,
}

/// Dispatch a `key` subcommand.
pub async fn handle_key_command(action: KeyCommand, state: &AppState, json: bool) -> Result<()> {
    match action {
        KeyCommand::Create { email, staff } => {
            let email = normalize_email(&email).map_err(|e| anyhow::anyhow!(e))?;
            let key = state.api_keys.issue(&email, staff).await?;

            if json {
                println!(
                    "{}",
                    serde_json::json!({"email": email, "is_staff": staff, "key": key})
                );
                return Ok(());
            }

            println!();
            println!(
                "  {} API key issued for {}{} (save this -- it won't be shown again):",
                style("🔑").bold(),
                style(&email).cyan(),
                if staff { " [staff]" } else { "" }
            );
            println!();
            println!("  {}", style(&key).yellow().bold());
            println!();
            println!(
                "  Use it with: {}",
                style("Authorization: Bearer <key>").dim()
            );
            println!();
        }

        KeyCommand::List => {
            let records = state.api_keys.list().await?;

            if json {
                let rows: Vec<serde_json::Value> = records
                    .iter()
                    .map(|r| {
                        serde_json::json!({
                            "id": r.id,
                            "email": r.email,
                            "is_staff": r.is_staff,
                            "created_at": r.created_at.to_rfc3339(),
                            "last_used_at": r.last_used_at.map(|t| t.to_rfc3339()),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
                return Ok(());
            }

            if records.is_empty() {
                println!();
                println!(
                    "  {} No API keys. Issue one with: {}",
                    style("i").blue().bold(),
                    style("edl key create --email <email>").yellow()
                );
                println!();
                return Ok(());
            }

            let mut table = Table::new();
            table.load_preset(presets::UTF8_FULL_CONDENSED);
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec![
                Cell::new("Email").fg(Color::White),
                Cell::new("Role").fg(Color::White),
                Cell::new("Created").fg(Color::White),
                Cell::new("Last Used").fg(Color::White),
            ]);

            for record in &records {
                let role = if record.is_staff {
                    Cell::new("staff").fg(Color::Yellow)
                } else {
                    Cell::new("student")
                };
                let last_used = record
                    .last_used_at
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "never".to_string());
                table.add_row(vec![
                    Cell::new(&record.email).fg(Color::Cyan),
                    role,
                    Cell::new(record.created_at.format("%Y-%m-%d %H:%M")).fg(Color::DarkGrey),
                    Cell::new(last_used).fg(Color::DarkGrey),
                ]);
            }

            println!();
            println!("{table}");
            println!();
        }
    }

    Ok(())
}
