//! Status command - record count, dark-mode preference and file paths.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use locbase_store::{Preferences, Store};

use crate::cli::OutputFormat;
use crate::style;

#[derive(Debug, Serialize)]
struct StatusReport {
    database: Option<PathBuf>,
    preferences: PathBuf,
    locations: u64,
    dark_mode: bool,
}

/// Count rows without creating the database file when it does not exist yet.
async fn count_locations(store: &Store) -> Result<u64> {
    if let Some(path) = store.path()
        && !path.exists()
    {
        return Ok(0);
    }
    if !store.is_initialized().await? {
        return Ok(0);
    }
    Ok(store.count().await?)
}

/// Execute the status command.
pub async fn cmd_status(
    store: &Store,
    prefs: &Preferences,
    format: OutputFormat,
    no_color: bool,
) -> Result<()> {
    let report = StatusReport {
        database: store.path().map(|p| p.to_path_buf()),
        preferences: prefs.path().to_path_buf(),
        locations: count_locations(store)
            .await
            .context("Failed to read location database")?,
        dark_mode: prefs
            .dark_mode()
            .await
            .context("Failed to read preferences")?,
    };

    let database = report
        .database
        .as_ref()
        .map_or_else(|| "(in memory)".to_string(), |p| p.display().to_string());
    let dark_mode = if report.dark_mode { "on" } else { "off" };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => println!(
            "{}",
            style::fields_table(vec![
                ("Locations", report.locations.to_string()),
                ("Dark mode", dark_mode.to_string()),
                ("Database", database),
                ("Preferences", report.preferences.display().to_string()),
            ])
        ),
        OutputFormat::Text => {
            println!("{} {}", style::heading("Locations:  ", no_color), report.locations);
            println!("{} {}", style::heading("Dark mode:  ", no_color), dark_mode);
            println!(
                "{} {}",
                style::heading("Database:   ", no_color),
                style::muted(&database, no_color)
            );
            println!(
                "{} {}",
                style::heading("Preferences:", no_color),
                style::muted(&report.preferences.display().to_string(), no_color)
            );
        }
    }
    Ok(())
}
