//! Capture command - one permission request, one fix, one saved row.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result, bail};
use tracing::info;

use locbase_core::{CaptureOutcome, LocationProvider, capture_once};
use locbase_store::Store;
use locbase_types::LocationRecord;

use super::format_records;
use crate::cli::OutputFormat;
use crate::style;

/// Execute the capture command.
pub async fn cmd_capture(
    store: &Store,
    provider: &dyn LocationProvider,
    format: OutputFormat,
    quiet: bool,
    no_color: bool,
) -> Result<()> {
    let spinner = (!quiet && io::stderr().is_terminal())
        .then(|| style::capture_spinner(provider.name()));

    let outcome = capture_once(provider).await;
    if let Some(sp) = &spinner {
        sp.finish_and_clear();
    }

    let coordinate = match outcome.context("Failed to capture location")? {
        CaptureOutcome::Captured(coordinate) => coordinate,
        CaptureOutcome::Denied => bail!("Permission to access location was denied"),
    };

    store
        .initialize()
        .await
        .context("Failed to initialize location database")?;
    let id = store
        .insert(coordinate)
        .await
        .context("Failed to save location")?;
    info!(id, %coordinate, "Saved location");

    let record = LocationRecord::new(id, coordinate);
    let content = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&record)?,
        _ => format_records(&[record], format, no_color)?,
    };
    println!("{}", content);
    Ok(())
}
