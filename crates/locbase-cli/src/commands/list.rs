//! List command - print saved locations.

use anyhow::{Context, Result};

use locbase_store::Store;

use super::format_records;
use crate::cli::OutputFormat;
use crate::style;

/// Execute the list command.
pub async fn cmd_list(
    store: &Store,
    format: OutputFormat,
    quiet: bool,
    no_color: bool,
) -> Result<()> {
    store
        .initialize()
        .await
        .context("Failed to initialize location database")?;
    let records = store
        .select_all()
        .await
        .context("Failed to load locations")?;

    if records.is_empty() && format != OutputFormat::Json {
        if !quiet {
            println!(
                "{}",
                style::muted(
                    "No locations saved. Run 'locbase capture' to add one.",
                    no_color
                )
            );
        }
        return Ok(());
    }

    println!("{}", format_records(&records, format, no_color)?);
    Ok(())
}
