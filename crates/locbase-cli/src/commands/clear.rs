//! Clear command - delete every saved location.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result, bail};
use dialoguer::Confirm;

use locbase_store::Store;

use crate::style;

/// Execute the clear command.
pub async fn cmd_clear(store: &Store, yes: bool, quiet: bool, no_color: bool) -> Result<()> {
    if !yes {
        if !io::stdin().is_terminal() {
            bail!(
                "Refusing to clear locations without confirmation.\n\
                 Pass --yes to clear from a script."
            );
        }

        let confirmed = Confirm::new()
            .with_prompt("Delete all saved locations?")
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            if !quiet {
                println!("Cancelled");
            }
            return Ok(());
        }
    }

    store
        .initialize()
        .await
        .context("Failed to initialize location database")?;
    let removed = store
        .delete_all()
        .await
        .context("Failed to clear locations")?;

    if !quiet {
        println!(
            "{}",
            style::success(&format!("Removed {} location(s)", removed), no_color)
        );
    }
    Ok(())
}
