//! Visual styling utilities for the CLI.
//!
//! This module provides consistent styling across CLI output:
//! - Spinner for waiting on a location fix
//! - Colored text helpers that respect `--no-color`
//! - Table rendering for records and status

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use locbase_types::LocationRecord;

/// Standard spinner tick characters (Braille dots animation)
const SPINNER_TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Standard spinner tick interval
const SPINNER_TICK_MS: u64 = 80;

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(SPINNER_TICK_CHARS)
}

/// Create a spinner shown while waiting for a location fix.
pub fn capture_spinner(provider: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(spinner_style());
    pb.set_message(format!("Waiting for a location fix ({})...", provider));
    pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
    pb
}

/// Bold heading text.
pub fn heading(text: &str, no_color: bool) -> String {
    if no_color {
        text.to_string()
    } else {
        text.bold().to_string()
    }
}

/// Green text for completed actions.
pub fn success(text: &str, no_color: bool) -> String {
    if no_color {
        text.to_string()
    } else {
        text.green().to_string()
    }
}

/// Yellow text for warnings.
pub fn warning(text: &str, no_color: bool) -> String {
    if no_color {
        text.to_string()
    } else {
        text.yellow().to_string()
    }
}

/// Dimmed text for secondary details.
pub fn muted(text: &str, no_color: bool) -> String {
    if no_color {
        text.to_string()
    } else {
        text.dimmed().to_string()
    }
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Latitude")]
    latitude: f64,
    #[tabled(rename = "Longitude")]
    longitude: f64,
}

/// Render records as a rounded table.
pub fn records_table(records: &[LocationRecord]) -> String {
    let rows = records.iter().map(|r| RecordRow {
        id: r.id,
        latitude: r.latitude,
        longitude: r.longitude,
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// Render `(field, value)` pairs as a rounded two-column table.
pub fn fields_table(fields: Vec<(&'static str, String)>) -> String {
    let rows = fields
        .into_iter()
        .map(|(field, value)| FieldRow { field, value });
    Table::new(rows).with(Style::rounded()).to_string()
}
