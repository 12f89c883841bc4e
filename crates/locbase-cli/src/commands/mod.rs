//! Command implementations for the CLI.

mod capture;
mod clear;
mod configure;
mod list;
mod status;
mod theme;

pub use capture::cmd_capture;
pub use clear::cmd_clear;
pub use configure::cmd_config;
pub use list::cmd_list;
pub use status::cmd_status;
pub use theme::cmd_theme;

use anyhow::Result;

use locbase_types::LocationRecord;

use crate::cli::OutputFormat;
use crate::style;

/// Format records for `format`. Text output follows the list layout of the
/// interactive screen: a title line and an indented description line.
pub(crate) fn format_records(
    records: &[LocationRecord],
    format: OutputFormat,
    no_color: bool,
) -> Result<String> {
    let content = match format {
        OutputFormat::Json => serde_json::to_string_pretty(records)?,
        OutputFormat::Table => style::records_table(records),
        OutputFormat::Text => {
            let mut out = String::new();
            for record in records {
                out.push_str(&style::heading(&record.title(), no_color));
                out.push('\n');
                out.push_str("  ");
                out.push_str(&record.description());
                out.push('\n');
            }
            out.trim_end().to_string()
        }
    };
    Ok(content)
}
