//! Command-line interface for capturing and keeping a log of locations.
//!
//! The `locbase` binary asks a location provider for the device's current
//! position, stores it in a local SQLite database, and shows what has been
//! saved. Running it without a subcommand opens an interactive terminal
//! screen.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `capture` | Capture the current location and save it |
//! | `list` | List saved locations |
//! | `clear` | Delete every saved location |
//! | `status` | Record count, dark-mode preference and file locations |
//! | `theme` | Show or change the dark-mode preference |
//! | `tui` | Open the interactive terminal screen |
//! | `config` | Manage CLI configuration |
//! | `completions` | Generate shell completions |
//!
//! # Configuration
//!
//! The CLI reads `~/.config/locbase/config.toml` (or platform equivalent):
//!
//! - `db`: Location database path
//! - `prefs`: Preference file path
//! - `provider.kind`: `geoclue` or `fixed`
//! - `provider.desktop_id`: Desktop id reported to GeoClue
//! - `provider.fixed`: Coordinate used by the fixed provider
//!
//! # Environment Variables
//!
//! - `LOCBASE_DB`, `LOCBASE_PREFS`, `LOCBASE_CONFIG`: Override file locations
//! - `NO_COLOR`: Disable colored output when set
//!
//! # Examples
//!
//! ```bash
//! locbase capture
//! locbase capture --at 52.52,13.405
//! locbase list --format json
//! locbase clear --yes
//! locbase theme toggle
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod provider;
pub mod style;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export core dependencies for convenience
pub use locbase_core;
pub use locbase_store;
pub use locbase_types;
