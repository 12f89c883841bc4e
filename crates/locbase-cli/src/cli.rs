//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use locbase_types::Coordinate;

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Bordered table
    Table,
    /// Machine-readable JSON
    Json,
}

/// Where location fixes come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// GeoClue2 location service (Linux)
    #[default]
    Geoclue,
    /// A fixed coordinate from --at or the config file
    Fixed,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Geoclue => write!(f, "geoclue"),
            ProviderKind::Fixed => write!(f, "fixed"),
        }
    }
}

/// Reusable location provider arguments
#[derive(Debug, Clone, Default, Args)]
pub struct ProviderArgs {
    /// Location provider (defaults to the config file, then geoclue)
    #[arg(short, long, value_enum)]
    pub provider: Option<ProviderKind>,

    /// Coordinate reported by the fixed provider; implies --provider fixed
    #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
    pub at: Option<Coordinate>,
}

#[derive(Parser)]
#[command(name = "locbase")]
#[command(author, version, about = "Capture and keep a log of your device's location", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Location database path
    #[arg(long, global = true, value_name = "PATH", env = "LOCBASE_DB")]
    pub db: Option<PathBuf>,

    /// Preference file path
    #[arg(long, global = true, value_name = "PATH", env = "LOCBASE_PREFS")]
    pub prefs: Option<PathBuf>,

    /// Configuration file path
    #[arg(long = "config", global = true, value_name = "PATH", env = "LOCBASE_CONFIG")]
    pub config_file: Option<PathBuf>,

    /// Command to run (opens the interactive screen when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Capture the current location and save it
    Capture {
        #[command(flatten)]
        provider: ProviderArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List saved locations
    #[command(alias = "ls")]
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete every saved location
    Clear {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Show record count, dark-mode preference and file locations
    Status {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show or change the dark-mode preference
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Open the interactive terminal screen
    #[cfg(feature = "tui")]
    Tui {
        #[command(flatten)]
        provider: ProviderArgs,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Theme subcommands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Subcommand)]
pub enum ThemeAction {
    /// Show the current preference
    #[default]
    Show,
    /// Flip the preference
    Toggle,
    /// Enable dark mode
    Dark,
    /// Disable dark mode
    Light,
}

/// Configuration keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    /// Location database path
    Db,
    /// Preference file path
    Prefs,
    /// Default location provider
    Provider,
    /// Coordinate used by the fixed provider (LAT,LON)
    FixedAt,
    /// Desktop id reported to GeoClue
    DesktopId,
}

/// Configuration subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
        /// Configuration value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Unset (remove) a configuration value
    Unset {
        /// Configuration key to remove
        #[arg(value_enum)]
        key: ConfigKey,
    },

    /// Show configuration file path
    Path,
}
