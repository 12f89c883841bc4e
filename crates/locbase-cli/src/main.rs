use std::fs::{self, OpenOptions};
use std::io::{self, IsTerminal};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use locbase_cli::cli::{Cli, Commands};
use locbase_cli::commands::{cmd_capture, cmd_clear, cmd_config, cmd_list, cmd_status, cmd_theme};
use locbase_cli::config::{Config, resolve_db_path, resolve_prefs_path, resolve_provider};
use locbase_cli::provider::build_provider;
use locbase_store::{Preferences, Store, default_data_dir};

/// File the TUI logs to, since stderr belongs to the screen.
const TUI_LOG_FILE: &str = "locbase.log";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "locbase", &mut io::stdout());
        return Ok(());
    }

    init_tracing(&cli)?;

    let config_path = cli.config_file.clone().unwrap_or_else(Config::default_path);
    let config = Config::load_from(&config_path);

    let store = Store::open(resolve_db_path(cli.db.clone(), &config));
    let prefs = Preferences::open(resolve_prefs_path(cli.prefs.clone(), &config));
    let no_color = cli.no_color || !io::stdout().is_terminal();

    match cli.command {
        Some(Commands::Capture { provider, format }) => {
            let provider = build_provider(&resolve_provider(&provider, &config))?;
            cmd_capture(&store, provider.as_ref(), format, cli.quiet, no_color).await?;
        }
        Some(Commands::List { format }) => {
            cmd_list(&store, format, cli.quiet, no_color).await?;
        }
        Some(Commands::Clear { yes }) => {
            cmd_clear(&store, yes, cli.quiet, no_color).await?;
        }
        Some(Commands::Status { format }) => {
            cmd_status(&store, &prefs, format, no_color).await?;
        }
        Some(Commands::Theme { action }) => {
            cmd_theme(&prefs, action.unwrap_or_default()).await?;
        }
        Some(Commands::Config { action }) => {
            cmd_config(action, &config_path)?;
        }
        #[cfg(feature = "tui")]
        Some(Commands::Tui { provider }) => {
            let provider = build_provider(&resolve_provider(&provider, &config))?;
            locbase_cli::tui::run(store, prefs, provider).await?;
        }
        #[cfg(feature = "tui")]
        None => {
            let args = locbase_cli::cli::ProviderArgs::default();
            let provider = build_provider(&resolve_provider(&args, &config))?;
            locbase_cli::tui::run(store, prefs, provider).await?;
        }
        #[cfg(not(feature = "tui"))]
        None => {
            Cli::command().print_help()?;
        }
        Some(Commands::Completions { .. }) => {
            // Already handled above
            unreachable!()
        }
    }

    Ok(())
}

/// Initialize tracing.
///
/// Interactive runs log to a file in the data directory; everything else logs
/// to stderr.
fn init_tracing(cli: &Cli) -> Result<()> {
    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let interactive = match &cli.command {
        None => cfg!(feature = "tui"),
        #[cfg(feature = "tui")]
        Some(Commands::Tui { .. }) => true,
        Some(_) => false,
    };

    if interactive {
        let dir = default_data_dir();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let path = dir.join(TUI_LOG_FILE);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }

    Ok(())
}
