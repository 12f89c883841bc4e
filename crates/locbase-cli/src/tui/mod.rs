//! Interactive location screen.
//!
//! This module ties together the TUI components and runs the main event
//! loop. It handles:
//!
//! - Terminal setup and restoration
//! - Channel creation for worker communication
//! - The main event loop with input handling and rendering
//! - Graceful shutdown coordination

pub mod app;
pub mod input;
pub mod messages;
pub mod ui;
pub mod worker;

pub use app::{Activity, App};
pub use messages::{AppEvent, Command};
pub use worker::LocationWorker;

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{info, warn};

use locbase_core::{LocationProvider, SharedProvider};
use locbase_store::{Preferences, Store};

/// How long to wait for the worker after the UI has closed.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Set up the terminal for TUI rendering.
///
/// Enables raw mode and switches to the alternate screen buffer.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI application.
///
/// This is the main entry point for the TUI. It:
/// 1. Creates communication channels between UI and worker
/// 2. Spawns the background location worker
/// 3. Queues the launch sequence (dark-mode preference, then the list)
/// 4. Runs the main event loop
/// 5. Ensures graceful shutdown
pub async fn run(store: Store, prefs: Preferences, provider: SharedProvider) -> Result<()> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>(32);
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    info!(
        db = ?store.path(),
        prefs = %prefs.path().display(),
        provider = provider.name(),
        "Starting TUI"
    );

    let worker = LocationWorker::new(cmd_rx, event_tx, store, prefs, provider.clone());
    let mut worker_handle = tokio::spawn(worker.run());

    let mut app = App::new(event_rx);

    let mut terminal = setup_terminal()?;

    if let Some(cmd) = app.start_launch() {
        dispatch(&mut app, &cmd_tx, cmd);
    }

    let result = run_event_loop(&mut terminal, &mut app, &cmd_tx).await;

    // A capture may still be waiting on the provider.
    provider.cancel();
    let _ = cmd_tx.try_send(Command::Shutdown);

    restore_terminal()?;

    if tokio::time::timeout(SHUTDOWN_GRACE, &mut worker_handle)
        .await
        .is_err()
    {
        warn!("Worker did not stop in time, aborting");
        worker_handle.abort();
    }

    result
}

/// Queue `cmd` for the worker without blocking the UI.
///
/// When the queue is full a dark-mode change is kept on the [`App`] and
/// retried by [`flush_deferred`]; any other command is dropped with a note
/// and the screen goes back to idle.
fn dispatch(app: &mut App, command_tx: &mpsc::Sender<Command>, cmd: Command) {
    if let Command::SetDarkMode { enabled } = cmd
        && app.deferred_dark_mode.is_some()
    {
        // Sending now would overtake the older deferred value.
        app.deferred_dark_mode = Some(enabled);
        return;
    }

    match command_tx.try_send(cmd) {
        Ok(()) => {}
        Err(TrySendError::Full(Command::SetDarkMode { enabled })) => {
            app.deferred_dark_mode = Some(enabled);
        }
        Err(TrySendError::Full(cmd)) => {
            warn!(?cmd, "Worker queue full, dropping command");
            app.activity = Activity::Idle;
            app.push_status_message("Busy, try again".to_string());
        }
        Err(TrySendError::Closed(cmd)) => {
            warn!(?cmd, "Worker has stopped, dropping command");
            app.activity = Activity::Idle;
        }
    }
}

/// Retry a dark-mode change that did not fit in the worker queue.
fn flush_deferred(app: &mut App, command_tx: &mpsc::Sender<Command>) {
    if let Some(enabled) = app.deferred_dark_mode.take() {
        dispatch(app, command_tx, Command::SetDarkMode { enabled });
    }
}

/// Main event loop for the TUI.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    command_tx: &mpsc::Sender<Command>,
) -> Result<()> {
    while !app.should_quit() {
        app.tick_spinner();
        app.clean_expired_messages();

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let action = input::handle_key(key.code, app.pending_confirmation.is_some());
            if let Some(cmd) = input::apply_action(app, action) {
                dispatch(app, command_tx, cmd);
            }
        }

        flush_deferred(app, command_tx);

        // Non-blocking receive of worker events
        while let Ok(event) = app.event_rx.try_recv() {
            app.handle_event(event);
        }
    }

    Ok(())
}
