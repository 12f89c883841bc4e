//! Keyboard input handling for the TUI.
//!
//! This module translates keyboard events into high-level actions and
//! applies those actions to the application state.
//!
//! # Key Bindings
//!
//! | Key       | Action                 |
//! |-----------|------------------------|
//! | `q`       | Quit                   |
//! | `c`       | Capture location       |
//! | `x`       | Clear locations        |
//! | `t`       | Toggle dark mode       |
//! | `↓` / `j` | Select next            |
//! | `↑` / `k` | Select previous        |
//! | `?`       | Toggle help            |

use crossterm::event::KeyCode;

use super::app::App;
use super::messages::Command;

/// User actions that can be triggered by keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Capture the current location.
    Capture,
    /// Clear every saved location (asks first).
    Clear,
    /// Toggle dark mode.
    ToggleDarkMode,
    /// Select the next record.
    SelectNext,
    /// Select the previous record.
    SelectPrevious,
    /// Toggle the help overlay.
    ToggleHelp,
    /// Confirm pending action.
    Confirm,
    /// Cancel pending action.
    Cancel,
    /// No action (unrecognized key).
    None,
}

/// Map a key code to an action.
///
/// While a confirmation dialog is open only `y`/`n`/`Esc` are recognized.
pub fn handle_key(key: KeyCode, has_pending_confirmation: bool) -> Action {
    if has_pending_confirmation {
        return match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => Action::Confirm,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::Cancel,
            _ => Action::None,
        };
    }

    match key {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('c') | KeyCode::Enter => Action::Capture,
        KeyCode::Char('x') | KeyCode::Delete => Action::Clear,
        KeyCode::Char('t') | KeyCode::Char('d') => Action::ToggleDarkMode,
        KeyCode::Down | KeyCode::Char('j') => Action::SelectNext,
        KeyCode::Up | KeyCode::Char('k') => Action::SelectPrevious,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Esc => Action::Cancel,
        _ => Action::None,
    }
}

/// Apply an action to the application state.
///
/// Returns `Some(Command)` when the background worker has to do something.
pub fn apply_action(app: &mut App, action: Action) -> Option<Command> {
    match action {
        Action::Quit => {
            app.should_quit = true;
            None
        }
        Action::Capture => {
            let cmd = app.request_capture();
            if cmd.is_none() {
                app.push_status_message(format!("Busy: {}", app.activity.label()));
            }
            cmd
        }
        Action::Clear => {
            if app.is_busy() {
                app.push_status_message(format!("Busy: {}", app.activity.label()));
                return None;
            }
            app.request_clear();
            None
        }
        Action::ToggleDarkMode => Some(app.toggle_dark_mode()),
        Action::SelectNext => {
            app.select_next();
            None
        }
        Action::SelectPrevious => {
            app.select_previous();
            None
        }
        Action::ToggleHelp => {
            app.show_help = !app.show_help;
            None
        }
        Action::Confirm => app.confirm_action(),
        Action::Cancel => {
            if app.pending_confirmation.is_some() {
                app.cancel_confirmation();
            } else {
                app.show_help = false;
            }
            None
        }
        Action::None => None,
    }
}
