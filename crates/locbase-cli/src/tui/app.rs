//! Application state for the TUI.
//!
//! This module contains the state of the single location screen: the
//! in-memory list of records, the activity in progress, the dark-mode flag,
//! and transient status messages.

use std::time::Instant;

use tokio::sync::mpsc;

use locbase_types::LocationRecord;

use super::messages::{AppEvent, Command};
use super::ui::theme::AppTheme;

/// Maximum number of queued status messages.
const MAX_STATUS_MESSAGES: usize = 5;

/// What the screen is currently doing.
///
/// Capture and clear are only accepted while [`Activity::Idle`]; the
/// dark-mode switch works in every state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    /// Nothing in flight.
    #[default]
    Idle,
    /// Reading the preference and the saved locations.
    Loading,
    /// Waiting for permission, a fix, and the insert.
    Capturing,
    /// Deleting every saved location.
    Clearing,
}

impl Activity {
    /// Whether an operation is in flight.
    pub fn is_busy(self) -> bool {
        self != Activity::Idle
    }

    /// Short label for the status bar.
    pub fn label(self) -> &'static str {
        match self {
            Activity::Idle => "Ready",
            Activity::Loading => "Loading locations...",
            Activity::Capturing => "Capturing location...",
            Activity::Clearing => "Clearing locations...",
        }
    }
}

/// Actions that require user confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Delete every saved location.
    ClearLocations,
}

/// Main application state for the TUI.
pub struct App {
    /// Whether the application should exit.
    pub should_quit: bool,
    /// Operation in flight.
    pub activity: Activity,
    /// Whether dark mode is enabled.
    pub dark_mode: bool,
    /// Whether the user has toggled dark mode in this session.
    pub dark_mode_chosen: bool,
    /// Dark-mode value still waiting for room in the worker queue.
    pub deferred_dark_mode: Option<bool>,
    /// Records shown in the list, in display order.
    pub locations: Vec<LocationRecord>,
    /// Index of the highlighted record.
    pub selected: usize,
    /// Queue of status messages with their creation time.
    pub status_messages: Vec<(String, Instant)>,
    /// How long to show each status message (in seconds).
    pub status_message_timeout: u64,
    /// Whether to show the help overlay.
    pub show_help: bool,
    /// Pending confirmation action.
    pub pending_confirmation: Option<PendingAction>,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
    /// Channel for receiving events from the background worker.
    pub event_rx: mpsc::Receiver<AppEvent>,
}

impl App {
    /// Create a new application reading worker events from `event_rx`.
    pub fn new(event_rx: mpsc::Receiver<AppEvent>) -> Self {
        Self {
            should_quit: false,
            activity: Activity::Idle,
            dark_mode: false,
            dark_mode_chosen: false,
            deferred_dark_mode: None,
            locations: Vec::new(),
            selected: 0,
            status_messages: Vec::new(),
            status_message_timeout: 5,
            show_help: false,
            pending_confirmation: None,
            spinner_frame: 0,
            event_rx,
        }
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Whether capture and clear are currently refused.
    pub fn is_busy(&self) -> bool {
        self.activity.is_busy()
    }

    /// Get the palette matching the dark-mode flag.
    #[must_use]
    pub fn app_theme(&self) -> AppTheme {
        if self.dark_mode {
            AppTheme::dark()
        } else {
            AppTheme::light()
        }
    }

    /// Start the launch sequence.
    pub fn start_launch(&mut self) -> Option<Command> {
        if self.is_busy() {
            return None;
        }
        self.activity = Activity::Loading;
        Some(Command::Launch)
    }

    /// Start a capture unless something else is in flight.
    pub fn request_capture(&mut self) -> Option<Command> {
        if self.is_busy() {
            return None;
        }
        self.activity = Activity::Capturing;
        Some(Command::Capture)
    }

    /// Ask for confirmation before clearing, unless something is in flight.
    ///
    /// An empty list still asks: the store may hold rows the list failed to
    /// load.
    pub fn request_clear(&mut self) {
        if self.is_busy() {
            return;
        }
        self.pending_confirmation = Some(PendingAction::ClearLocations);
    }

    /// Confirm the pending action.
    pub fn confirm_action(&mut self) -> Option<Command> {
        match self.pending_confirmation.take()? {
            PendingAction::ClearLocations => {
                if self.is_busy() {
                    return None;
                }
                self.activity = Activity::Clearing;
                Some(Command::Clear)
            }
        }
    }

    /// Cancel the pending action.
    pub fn cancel_confirmation(&mut self) {
        self.pending_confirmation = None;
        self.push_status_message("Cancelled".to_string());
    }

    /// Flip dark mode. Works regardless of the activity in flight.
    pub fn toggle_dark_mode(&mut self) -> Command {
        self.dark_mode = !self.dark_mode;
        self.dark_mode_chosen = true;
        Command::SetDarkMode {
            enabled: self.dark_mode,
        }
    }

    /// Add a status message to the queue.
    pub fn push_status_message(&mut self, message: String) {
        self.status_messages.push((message, Instant::now()));
        while self.status_messages.len() > MAX_STATUS_MESSAGES {
            self.status_messages.remove(0);
        }
    }

    /// Remove expired status messages.
    pub fn clean_expired_messages(&mut self) {
        let timeout = std::time::Duration::from_secs(self.status_message_timeout);
        self.status_messages
            .retain(|(_, created)| created.elapsed() < timeout);
    }

    /// Get the current status message to display.
    pub fn current_status_message(&self) -> Option<&str> {
        self.status_messages.last().map(|(msg, _)| msg.as_str())
    }

    /// Handle an incoming worker event and update state accordingly.
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::PreferenceLoaded { dark_mode } => {
                // A toggle made while loading wins over the stored value.
                if !self.dark_mode_chosen {
                    self.dark_mode = dark_mode;
                }
            }
            AppEvent::LocationsLoaded { records } => {
                self.locations = records;
                self.clamp_selection();
                self.activity = Activity::Idle;
            }
            AppEvent::PermissionDenied => {
                self.push_status_message("Permission to access location was denied".to_string());
                self.activity = Activity::Idle;
            }
            AppEvent::LocationCaptured { record } => {
                self.locations.push(record);
                self.selected = self.locations.len() - 1;
            }
            AppEvent::CaptureComplete { stored_id } => {
                match stored_id {
                    Some(_) => self.push_status_message("Location saved".to_string()),
                    None => self.push_status_message("Location not saved".to_string()),
                }
                self.activity = Activity::Idle;
            }
            AppEvent::CaptureFailed { error } => {
                self.push_status_message(format!("Capture failed: {}", error));
                self.activity = Activity::Idle;
            }
            AppEvent::LocationsCleared { removed } => {
                self.locations.clear();
                self.selected = 0;
                match removed {
                    Some(count) => {
                        self.push_status_message(format!("Removed {} location(s)", count));
                    }
                    None => self.push_status_message("Clearing failed".to_string()),
                }
                self.activity = Activity::Idle;
            }
            AppEvent::StoreError { context, error } => {
                self.push_status_message(format!("{}: {}", context, error));
            }
            AppEvent::DarkModeSaved { .. } => {}
            AppEvent::PreferenceError { error } => {
                self.push_status_message(format!("Preference error: {}", error));
            }
        }
    }

    /// Select the next record.
    pub fn select_next(&mut self) {
        if !self.locations.is_empty() {
            self.selected = (self.selected + 1).min(self.locations.len() - 1);
        }
    }

    /// Select the previous record.
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.locations.len().saturating_sub(1));
    }

    /// Advance the spinner animation frame.
    pub fn tick_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % 10;
    }

    /// Get the current spinner character.
    pub fn spinner_char(&self) -> &'static str {
        const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
        SPINNER[self.spinner_frame]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locbase_types::Coordinate;

    fn app() -> App {
        let (_tx, rx) = mpsc::channel(1);
        App::new(rx)
    }

    fn record(id: i64) -> LocationRecord {
        LocationRecord::new(id, Coordinate::new(id as f64, -(id as f64)))
    }

    #[test]
    fn test_starts_idle_in_light_mode() {
        let app = app();
        assert_eq!(app.activity, Activity::Idle);
        assert!(!app.dark_mode);
        assert!(app.locations.is_empty());
    }

    #[test]
    fn test_launch_loads_preference_and_records() {
        let mut app = app();
        assert_eq!(app.start_launch(), Some(Command::Launch));
        assert_eq!(app.activity, Activity::Loading);

        app.handle_event(AppEvent::PreferenceLoaded { dark_mode: true });
        app.handle_event(AppEvent::LocationsLoaded {
            records: vec![record(1), record(2)],
        });

        assert!(app.dark_mode);
        assert_eq!(app.locations.len(), 2);
        assert_eq!(app.activity, Activity::Idle);
    }

    #[test]
    fn test_capture_refused_while_busy() {
        let mut app = app();
        app.start_launch();
        assert_eq!(app.request_capture(), None);

        app.handle_event(AppEvent::LocationsLoaded { records: vec![] });
        assert_eq!(app.request_capture(), Some(Command::Capture));
        assert_eq!(app.activity, Activity::Capturing);
        assert_eq!(app.request_capture(), None);
    }

    #[test]
    fn test_captured_record_is_appended_before_save() {
        let mut app = app();
        app.handle_event(AppEvent::LocationsLoaded {
            records: vec![record(1)],
        });
        app.request_capture();

        app.handle_event(AppEvent::LocationCaptured {
            record: record(1_700_000_000_000),
        });
        assert_eq!(app.locations.len(), 2);
        assert_eq!(app.locations[1].id, 1_700_000_000_000);
        assert!(app.is_busy());

        // A failed save keeps the provisional record on screen.
        app.handle_event(AppEvent::CaptureComplete { stored_id: None });
        assert_eq!(app.locations.len(), 2);
        assert_eq!(app.activity, Activity::Idle);
    }

    #[test]
    fn test_denied_capture_leaves_list_unchanged() {
        let mut app = app();
        app.handle_event(AppEvent::LocationsLoaded {
            records: vec![record(1)],
        });
        app.request_capture();
        app.handle_event(AppEvent::PermissionDenied);

        assert_eq!(app.locations, vec![record(1)]);
        assert_eq!(app.activity, Activity::Idle);
        assert!(app.current_status_message().unwrap().contains("denied"));
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let mut app = app();
        app.handle_event(AppEvent::LocationsLoaded {
            records: vec![record(1), record(2)],
        });

        app.request_clear();
        assert_eq!(app.pending_confirmation, Some(PendingAction::ClearLocations));
        assert_eq!(app.activity, Activity::Idle);

        assert_eq!(app.confirm_action(), Some(Command::Clear));
        assert_eq!(app.activity, Activity::Clearing);

        app.handle_event(AppEvent::LocationsCleared { removed: Some(2) });
        assert!(app.locations.is_empty());
        assert_eq!(app.activity, Activity::Idle);
    }

    #[test]
    fn test_failed_clear_still_empties_list() {
        let mut app = app();
        app.handle_event(AppEvent::LocationsLoaded {
            records: vec![record(1)],
        });
        app.request_clear();
        app.confirm_action();

        app.handle_event(AppEvent::LocationsCleared { removed: None });
        assert!(app.locations.is_empty());
        assert_eq!(app.activity, Activity::Idle);
    }

    #[test]
    fn test_cancel_confirmation() {
        let mut app = app();
        app.handle_event(AppEvent::LocationsLoaded {
            records: vec![record(1)],
        });
        app.request_clear();
        app.cancel_confirmation();

        assert!(app.pending_confirmation.is_none());
        assert_eq!(app.confirm_action(), None);
        assert_eq!(app.locations.len(), 1);
    }

    #[test]
    fn test_dark_mode_toggle_ignores_busy() {
        let mut app = app();
        app.start_launch();
        assert!(app.is_busy());

        assert_eq!(
            app.toggle_dark_mode(),
            Command::SetDarkMode { enabled: true }
        );
        assert!(app.dark_mode);
        assert_eq!(
            app.toggle_dark_mode(),
            Command::SetDarkMode { enabled: false }
        );
        assert!(!app.dark_mode);
    }

    #[test]
    fn test_toggle_while_loading_survives_stored_preference() {
        let mut app = app();
        app.start_launch();
        assert_eq!(
            app.toggle_dark_mode(),
            Command::SetDarkMode { enabled: true }
        );

        app.handle_event(AppEvent::PreferenceLoaded { dark_mode: false });
        assert!(app.dark_mode);
        assert_eq!(app.app_theme(), AppTheme::dark());
    }

    #[test]
    fn test_clear_after_failed_load_reaches_store() {
        let mut app = app();
        app.start_launch();
        app.handle_event(AppEvent::StoreError {
            context: "Loading failed".to_string(),
            error: "disk I/O error".to_string(),
        });
        app.handle_event(AppEvent::LocationsLoaded { records: vec![] });

        app.request_clear();
        assert_eq!(app.pending_confirmation, Some(PendingAction::ClearLocations));
        assert_eq!(app.confirm_action(), Some(Command::Clear));
        assert_eq!(app.activity, Activity::Clearing);
    }

    #[test]
    fn test_palette_follows_dark_mode() {
        let mut app = app();
        assert_eq!(app.app_theme().background, AppTheme::light().background);
        app.toggle_dark_mode();
        assert_eq!(app.app_theme().background, AppTheme::dark().background);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = app();
        app.select_next();
        assert_eq!(app.selected, 0);

        app.handle_event(AppEvent::LocationsLoaded {
            records: vec![record(1), record(2)],
        });
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 1);
        app.select_previous();
        app.select_previous();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_status_queue_is_bounded() {
        let mut app = app();
        for i in 0..10 {
            app.push_status_message(format!("message {}", i));
        }
        assert_eq!(app.status_messages.len(), MAX_STATUS_MESSAGES);
        assert_eq!(app.current_status_message(), Some("message 9"));
    }
}
