//! Message types for UI/worker communication.
//!
//! This module defines the command and event enums exchanged between the
//! interactive shell and the background worker that owns the store and the
//! location provider.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     Command      +------------------+
//! |    UI Thread     | --------------> |  LocationWorker  |
//! |    (ratatui)     |                 |  (tokio runtime) |
//! |                  | <-------------- |                  |
//! +------------------+     AppEvent     +------------------+
//! ```
//!
//! - [`Command`]: Messages sent from the UI thread to the background worker
//! - [`AppEvent`]: Events sent from the worker back to the UI thread

use locbase_types::LocationRecord;

/// Commands sent from the UI thread to the background worker.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Read the dark-mode preference, initialize the store and load all
    /// saved locations.
    Launch,

    /// Request permission, read one fix and save it.
    Capture,

    /// Delete every saved location.
    Clear,

    /// Persist the dark-mode preference.
    SetDarkMode {
        /// The new preference value.
        enabled: bool,
    },

    /// Shut down the worker.
    Shutdown,
}

/// Events sent from the background worker to the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The stored dark-mode preference was read (false when absent).
    PreferenceLoaded {
        /// Whether dark mode is enabled.
        dark_mode: bool,
    },

    /// The saved locations were loaded. Empty when loading failed.
    LocationsLoaded {
        /// Records in the order the store returned them.
        records: Vec<LocationRecord>,
    },

    /// Location permission was refused; nothing was captured.
    PermissionDenied,

    /// A fix was obtained. The record carries a provisional id and is shown
    /// before it is saved.
    LocationCaptured {
        /// The captured record.
        record: LocationRecord,
    },

    /// A capture finished, successfully saved or not.
    CaptureComplete {
        /// Id assigned by the store, or `None` if saving failed.
        stored_id: Option<i64>,
    },

    /// A capture failed before a fix was obtained.
    CaptureFailed {
        /// Description of the error.
        error: String,
    },

    /// The clear operation finished. The list is empty either way.
    LocationsCleared {
        /// Rows removed, or `None` if deletion failed.
        removed: Option<usize>,
    },

    /// A store operation failed.
    StoreError {
        /// What was being done.
        context: String,
        /// Description of the error.
        error: String,
    },

    /// The dark-mode preference was written.
    DarkModeSaved {
        /// The value that was written.
        enabled: bool,
    },

    /// Reading or writing the dark-mode preference failed.
    PreferenceError {
        /// Description of the error.
        error: String,
    },
}

impl AppEvent {
    /// Whether this event ends an in-flight launch, capture or clear.
    #[must_use]
    pub fn finishes_operation(&self) -> bool {
        matches!(
            self,
            Self::LocationsLoaded { .. }
                | Self::PermissionDenied
                | Self::CaptureComplete { .. }
                | Self::CaptureFailed { .. }
                | Self::LocationsCleared { .. }
        )
    }
}
