//! Message types for TUI communication between UI and worker.
//!
//! This module re-exports the shared message types from `locbase-core::messages`:
//!
//! - [`Command`]: Messages sent from the UI to the background worker
//! - [`AppEvent`]: Events sent from the worker back to the UI

pub use locbase_core::messages::{AppEvent, Command};
