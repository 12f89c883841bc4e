//! Local persistence for captured locations.
//!
//! This crate provides SQLite-based storage for location records and a small
//! JSON key-value area for display preferences.
//!
//! # Features
//!
//! - Create-if-absent `locations` table
//! - Append, list, and clear captured locations
//! - One lazily opened connection per [`Store`]
//! - Persisted dark-mode preference
//!
//! # Example
//!
//! ```no_run
//! use locbase_store::Store;
//! use locbase_types::Coordinate;
//!
//! # async fn example() -> locbase_store::Result<()> {
//! let store = Store::open_default();
//! store.initialize().await?;
//! store.insert(Coordinate::new(-23.55, -46.63)).await?;
//!
//! for record in store.select_all().await? {
//!     println!("{}: {}", record.title(), record.description());
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod prefs;
mod schema;
mod store;

use std::path::PathBuf;

pub use error::{Error, Result};
pub use prefs::{DARK_MODE_KEY, Preferences};
pub use schema::LOCATIONS_TABLE;
pub use store::Store;

/// Default data directory following platform conventions.
///
/// - Linux: `~/.local/share/locbase`
/// - macOS: `~/Library/Application Support/locbase`
/// - Windows: `C:\Users\<user>\AppData\Local\locbase`
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("locbase")
}

/// Default database path (`<data dir>/locations.db`).
pub fn default_db_path() -> PathBuf {
    default_data_dir().join("locations.db")
}

/// Default preference file path (`<data dir>/preferences.json`).
pub fn default_preferences_path() -> PathBuf {
    default_data_dir().join("preferences.json")
}
