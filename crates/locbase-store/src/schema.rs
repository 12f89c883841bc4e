//! Database schema.
//!
//! The database holds a single `locations` table. There is no version table
//! and no migrations: the table is created if absent and otherwise left as is.

use rusqlite::Connection;

use crate::error::Result;

/// Name of the only table in the database.
pub const LOCATIONS_TABLE: &str = "locations";

const CREATE_LOCATIONS: &str = "CREATE TABLE IF NOT EXISTS locations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    latitude REAL,
    longitude REAL
);";

/// Create the `locations` table if it does not exist.
///
/// Existing rows are never touched.
pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch(CREATE_LOCATIONS)?;
    Ok(())
}

/// Check whether the `locations` table exists.
pub fn table_exists(conn: &Connection) -> Result<bool> {
    let exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name=?1",
        [LOCATIONS_TABLE],
        |row| row.get(0),
    )?;
    Ok(exists)
}
