//! Main store implementation.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use rusqlite::Connection;
use tracing::{debug, info};

use locbase_types::{Coordinate, LocationRecord};

use crate::error::{Error, Result};
use crate::schema;

/// How long SQLite waits on a locked database file before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the store keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Backing {
    File(PathBuf),
    Memory,
}

/// SQLite-based store for captured locations.
///
/// A `Store` owns at most one connection. The connection is opened on the
/// first operation and then reused until the `Store` is dropped; constructing
/// a `Store` never touches the disk.
///
/// Every operation runs on Tokio's blocking pool and holds the connection
/// for its whole duration, so callers may issue operations one after the
/// other without coordinating among themselves.
///
/// Note that opening a store does not create the `locations` table; call
/// [`Store::initialize`] first. Reads against a database that was never
/// initialized fail with [`Error::Database`].
#[derive(Debug, Clone)]
pub struct Store {
    backing: Backing,
    conn: Arc<Mutex<Option<Connection>>>,
}

impl Store {
    /// Create a store backed by the database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::with_backing(Backing::File(path.as_ref().to_path_buf()))
    }

    /// Create a store at the default database location.
    pub fn open_default() -> Self {
        Self::open(crate::default_db_path())
    }

    /// Create a store backed by a private in-memory database (for testing).
    ///
    /// The database lives as long as this store and its clones.
    pub fn open_in_memory() -> Self {
        Self::with_backing(Backing::Memory)
    }

    fn with_backing(backing: Backing) -> Self {
        Self {
            backing,
            conn: Arc::new(Mutex::new(None)),
        }
    }

    /// Path of the database file, or `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        match &self.backing {
            Backing::File(path) => Some(path),
            Backing::Memory => None,
        }
    }

    /// Whether the underlying connection has been opened yet.
    pub fn is_open(&self) -> bool {
        self.conn
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Run `f` against the cached connection, opening it on first use.
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let slot = Arc::clone(&self.conn);
        let backing = self.backing.clone();

        tokio::task::spawn_blocking(move || {
            let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
            let conn = match guard.take() {
                Some(conn) => conn,
                None => open_connection(&backing)?,
            };
            let result = f(&conn);
            *guard = Some(conn);
            result
        })
        .await?
    }
}

fn open_connection(backing: &Backing) -> Result<Connection> {
    let conn = match backing {
        Backing::File(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
                && !parent.exists()
            {
                std::fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }

            info!("Opening database at {}", path.display());
            Connection::open(path)?
        }
        Backing::Memory => {
            debug!("Opening in-memory database");
            Connection::open_in_memory()?
        }
    };

    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(conn)
}

// Location operations
impl Store {
    /// Ensure the `locations` table exists.
    ///
    /// Idempotent and safe to call on every launch; existing rows are kept.
    pub async fn initialize(&self) -> Result<()> {
        self.with_conn(|conn| schema::initialize(conn)).await?;
        debug!("Locations table ready");
        Ok(())
    }

    /// Append a location and return the id the database assigned to it.
    pub async fn insert(&self, coordinate: Coordinate) -> Result<i64> {
        let id = self
            .with_conn(move |conn| {
                conn.execute(
                    "INSERT INTO locations (latitude, longitude) VALUES (?1, ?2)",
                    rusqlite::params![coordinate.latitude, coordinate.longitude],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await?;

        debug!(id, %coordinate, "Inserted location");
        Ok(id)
    }

    /// Return every stored location.
    ///
    /// Rows come back in whatever order SQLite scans them; no ordering is
    /// applied.
    pub async fn select_all(&self) -> Result<Vec<LocationRecord>> {
        let records = self
            .with_conn(|conn| {
                let mut stmt = conn.prepare("SELECT id, latitude, longitude FROM locations")?;
                let records = stmt
                    .query_map([], |row| {
                        Ok(LocationRecord {
                            id: row.get(0)?,
                            latitude: row.get(1)?,
                            longitude: row.get(2)?,
                        })
                    })?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(records)
            })
            .await?;

        debug!("Loaded {} locations", records.len());
        Ok(records)
    }

    /// Delete every stored location and return how many rows were removed.
    ///
    /// The table itself is kept.
    pub async fn delete_all(&self) -> Result<usize> {
        let deleted = self
            .with_conn(|conn| Ok(conn.execute("DELETE FROM locations", [])?))
            .await?;

        info!("Deleted {} locations", deleted);
        Ok(deleted)
    }

    /// Count stored locations.
    pub async fn count(&self) -> Result<u64> {
        self.with_conn(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM locations", [], |row| row.get(0))?;
            Ok(u64::try_from(count).unwrap_or_default())
        })
        .await
    }

    /// Check whether the `locations` table exists.
    pub async fn is_initialized(&self) -> Result<bool> {
        self.with_conn(|conn| schema::table_exists(conn)).await
    }
}
