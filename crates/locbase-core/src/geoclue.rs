//! Linux location provider backed by GeoClue2.
//!
//! GeoClue is reached over the D-Bus system bus. A permission request
//! creates a GeoClue client, identifies the application with its desktop id,
//! and starts the client; GeoClue's authorization agent decides whether the
//! start is allowed. The client stays alive as long as the D-Bus connection
//! that created it, so the provider keeps that connection for its lifetime.
//!
//! All D-Bus traffic uses the blocking API on Tokio's blocking pool.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use dbus::Path;
use dbus::blocking::Connection;
use dbus::blocking::stdintf::org_freedesktop_dbus::Properties;
use tracing::{debug, info, warn};

use locbase_types::{Coordinate, PermissionStatus};

use crate::error::{Error, Result};
use crate::traits::LocationProvider;

const SERVICE: &str = "org.freedesktop.GeoClue2";
const MANAGER_PATH: &str = "/org/freedesktop/GeoClue2/Manager";
const MANAGER_IFACE: &str = "org.freedesktop.GeoClue2.Manager";
const CLIENT_IFACE: &str = "org.freedesktop.GeoClue2.Client";
const LOCATION_IFACE: &str = "org.freedesktop.GeoClue2.Location";

const ACCESS_DENIED: &str = "org.freedesktop.DBus.Error.AccessDenied";
const SERVICE_UNKNOWN: &str = "org.freedesktop.DBus.Error.ServiceUnknown";

/// Object path GeoClue reports while no fix is available.
const NO_LOCATION: &str = "/";

/// Accuracy levels understood by GeoClue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum AccuracyLevel {
    /// Country-level accuracy.
    Country = 1,
    /// City-level accuracy.
    City = 4,
    /// Neighborhood-level accuracy.
    Neighborhood = 5,
    /// Street-level accuracy.
    Street = 6,
    /// Best available accuracy (GPS when present).
    Exact = 8,
}

/// Options for [`GeoClueProvider`].
#[derive(Debug, Clone)]
pub struct GeoClueOptions {
    /// Desktop id GeoClue uses to identify the application.
    pub desktop_id: String,
    /// Requested accuracy.
    pub accuracy: AccuracyLevel,
    /// Timeout for individual D-Bus calls.
    pub call_timeout: Duration,
    /// How often to check for a fix while waiting.
    pub poll_interval: Duration,
}

impl Default for GeoClueOptions {
    fn default() -> Self {
        Self {
            desktop_id: "locbase".to_string(),
            accuracy: AccuracyLevel::Exact,
            call_timeout: Duration::from_secs(25),
            poll_interval: Duration::from_millis(250),
        }
    }
}

struct Session {
    conn: Connection,
    client: Path<'static>,
}

/// Location provider talking to GeoClue2 over the system bus.
pub struct GeoClueProvider {
    options: GeoClueOptions,
    session: Arc<Mutex<Option<Session>>>,
    cancelled: Arc<AtomicBool>,
}

impl std::fmt::Debug for GeoClueProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let started = self
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some();
        f.debug_struct("GeoClueProvider")
            .field("options", &self.options)
            .field("started", &started)
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

impl GeoClueProvider {
    /// Create a provider with the given options. No D-Bus traffic happens
    /// until the first permission request.
    pub fn new(options: GeoClueOptions) -> Self {
        Self {
            options,
            session: Arc::new(Mutex::new(None)),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The options this provider was created with.
    pub fn options(&self) -> &GeoClueOptions {
        &self.options
    }

    /// Whether [`LocationProvider::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Default for GeoClueProvider {
    fn default() -> Self {
        Self::new(GeoClueOptions::default())
    }
}

fn map_bus_error(e: dbus::Error) -> Error {
    if e.name() == Some(SERVICE_UNKNOWN) {
        Error::unavailable("GeoClue2 is not running on the system bus")
    } else {
        Error::DBus(e)
    }
}

fn start_session(options: &GeoClueOptions) -> Result<Option<Session>> {
    let conn = Connection::new_system()
        .map_err(|e| Error::unavailable(format!("cannot connect to system bus: {e}")))?;

    let client = {
        let manager = conn.with_proxy(SERVICE, MANAGER_PATH, options.call_timeout);
        let (client,): (Path<'static>,) = manager
            .method_call(MANAGER_IFACE, "GetClient", ())
            .map_err(map_bus_error)?;
        client
    };
    debug!(client = %client, "Obtained GeoClue client");

    {
        let proxy = conn.with_proxy(SERVICE, client.clone(), options.call_timeout);
        proxy.set(CLIENT_IFACE, "DesktopId", options.desktop_id.clone())?;
        proxy.set(
            CLIENT_IFACE,
            "RequestedAccuracyLevel",
            options.accuracy as u32,
        )?;

        let started: std::result::Result<(), dbus::Error> =
            proxy.method_call(CLIENT_IFACE, "Start", ());
        match started {
            Ok(()) => {}
            Err(e) if e.name() == Some(ACCESS_DENIED) => return Ok(None),
            Err(e) => return Err(map_bus_error(e)),
        }
    }

    Ok(Some(Session { conn, client }))
}

/// Run `check` until it yields a value, calling `wait` between attempts.
///
/// `cancelled` is looked at before every attempt, so a cancel takes effect
/// within one `wait`.
fn poll_until<T>(
    cancelled: &AtomicBool,
    mut check: impl FnMut() -> Result<Option<T>>,
    mut wait: impl FnMut() -> Result<()>,
) -> Result<T> {
    loop {
        if cancelled.load(Ordering::Acquire) {
            return Err(Error::Cancelled);
        }
        if let Some(value) = check()? {
            return Ok(value);
        }
        wait()?;
    }
}

fn wait_for_fix(
    session: &Session,
    options: &GeoClueOptions,
    cancelled: &AtomicBool,
) -> Result<Coordinate> {
    let client = session
        .conn
        .with_proxy(SERVICE, session.client.clone(), options.call_timeout);

    poll_until(
        cancelled,
        || {
            let location: Path<'static> = client.get(CLIENT_IFACE, "Location")?;
            if &*location == NO_LOCATION {
                return Ok(None);
            }

            let fix = session
                .conn
                .with_proxy(SERVICE, location, options.call_timeout);
            let latitude: f64 = fix.get(LOCATION_IFACE, "Latitude")?;
            let longitude: f64 = fix.get(LOCATION_IFACE, "Longitude")?;
            Ok(Some(Coordinate::new(latitude, longitude)))
        },
        // Keeps the connection serviced while waiting for the first fix.
        || {
            session.conn.process(options.poll_interval)?;
            Ok(())
        },
    )
}

#[async_trait]
impl LocationProvider for GeoClueProvider {
    fn name(&self) -> &str {
        "geoclue"
    }

    async fn request_permission(&self) -> Result<PermissionStatus> {
        if self.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let slot = Arc::clone(&self.session);
        let options = self.options.clone();

        tokio::task::spawn_blocking(move || {
            let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
            if guard.is_some() {
                return Ok(PermissionStatus::Granted);
            }

            match start_session(&options)? {
                Some(session) => {
                    info!(desktop_id = %options.desktop_id, "GeoClue client started");
                    *guard = Some(session);
                    Ok(PermissionStatus::Granted)
                }
                None => {
                    warn!(desktop_id = %options.desktop_id, "GeoClue refused location access");
                    Ok(PermissionStatus::Denied)
                }
            }
        })
        .await?
    }

    async fn current_location(&self) -> Result<Coordinate> {
        let slot = Arc::clone(&self.session);
        let cancelled = Arc::clone(&self.cancelled);
        let options = self.options.clone();

        tokio::task::spawn_blocking(move || {
            let guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
            let Some(session) = guard.as_ref() else {
                return Err(Error::PermissionNotGranted);
            };
            wait_for_fix(session, &options, &cancelled)
        })
        .await?
    }

    fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::AcqRel) {
            info!("Cancelling GeoClue location requests");
        }
    }
}
