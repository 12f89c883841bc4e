//! Single-shot location capture.

use time::OffsetDateTime;
use tracing::{debug, info, warn};

use locbase_types::{Coordinate, LocationRecord};

use crate::error::Result;
use crate::traits::LocationProvider;

/// Result of a capture attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CaptureOutcome {
    /// Permission was refused; no location was read.
    Denied,
    /// One fix was obtained.
    Captured(Coordinate),
}

impl CaptureOutcome {
    /// The captured coordinate, if any.
    #[must_use]
    pub const fn coordinate(&self) -> Option<Coordinate> {
        match self {
            Self::Denied => None,
            Self::Captured(coordinate) => Some(*coordinate),
        }
    }
}

/// Request permission and, when granted, read one fix.
pub async fn capture_once<P: LocationProvider + ?Sized>(provider: &P) -> Result<CaptureOutcome> {
    debug!(provider = provider.name(), "Requesting location permission");

    let status = provider.request_permission().await?;
    if !status.is_granted() {
        warn!(provider = provider.name(), "Permission to access location was denied");
        return Ok(CaptureOutcome::Denied);
    }

    let coordinate = provider.current_location().await?;
    info!(provider = provider.name(), %coordinate, "Captured location");
    Ok(CaptureOutcome::Captured(coordinate))
}

/// Client-side id for a freshly captured record: milliseconds since the
/// Unix epoch at `at`.
///
/// This id is shown until the next reload replaces it with the id assigned
/// by the store.
#[must_use]
pub fn provisional_id(at: OffsetDateTime) -> i64 {
    i64::try_from(at.unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX)
}

/// Build the in-memory record for a coordinate captured now.
#[must_use]
pub fn provisional_record(coordinate: Coordinate) -> LocationRecord {
    LocationRecord::new(provisional_id(OffsetDateTime::now_utc()), coordinate)
}
