//! Provider that reports a configured coordinate.
//!
//! Useful on machines without a location service and for scripted captures.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use locbase_types::{Coordinate, PermissionStatus};

use crate::error::{Error, Result};
use crate::traits::LocationProvider;

/// Always grants permission and always reports the same coordinate.
#[derive(Debug)]
pub struct FixedProvider {
    coordinate: Coordinate,
    granted: AtomicBool,
}

impl FixedProvider {
    /// Create a provider reporting `coordinate`.
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            granted: AtomicBool::new(false),
        }
    }

    /// The coordinate this provider reports.
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

#[async_trait]
impl LocationProvider for FixedProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn request_permission(&self) -> Result<PermissionStatus> {
        self.granted.store(true, Ordering::Relaxed);
        Ok(PermissionStatus::Granted)
    }

    async fn current_location(&self) -> Result<Coordinate> {
        if !self.granted.load(Ordering::Relaxed) {
            return Err(Error::PermissionNotGranted);
        }
        Ok(self.coordinate)
    }
}
