//! Trait abstractions for location providers.
//!
//! This module provides the [`LocationProvider`] trait that abstracts over
//! the platform location service, fixed coordinates, and mock providers for
//! testing.

use std::sync::Arc;

use async_trait::async_trait;

use locbase_types::{Coordinate, PermissionStatus};

use crate::error::Result;

/// Trait abstracting a source of single location fixes.
///
/// Callers must obtain a [`PermissionStatus::Granted`] from
/// [`request_permission`](Self::request_permission) before calling
/// [`current_location`](Self::current_location); otherwise the read fails
/// with [`Error::PermissionNotGranted`](crate::Error::PermissionNotGranted).
///
/// # Example
///
/// ```ignore
/// use locbase_core::{LocationProvider, Result};
///
/// async fn print_fix<P: LocationProvider>(provider: &P) -> Result<()> {
///     if provider.request_permission().await?.is_granted() {
///         let fix = provider.current_location().await?;
///         println!("{}", fix);
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Short name used in logs and status output.
    fn name(&self) -> &str;

    /// Ask for permission to read the location.
    ///
    /// A refusal is reported as [`PermissionStatus::Denied`], not as an error.
    async fn request_permission(&self) -> Result<PermissionStatus>;

    /// Wait for one position fix.
    ///
    /// No timeout is applied here; how long a fix takes is up to the platform.
    async fn current_location(&self) -> Result<Coordinate>;

    /// Stop any read that is still waiting for a fix.
    ///
    /// Providers that can block make the pending
    /// [`current_location`](Self::current_location), and every later one,
    /// fail with [`Error::Cancelled`](crate::Error::Cancelled). The default
    /// does nothing.
    fn cancel(&self) {}
}

#[async_trait]
impl<P: LocationProvider + ?Sized> LocationProvider for Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn request_permission(&self) -> Result<PermissionStatus> {
        (**self).request_permission().await
    }

    async fn current_location(&self) -> Result<Coordinate> {
        (**self).current_location().await
    }

    fn cancel(&self) {
        (**self).cancel()
    }
}

/// Type alias for a provider shared between tasks.
pub type SharedProvider = Arc<dyn LocationProvider>;
