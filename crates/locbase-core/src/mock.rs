//! Mock location provider for testing.
//!
//! The [`MockProvider`] implements the [`LocationProvider`] trait, allowing it
//! to be used interchangeably with real providers in generic code.
//!
//! # Features
//!
//! - **Permission outcome**: grant or deny, changeable at runtime
//! - **Scripted fixes**: queue coordinates returned one per read
//! - **Failure injection**: make reads fail with a message
//! - **Latency simulation**: delay each read to mimic a slow fix

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use locbase_types::{Coordinate, PermissionStatus};

use crate::error::{Error, Result};
use crate::traits::LocationProvider;

/// A mock location provider for testing.
///
/// # Example
///
/// ```
/// use locbase_core::{LocationProvider, MockProvider};
/// use locbase_types::Coordinate;
///
/// #[tokio::main]
/// async fn main() {
///     let provider = MockProvider::builder()
///         .fix(Coordinate::new(1.0, 2.0))
///         .build();
///
///     assert!(provider.request_permission().await.unwrap().is_granted());
///     let fix = provider.current_location().await.unwrap();
///     assert_eq!(fix, Coordinate::new(1.0, 2.0));
/// }
/// ```
pub struct MockProvider {
    permission: RwLock<PermissionStatus>,
    granted: AtomicBool,
    /// Fixes handed out in order; the last one repeats once the queue drains.
    fixes: RwLock<VecDeque<Coordinate>>,
    fallback: RwLock<Coordinate>,
    fail_message: RwLock<Option<String>>,
    read_latency_ms: AtomicU64,
    permission_requests: AtomicU32,
    location_reads: AtomicU32,
}

impl std::fmt::Debug for MockProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockProvider")
            .field("granted", &self.granted.load(Ordering::Relaxed))
            .field(
                "permission_requests",
                &self.permission_requests.load(Ordering::Relaxed),
            )
            .field("location_reads", &self.location_reads.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        MockProviderBuilder::default().build()
    }
}

impl MockProvider {
    /// Default coordinate returned when nothing else was configured.
    pub const DEFAULT_FIX: Coordinate = Coordinate::new(-23.5505, -46.6333);

    /// Start building a mock provider.
    pub fn builder() -> MockProviderBuilder {
        MockProviderBuilder::default()
    }

    /// Change the outcome of future permission requests.
    ///
    /// Switching to [`PermissionStatus::Denied`] also revokes an earlier grant.
    pub async fn set_permission(&self, status: PermissionStatus) {
        *self.permission.write().await = status;
        if !status.is_granted() {
            self.granted.store(false, Ordering::Relaxed);
        }
    }

    /// Queue a fix to be returned by a future read.
    pub async fn push_fix(&self, coordinate: Coordinate) {
        self.fixes.write().await.push_back(coordinate);
    }

    /// Make reads fail with `message`, or succeed again with `None`.
    pub async fn set_failure(&self, message: Option<&str>) {
        *self.fail_message.write().await = message.map(str::to_string);
    }

    /// Set simulated read latency.
    pub fn set_read_latency(&self, latency: Duration) {
        self.read_latency_ms.store(
            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
            Ordering::Relaxed,
        );
    }

    /// Number of permission requests made so far.
    pub fn permission_requests(&self) -> u32 {
        self.permission_requests.load(Ordering::Relaxed)
    }

    /// Number of location reads attempted so far.
    pub fn location_reads(&self) -> u32 {
        self.location_reads.load(Ordering::Relaxed)
    }

    /// Whether a grant is currently in effect.
    pub fn is_granted(&self) -> bool {
        self.granted.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl LocationProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn request_permission(&self) -> Result<PermissionStatus> {
        self.permission_requests.fetch_add(1, Ordering::Relaxed);
        let status = *self.permission.read().await;
        self.granted.store(status.is_granted(), Ordering::Relaxed);
        Ok(status)
    }

    async fn current_location(&self) -> Result<Coordinate> {
        self.location_reads.fetch_add(1, Ordering::Relaxed);

        if !self.granted.load(Ordering::Relaxed) {
            return Err(Error::PermissionNotGranted);
        }

        let latency = self.read_latency_ms.load(Ordering::Relaxed);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }

        if let Some(message) = self.fail_message.read().await.clone() {
            return Err(Error::Provider(message));
        }

        let mut fixes = self.fixes.write().await;
        let fix = match fixes.pop_front() {
            Some(fix) => {
                *self.fallback.write().await = fix;
                fix
            }
            None => *self.fallback.read().await,
        };
        Ok(fix)
    }
}

/// Builder for [`MockProvider`].
#[derive(Debug, Clone)]
pub struct MockProviderBuilder {
    permission: PermissionStatus,
    fixes: VecDeque<Coordinate>,
    fail_message: Option<String>,
    read_latency: Duration,
}

impl Default for MockProviderBuilder {
    fn default() -> Self {
        Self {
            permission: PermissionStatus::Granted,
            fixes: VecDeque::new(),
            fail_message: None,
            read_latency: Duration::ZERO,
        }
    }
}

impl MockProviderBuilder {
    /// Outcome of permission requests (default: granted).
    #[must_use]
    pub fn permission(mut self, status: PermissionStatus) -> Self {
        self.permission = status;
        self
    }

    /// Queue one fix.
    #[must_use]
    pub fn fix(mut self, coordinate: Coordinate) -> Self {
        self.fixes.push_back(coordinate);
        self
    }

    /// Queue several fixes, returned in order.
    #[must_use]
    pub fn fixes<I: IntoIterator<Item = Coordinate>>(mut self, coordinates: I) -> Self {
        self.fixes.extend(coordinates);
        self
    }

    /// Make every read fail with `message`.
    #[must_use]
    pub fn fail_reads(mut self, message: &str) -> Self {
        self.fail_message = Some(message.to_string());
        self
    }

    /// Delay each read by `latency`.
    #[must_use]
    pub fn read_latency(mut self, latency: Duration) -> Self {
        self.read_latency = latency;
        self
    }

    /// Build the provider.
    pub fn build(self) -> MockProvider {
        let provider = MockProvider {
            permission: RwLock::new(self.permission),
            granted: AtomicBool::new(false),
            fixes: RwLock::new(self.fixes),
            fallback: RwLock::new(MockProvider::DEFAULT_FIX),
            fail_message: RwLock::new(self.fail_message),
            read_latency_ms: AtomicU64::new(0),
            permission_requests: AtomicU32::new(0),
            location_reads: AtomicU32::new(0),
        };
        provider.set_read_latency(self.read_latency);
        provider
    }
}
