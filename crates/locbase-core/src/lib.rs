//! Location providers and shell messages for locbase.
//!
//! This crate provides the single-fix location abstraction used by the
//! `locbase` application, together with the messages exchanged between its
//! interactive shell and background worker.
//!
//! # Features
//!
//! - **Permission at point of use**: ask, then read exactly one fix
//! - **Platform provider**: GeoClue2 over D-Bus on Linux
//! - **Fixed provider**: report a configured coordinate
//! - **Mock provider**: scripted fixes and failures for tests
//!
//! # Quick Start
//!
//! ```
//! use locbase_core::{CaptureOutcome, MockProvider, capture_once};
//! use locbase_types::Coordinate;
//!
//! #[tokio::main]
//! async fn main() -> locbase_core::Result<()> {
//!     let provider = MockProvider::builder()
//!         .fix(Coordinate::new(-23.55, -46.63))
//!         .build();
//!
//!     match capture_once(&provider).await? {
//!         CaptureOutcome::Captured(fix) => println!("Captured {fix}"),
//!         CaptureOutcome::Denied => println!("Permission denied"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod capture;
pub mod error;
pub mod fixed;
#[cfg(target_os = "linux")]
pub mod geoclue;
pub mod messages;
pub mod mock;
pub mod traits;

pub use locbase_types::types;

pub use capture::{CaptureOutcome, capture_once, provisional_id, provisional_record};
pub use error::{Error, Result};
pub use fixed::FixedProvider;
#[cfg(target_os = "linux")]
pub use geoclue::{AccuracyLevel, GeoClueOptions, GeoClueProvider};
pub use messages::{AppEvent, Command};
pub use mock::{MockProvider, MockProviderBuilder};
pub use traits::{LocationProvider, SharedProvider};
