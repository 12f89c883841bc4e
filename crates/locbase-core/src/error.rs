//! Error types for locbase-core.
//!
//! # Handling Provider Errors
//!
//! Providers report failures to the caller; they never retry on their own.
//! The shell decides what to do with each kind:
//!
//! | Error Type | Typical cause | Shell behaviour |
//! |------------|---------------|-----------------|
//! | [`Error::PermissionNotGranted`] | `current_location` called before a grant | Programming error, logged |
//! | [`Error::Unavailable`] | No location service on this system | Logged, capture skipped |
//! | [`Error::Provider`] | The service failed to produce a fix | Logged, capture skipped |
//! | [`Error::Cancelled`] | The shell shut down while waiting for a fix | Ignored |
//! | [`Error::InvalidConfig`] | Bad provider configuration | Reported at startup |
//!
//! A denied permission is not an error: [`crate::LocationProvider::request_permission`]
//! returns [`PermissionStatus::Denied`](locbase_types::PermissionStatus::Denied).

use thiserror::Error;

/// Errors that can occur when obtaining a location.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A location read was attempted before permission was granted.
    #[error("Location permission has not been granted")]
    PermissionNotGranted,

    /// The platform location service cannot be reached.
    #[error("Location service unavailable: {0}")]
    Unavailable(String),

    /// The read was stopped before a fix arrived.
    #[error("Location request was cancelled")]
    Cancelled,

    /// The location service failed while producing a fix.
    #[error("Location provider error: {0}")]
    Provider(String),

    /// D-Bus error talking to the platform location service.
    #[cfg(target_os = "linux")]
    #[error("D-Bus error: {0}")]
    DBus(#[from] dbus::Error),

    /// The blocking task talking to the platform service failed.
    #[error("Provider task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Text could not be parsed into a locbase value.
    #[error(transparent)]
    Parse(#[from] locbase_types::ParseError),
}

impl Error {
    /// Create a provider failure.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }

    /// Create an unavailable-service error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Create a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

/// Result type alias using locbase-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::PermissionNotGranted;
        assert_eq!(err.to_string(), "Location permission has not been granted");

        let err = Error::unavailable("no GeoClue on the system bus");
        assert!(err.to_string().contains("GeoClue"));

        let err = Error::provider("fix lost");
        assert_eq!(err.to_string(), "Location provider error: fix lost");

        let err = Error::invalid_config("latitude missing");
        assert!(err.to_string().contains("latitude missing"));
    }

    #[test]
    fn test_parse_error_conversion() {
        let parse = "nowhere".parse::<locbase_types::Coordinate>().unwrap_err();
        let err: Error = parse.into();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.to_string().contains("nowhere"));
    }
}
