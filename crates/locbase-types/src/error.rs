//! Error types for data parsing in locbase-types.

use thiserror::Error;

/// Errors that can occur when parsing locbase values from text.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The input did not have the `latitude,longitude` shape.
    #[error("Invalid coordinate '{0}': expected 'latitude,longitude'")]
    InvalidCoordinate(String),

    /// One of the coordinate components was not a number.
    #[error("Invalid {axis} '{value}': not a number")]
    InvalidNumber {
        /// Which component failed (`latitude` or `longitude`).
        axis: &'static str,
        /// The offending text.
        value: String,
    },

    /// Unrecognised permission status text.
    #[error("Invalid permission status: {0}")]
    InvalidPermission(String),
}

/// Result type alias using locbase-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
