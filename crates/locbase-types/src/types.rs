//! Core types for captured locations.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A single position fix as reported by a location provider.
///
/// Values are stored exactly as the provider reports them; no range
/// validation is performed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinate {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinate {
    type Err = ParseError;

    /// Parse a `latitude,longitude` pair.
    ///
    /// # Examples
    ///
    /// ```
    /// use locbase_types::Coordinate;
    ///
    /// let c: Coordinate = "-23.55, -46.63".parse().unwrap();
    /// assert_eq!(c, Coordinate::new(-23.55, -46.63));
    /// assert!("north".parse::<Coordinate>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| ParseError::InvalidCoordinate(s.to_string()))?;

        let latitude = parse_axis("latitude", lat)?;
        let longitude = parse_axis("longitude", lon)?;

        Ok(Self::new(latitude, longitude))
    }
}

fn parse_axis(axis: &'static str, value: &str) -> Result<f64, ParseError> {
    let value = value.trim();
    value.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
        axis,
        value: value.to_string(),
    })
}

/// A captured location together with its identifier.
///
/// The identifier is either the store-assigned row id or, right after a
/// capture and before the next reload, a provisional id derived from the
/// capture time in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocationRecord {
    /// Record identifier.
    pub id: i64,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl LocationRecord {
    /// Create a record from an id and a coordinate.
    #[must_use]
    pub const fn new(id: i64, coordinate: Coordinate) -> Self {
        Self {
            id,
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        }
    }

    /// The coordinate part of this record.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// List title, e.g. `Location 3`.
    #[must_use]
    pub fn title(&self) -> String {
        format!("Location {}", self.id)
    }

    /// List description, e.g. `Latitude: 1.5 | Longitude: 2`.
    #[must_use]
    pub fn description(&self) -> String {
        format!(
            "Latitude: {} | Longitude: {}",
            self.latitude, self.longitude
        )
    }
}

impl fmt::Display for LocationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title(), self.description())
    }
}

/// Outcome of a location permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PermissionStatus {
    /// The user (or platform policy) allowed location access.
    Granted,
    /// Location access was refused.
    Denied,
}

impl PermissionStatus {
    /// Whether location reads may proceed.
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Granted => write!(f, "granted"),
            Self::Denied => write!(f, "denied"),
        }
    }
}

impl FromStr for PermissionStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "granted" => Ok(Self::Granted),
            "denied" => Ok(Self::Denied),
            _ => Err(ParseError::InvalidPermission(s.to_string())),
        }
    }
}
