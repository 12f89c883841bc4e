//! Shared types for the locbase location logger.
//!
//! This crate provides the data model used by the store, the location
//! providers, and the application shell.
//!
//! # Example
//!
//! ```
//! use locbase_types::{Coordinate, LocationRecord};
//!
//! let record = LocationRecord::new(1, Coordinate::new(1.0, 2.0));
//! assert_eq!(record.title(), "Location 1");
//! assert_eq!(record.description(), "Latitude: 1 | Longitude: 2");
//! ```

pub mod error;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use types::{Coordinate, LocationRecord, PermissionStatus};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // --- Coordinate parsing tests ---

    #[test]
    fn test_parse_coordinate_with_spaces() {
        let c: Coordinate = " 51.5 , -0.12 ".parse().unwrap();
        assert_eq!(c.latitude, 51.5);
        assert_eq!(c.longitude, -0.12);
    }

    #[test]
    fn test_parse_coordinate_missing_separator() {
        let err = "51.5".parse::<Coordinate>().unwrap_err();
        assert_eq!(err, ParseError::InvalidCoordinate("51.5".to_string()));
    }

    #[test]
    fn test_parse_coordinate_bad_longitude() {
        let err = "51.5,west".parse::<Coordinate>().unwrap_err();
        assert!(err.to_string().contains("longitude"));
    }

    #[test]
    fn test_coordinate_out_of_range_is_accepted() {
        // No range validation is applied to provider values.
        let c: Coordinate = "123.0,500.0".parse().unwrap();
        assert_eq!(c, Coordinate::new(123.0, 500.0));
    }

    // --- LocationRecord tests ---

    #[test]
    fn test_record_labels() {
        let record = LocationRecord::new(1700000000123, Coordinate::new(-23.5505, -46.6333));
        assert_eq!(record.title(), "Location 1700000000123");
        assert_eq!(
            record.description(),
            "Latitude: -23.5505 | Longitude: -46.6333"
        );
        assert_eq!(record.coordinate(), Coordinate::new(-23.5505, -46.6333));
    }

    #[test]
    fn test_record_serializes_with_column_names() {
        let record = LocationRecord::new(7, Coordinate::new(1.0, 2.0));
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["latitude"], 1.0);
        assert_eq!(json["longitude"], 2.0);
    }

    // --- PermissionStatus tests ---

    #[test]
    fn test_permission_status() {
        assert!(PermissionStatus::Granted.is_granted());
        assert!(!PermissionStatus::Denied.is_granted());
        assert_eq!(
            "GRANTED".parse::<PermissionStatus>().unwrap(),
            PermissionStatus::Granted
        );
        assert!("maybe".parse::<PermissionStatus>().is_err());
        assert_eq!(
            serde_json::to_string(&PermissionStatus::Denied).unwrap(),
            "\"denied\""
        );
    }

    proptest! {
        #[test]
        fn prop_coordinate_display_parses_back(
            lat in -90.0f64..90.0,
            lon in -180.0f64..180.0,
        ) {
            let c = Coordinate::new(lat, lon);
            let parsed: Coordinate = c.to_string().parse().unwrap();
            prop_assert_eq!(parsed, c);
        }
    }
}
