//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::value_objects::GeoLocation;
use proptest::prelude::*;

proptest! {
    #[test]
    fn valid_coordinates_are_preserved(
        lat in -90.0f64..=90.0f64,
        lon in -180.0f64..=180.0f64
    ) {
        let loc = GeoLocation::new(lat, lon).unwrap();
        prop_assert!((loc.latitude() - lat).abs() < f64::EPSILON);
        prop_assert!((loc.longitude() - lon).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_longitude_rejected(
        lat in -90.0f64..=90.0f64,
        lon in prop_oneof![
            (-1000.0f64..-180.1f64),
            (180.1f64..1000.0f64)
        ]
    ) {
        prop_assert!(GeoLocation::new(lat, lon).is_err());
    }

    #[test]
    fn display_has_six_decimals(
        lat in -90.0f64..=90.0f64,
        lon in -180.0f64..=180.0f64
    ) {
        let rendered = GeoLocation::new(lat, lon).unwrap().to_string();
        let parts: Vec<&str> = rendered.split(", ").collect();
        prop_assert_eq!(parts.len(), 2);
        for part in parts {
            let decimals = part.split('.').nth(1).map_or(0, str::len);
            prop_assert_eq!(decimals, 6);
        }
    }

    #[test]
    fn deserialization_enforces_ranges(
        lat in 90.1f64..1000.0f64,
        lon in -180.0f64..=180.0f64
    ) {
        let json = format!(r#"{{"latitude": {lat}, "longitude": {lon}}}"#);
        prop_assert!(serde_json::from_str::<GeoLocation>(&json).is_err());
    }
}
