//! Patient location enrichment
//!
//! Resolves a patient's address into coordinates when a record is created.
//! Geocoding is best-effort: when the provider returns nothing the record
//! gets the configured default coordinates, or none at all.

use std::fmt;
use std::sync::Arc;

use domain::value_objects::GeoLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::ports::GeocodingPort;

/// How a patient location was determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSource {
    /// Top-ranked geocoding candidate
    Geocoded,
    /// Configured default coordinates
    Default,
    /// No coordinates available
    Unset,
}

/// Coordinates attached to a patient record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientLocation {
    /// The address as entered
    pub address: String,
    /// Resolved or default coordinates
    pub location: Option<GeoLocation>,
    /// Provider label for geocoded locations
    pub label: Option<String>,
    /// Where the coordinates came from
    pub source: LocationSource,
}

impl PatientLocation {
    /// True when geocoding did not produce the coordinates
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.source != LocationSource::Geocoded
    }
}

/// Use case for enriching patient addresses with coordinates
pub struct PatientLocationService {
    geocoder: Arc<dyn GeocodingPort>,
    default_location: Option<GeoLocation>,
}

impl fmt::Debug for PatientLocationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatientLocationService")
            .field("default_location", &self.default_location)
            .finish_non_exhaustive()
    }
}

impl PatientLocationService {
    /// Create a service with no default coordinates
    #[must_use]
    pub fn new(geocoder: Arc<dyn GeocodingPort>) -> Self {
        Self {
            geocoder,
            default_location: None,
        }
    }

    /// Use `location` when an address cannot be geocoded
    #[must_use]
    pub fn with_default_location(mut self, location: GeoLocation) -> Self {
        self.default_location = Some(location);
        self
    }

    /// Resolve an address, falling back when geocoding yields nothing
    #[instrument(skip(self))]
    pub async fn resolve(&self, address: &str) -> PatientLocation {
        let trimmed = address.trim();

        let best = if trimmed.is_empty() {
            None
        } else {
            self.geocoder.geocode(trimmed).await.into_iter().next()
        };

        if let Some(candidate) = best {
            debug!(label = %candidate.label, location = %candidate.location, "Patient address geocoded");
            return PatientLocation {
                address: address.to_string(),
                location: Some(candidate.location),
                label: Some(candidate.label),
                source: LocationSource::Geocoded,
            };
        }

        let source = if self.default_location.is_some() {
            LocationSource::Default
        } else {
            LocationSource::Unset
        };
        warn!(%address, ?source, "Patient address could not be geocoded, using fallback");

        PatientLocation {
            address: address.to_string(),
            location: self.default_location,
            label: None,
            source,
        }
    }
}
