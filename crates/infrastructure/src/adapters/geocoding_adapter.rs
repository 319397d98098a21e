//! Geocoding adapter - Implements GeocodingPort using integration_locationiq

use application::error::ApplicationError;
use application::ports::{GeocodedAddress, GeocodingPort};
use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use integration_locationiq::{
    GeocodeMatch, GeocodingClient, GeocodingError, LocationIqClient, LocationIqConfig,
};
use tracing::{debug, instrument, warn};

/// Adapter for address geocoding using the LocationIQ API
#[derive(Clone)]
pub struct LocationIqGeocodingAdapter {
    client: LocationIqClient,
}

impl std::fmt::Debug for LocationIqGeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationIqGeocodingAdapter")
            .field("client", &"LocationIqClient")
            .finish()
    }
}

impl LocationIqGeocodingAdapter {
    /// Create a new adapter with the given configuration
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` for out-of-range settings and
    /// `ApplicationError::Internal` if the HTTP client fails to initialize.
    pub fn new(config: &LocationIqConfig) -> Result<Self, ApplicationError> {
        let client = LocationIqClient::new(config).map_err(|e| match e {
            GeocodingError::InvalidConfig(_) => ApplicationError::Configuration(e.to_string()),
            GeocodingError::HttpClient(_) => ApplicationError::Internal(e.to_string()),
        })?;
        Ok(Self { client })
    }

    /// Wrap an existing client, sharing its throttle
    #[must_use]
    pub const fn from_client(client: LocationIqClient) -> Self {
        Self { client }
    }
}

/// Convert a provider match, dropping it when its coordinates are out of range
fn convert_match(m: GeocodeMatch) -> Option<GeocodedAddress> {
    match GeoLocation::new(m.latitude, m.longitude) {
        Ok(location) => Some(GeocodedAddress {
            location,
            label: m.display_name,
            place_type: m.place_type,
        }),
        Err(e) => {
            warn!(display_name = %m.display_name, error = %e, "Dropping geocoding match");
            None
        },
    }
}

#[async_trait]
impl GeocodingPort for LocationIqGeocodingAdapter {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Vec<GeocodedAddress> {
        let result = self.client.lookup(address).await;
        let candidates: Vec<_> = result.into_iter().filter_map(convert_match).collect();
        debug!(candidates = candidates.len(), "Geocoding adapter finished");
        candidates
    }
}
