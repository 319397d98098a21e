//! Geocoding service port
//!
//! Resolves free-text addresses into coordinates. Adapters absorb every
//! provider or network failure, so the port has no error channel.

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

/// A candidate location for an address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedAddress {
    /// Resolved coordinates
    pub location: GeoLocation,
    /// Human-readable label from the provider
    pub label: String,
    /// Place type, e.g. "hospital" or "house"
    pub place_type: Option<String>,
}

/// Port for address geocoding
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve an address into candidates, best match first
    ///
    /// Returns an empty list when nothing matched or the provider was unavailable.
    async fn geocode(&self, address: &str) -> Vec<GeocodedAddress>;
}
