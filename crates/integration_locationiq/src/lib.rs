#![forbid(unsafe_code)]
//! LocationIQ geocoding integration for the hospital records service
//!
//! Resolves free-text addresses into candidate coordinates through the
//! [LocationIQ](https://locationiq.com) search API.
//!
//! # Architecture
//!
//! [`GeocodingClient`] is the inbound interface, implemented by
//! [`LocationIqClient`]. A lookup never fails: configuration, transport,
//! provider, cancellation and parse faults are classified as
//! [`GeocodingFault`], logged, and collapsed into an empty [`LookupResult`].
//! All requests pass a shared [`Throttle`] so concurrent callers respect the
//! provider's rate limit.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_locationiq::{GeocodingClient, LocationIqClient, LocationIqConfig};
//!
//! let config = LocationIqConfig::default().with_api_key("pk.your-key");
//! let client = LocationIqClient::new(&config)?;
//!
//! let result = client.lookup("221B Baker Street").await;
//! if let Some(best) = result.best() {
//!     println!("{} ({}, {})", best.display_name, best.latitude, best.longitude);
//! }
//! ```

mod client;
mod config;
mod error;
mod models;
mod query;
mod throttle;

pub use client::{GeocodingClient, LocationIqClient};
pub use config::{LocationIqConfig, MAX_CACHE_TTL_MINUTES, MAX_MIN_INTERVAL_MS};
pub use error::{BodySource, GeocodingError, GeocodingFault};
pub use models::{BoundingBox, GeocodeMatch, LookupResult, parse_lookup_body};
pub use query::{GeocodeQuery, redact_url};
pub use throttle::{Interrupted, Throttle};
pub use tokio_util::sync::CancellationToken;
