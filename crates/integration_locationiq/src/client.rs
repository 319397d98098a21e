//! LocationIQ geocoding client
//!
//! Runs each lookup through the same pipeline: build the request, pass the
//! shared throttle, send, classify the status, then parse or degrade. Every
//! fault is logged and collapsed into an empty [`LookupResult`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::Client;
use reqwest::header::ACCEPT;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};
use url::Url;

use crate::config::{LocationIqConfig, MAX_CACHE_TTL_MINUTES, MAX_MIN_INTERVAL_MS};
use crate::error::{BodySource, GeocodingError, GeocodingFault};
use crate::models::{LookupResult, parse_lookup_body};
use crate::query::{GeocodeQuery, redact_url};
use crate::throttle::Throttle;

/// Trait for forward geocoding clients
///
/// Implementations never fail: provider and network problems yield an
/// empty result.
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Resolve free-text address into candidate matches
    async fn lookup(&self, search: &str) -> LookupResult;

    /// Like [`GeocodingClient::lookup`], aborting the throttle wait when `cancel` fires
    ///
    /// A cancelled lookup returns an empty result and leaves `cancel` in the
    /// cancelled state.
    async fn lookup_with_cancellation(
        &self,
        search: &str,
        cancel: &CancellationToken,
    ) -> LookupResult;
}

/// LocationIQ client with a shared throttle and optional result cache
#[derive(Debug, Clone)]
pub struct LocationIqClient {
    client: Client,
    config: Arc<LocationIqConfig>,
    throttle: Arc<Throttle>,
    cache: Option<Cache<String, LookupResult>>,
}

impl LocationIqClient {
    /// Create a new client with its own throttle
    ///
    /// The configuration is not validated here. A missing key or malformed
    /// endpoint shows up as a configuration fault on the first lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized, or if the
    /// throttle interval or cache TTL is beyond its upper bound.
    pub fn new(config: &LocationIqConfig) -> Result<Self, GeocodingError> {
        let throttle = Arc::new(Throttle::new(config.min_interval()));
        Self::with_throttle(config, throttle)
    }

    /// Create a client that shares `throttle` with other clients
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized, or if the
    /// throttle interval or cache TTL is beyond its upper bound.
    pub fn with_throttle(
        config: &LocationIqConfig,
        throttle: Arc<Throttle>,
    ) -> Result<Self, GeocodingError> {
        if throttle.interval() > Duration::from_millis(MAX_MIN_INTERVAL_MS) {
            return Err(GeocodingError::InvalidConfig(format!(
                "throttle interval of {}ms exceeds {MAX_MIN_INTERVAL_MS}ms",
                throttle.interval().as_millis()
            )));
        }

        let cache = if config.caching_enabled() {
            let ttl = config.cache_ttl().ok_or_else(|| {
                GeocodingError::InvalidConfig(format!(
                    "cache_ttl_minutes of {} exceeds {MAX_CACHE_TTL_MINUTES}",
                    config.cache_ttl_minutes
                ))
            })?;
            Some(
                Cache::builder()
                    .max_capacity(config.cache_capacity)
                    .time_to_live(ttl)
                    .build(),
            )
        } else {
            None
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| GeocodingError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            config: Arc::new(config.clone()),
            throttle,
            cache,
        })
    }

    /// The throttle guarding this client's requests
    #[must_use]
    pub const fn throttle(&self) -> &Arc<Throttle> {
        &self.throttle
    }

    /// Run a lookup and keep the fault instead of degrading
    ///
    /// # Errors
    ///
    /// Returns the classified [`GeocodingFault`] for any failed step.
    #[instrument(skip(self, cancel))]
    pub async fn try_lookup(
        &self,
        search: &str,
        cancel: &CancellationToken,
    ) -> Result<LookupResult, GeocodingFault> {
        let started = Instant::now();

        let query = GeocodeQuery::new(search, self.config.api_key(), &self.config.format)?;
        let url = query.to_url(&self.config.base_url)?;

        let cache_key = query.search().to_lowercase();
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&cache_key).await {
                debug!(search = %query.search(), "Geocoding cache hit");
                return Ok(hit);
            }
        }

        self.throttle.admit(started, cancel).await.map_err(|i| {
            GeocodingFault::Cancelled(format!(
                "throttle wait interrupted after {}ms",
                i.waited.as_millis()
            ))
        })?;

        let (status, body) = self.send(url).await?;
        let result = classify_response(status, body)?;

        if let Some(cache) = &self.cache {
            if !result.is_empty() {
                cache.insert(cache_key, result.clone()).await;
            }
        }

        debug!(search = %query.search(), matches = result.len(), "Geocoded address");
        Ok(result)
    }

    /// Send the request and read the whole body, whatever the status
    async fn send(&self, url: Url) -> Result<(u16, String), GeocodingFault> {
        debug!(url = %redact_url(&url), "Sending LocationIQ request");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport_fault)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_fault)?;

        debug!(status, bytes = body.len(), "Received LocationIQ response");
        Ok((status, body))
    }
}

fn transport_fault(e: reqwest::Error) -> GeocodingFault {
    let cause = if e.is_timeout() {
        "request timed out"
    } else if e.is_connect() {
        "connection failed"
    } else if e.is_body() || e.is_decode() {
        "failed to read response body"
    } else {
        "request failed"
    };
    // The URL carries the API key
    GeocodingFault::Transport(format!("{cause}: {}", e.without_url()))
}

/// Route a response to the parser or the error handler
///
/// Only a literal 200 is parsed. Any other status, including the rest of
/// the 2xx range, is a provider fault.
fn classify_response(status: u16, body: String) -> Result<LookupResult, GeocodingFault> {
    if status != 200 {
        return Err(GeocodingFault::Provider {
            status,
            body_source: BodySource::for_status(status),
            body,
        });
    }

    parse_lookup_body(&body)
}

#[async_trait]
impl GeocodingClient for LocationIqClient {
    async fn lookup(&self, search: &str) -> LookupResult {
        self.lookup_with_cancellation(search, &CancellationToken::new())
            .await
    }

    async fn lookup_with_cancellation(
        &self,
        search: &str,
        cancel: &CancellationToken,
    ) -> LookupResult {
        match self.try_lookup(search, cancel).await {
            Ok(result) => result,
            Err(fault) => {
                fault.report(search);
                if fault.is_cancellation() {
                    cancel.cancel();
                }
                LookupResult::empty()
            },
        }
    }
}
