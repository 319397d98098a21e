//! LocationIQ client configuration

use std::fmt;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Longest accepted cache TTL (1000 years, the cache's own ceiling)
pub const MAX_CACHE_TTL_MINUTES: u64 = 1000 * 365 * 24 * 60;

/// Longest accepted throttle interval (one hour)
pub const MAX_MIN_INTERVAL_MS: u64 = 60 * 60 * 1000;

/// Configuration for the LocationIQ forward geocoding endpoint
#[derive(Clone, Serialize, Deserialize)]
pub struct LocationIqConfig {
    /// Search endpoint, without query string
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// LocationIQ access token (sensitive, never serialized)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Response format requested from the provider
    #[serde(default = "default_format")]
    pub format: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Minimum wait before each outbound request, in milliseconds
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,

    /// Cache TTL in minutes (0 to disable caching)
    #[serde(default)]
    pub cache_ttl_minutes: u64,

    /// Maximum number of cached search results
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://us1.locationiq.com/v1/search.php".to_string()
}

fn default_format() -> String {
    "json".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_min_interval_ms() -> u64 {
    1000
}

const fn default_cache_capacity() -> u64 {
    1000
}

fn default_user_agent() -> String {
    format!("hospital-geocode/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for LocationIqConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            format: default_format(),
            timeout_secs: default_timeout_secs(),
            min_interval_ms: default_min_interval_ms(),
            cache_ttl_minutes: 0,
            cache_capacity: default_cache_capacity(),
            user_agent: default_user_agent(),
        }
    }
}

impl fmt::Debug for LocationIqConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationIqConfig")
            .field("base_url", &self.base_url)
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("format", &self.format)
            .field("timeout_secs", &self.timeout_secs)
            .field("min_interval_ms", &self.min_interval_ms)
            .field("cache_ttl_minutes", &self.cache_ttl_minutes)
            .field("cache_capacity", &self.cache_capacity)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl LocationIqConfig {
    /// Create a configuration suitable for testing
    ///
    /// Uses a dummy key, a short throttle interval and no cache.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: Some(SecretString::from("test-key")),
            timeout_secs: 5,
            min_interval_ms: 50,
            cache_ttl_minutes: 0,
            ..Default::default()
        }
    }

    /// Builder-style setter for the API key
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Builder-style setter for the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Check if caching is enabled
    #[must_use]
    pub const fn caching_enabled(&self) -> bool {
        self.cache_ttl_minutes > 0
    }

    /// Minimum throttle interval as a [`Duration`]
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    /// Cache TTL as a [`Duration`], `None` when it exceeds [`MAX_CACHE_TTL_MINUTES`]
    #[must_use]
    pub fn cache_ttl(&self) -> Option<Duration> {
        if self.cache_ttl_minutes > MAX_CACHE_TTL_MINUTES {
            return None;
        }
        self.cache_ttl_minutes
            .checked_mul(60)
            .map(Duration::from_secs)
    }

    /// The API key, if one is configured and not blank
    pub(crate) fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|key| key.expose_secret())
            .filter(|key| !key.trim().is_empty())
    }

    /// Validate the configuration
    ///
    /// A missing key is reported here for startup checks, but the client
    /// itself only surfaces it as a configuration fault on first lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if url::Url::parse(&self.base_url).is_err() {
            return Err(format!("base_url is not a valid URL: {}", self.base_url));
        }

        if self.api_key().is_none() {
            return Err("api_key must be set".to_string());
        }

        if self.format.trim().is_empty() {
            return Err("format must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.min_interval_ms > MAX_MIN_INTERVAL_MS {
            return Err(format!(
                "min_interval_ms must be at most {MAX_MIN_INTERVAL_MS}, got {}",
                self.min_interval_ms
            ));
        }

        if self.cache_ttl().is_none() {
            return Err(format!(
                "cache_ttl_minutes must be at most {MAX_CACHE_TTL_MINUTES}, got {}",
                self.cache_ttl_minutes
            ));
        }

        if self.caching_enabled() && self.cache_capacity == 0 {
            return Err("cache_capacity must be greater than 0 when caching is enabled".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LocationIqConfig::default();
        assert_eq!(config.base_url, "https://us1.locationiq.com/v1/search.php");
        assert!(config.api_key.is_none());
        assert_eq!(config.format, "json");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.min_interval(), Duration::from_secs(1));
        assert!(!config.caching_enabled());
    }

    #[test]
    fn test_testing_config() {
        let config = LocationIqConfig::for_testing();
        assert_eq!(config.api_key(), Some("test-key"));
        assert_eq!(config.min_interval_ms, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_api_key_is_treated_as_missing() {
        let config = LocationIqConfig::default().with_api_key("   ");
        assert!(config.api_key().is_none());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_missing_key() {
        let config = LocationIqConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.contains("api_key"));
    }

    #[test]
    fn test_validation_malformed_base_url() {
        let config = LocationIqConfig::for_testing().with_base_url("not a url");
        let err = config.validate().unwrap_err();
        assert!(err.contains("base_url"));
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = LocationIqConfig {
            timeout_secs: 0,
            ..LocationIqConfig::for_testing()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_cache_without_capacity() {
        let config = LocationIqConfig {
            cache_ttl_minutes: 60,
            cache_capacity: 0,
            ..LocationIqConfig::for_testing()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bounds_cache_ttl() {
        let at_limit = LocationIqConfig {
            cache_ttl_minutes: MAX_CACHE_TTL_MINUTES,
            ..LocationIqConfig::for_testing()
        };
        assert!(at_limit.validate().is_ok());
        assert!(at_limit.cache_ttl().is_some());

        for cache_ttl_minutes in [MAX_CACHE_TTL_MINUTES + 1, u64::MAX / 30, u64::MAX] {
            let config = LocationIqConfig {
                cache_ttl_minutes,
                ..LocationIqConfig::for_testing()
            };
            assert!(config.cache_ttl().is_none());
            let err = config.validate().unwrap_err();
            assert!(err.contains("cache_ttl_minutes"));
        }
    }

    #[test]
    fn test_validation_bounds_min_interval() {
        let at_limit = LocationIqConfig {
            min_interval_ms: MAX_MIN_INTERVAL_MS,
            ..LocationIqConfig::for_testing()
        };
        assert!(at_limit.validate().is_ok());

        let config = LocationIqConfig {
            min_interval_ms: u64::MAX,
            ..LocationIqConfig::for_testing()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("min_interval_ms"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = LocationIqConfig::default().with_api_key("pk.super-secret");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("pk.super-secret"));
    }

    #[test]
    fn test_serialization_skips_api_key() {
        let config = LocationIqConfig::for_testing();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("test-key"));

        let deserialized: LocationIqConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.base_url, config.base_url);
        assert!(deserialized.api_key.is_none());
    }

    #[test]
    fn test_deserialize_with_key_and_defaults() {
        let json = r#"{ "api_key": "pk.abc" }"#;
        let config: LocationIqConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.api_key(), Some("pk.abc"));
        assert_eq!(config.format, "json");
        assert_eq!(config.min_interval_ms, 1000);
    }
}
