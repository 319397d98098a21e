//! Application configuration
//!
//! Sources, lowest precedence first:
//! - built-in defaults
//! - an optional `config.toml` (or the file passed to [`AppConfig::load_from`])
//! - `HOSPITAL_*` environment variables, with `__` between nested keys
//!   (e.g. `HOSPITAL_LOCATIONIQ__API_KEY`)

use domain::value_objects::GeoLocation;
use integration_locationiq::LocationIqConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::telemetry::LoggingConfig;

const ENV_PREFIX: &str = "HOSPITAL";

/// Error type for configuration loading and validation
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Configuration loaded but is not usable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Patient location enrichment settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientLocationConfig {
    /// Coordinates used when an address cannot be geocoded
    #[serde(default)]
    pub default_location: Option<GeoLocation>,
}

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// LocationIQ provider settings
    #[serde(default)]
    pub locationiq: LocationIqConfig,

    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Patient location enrichment
    #[serde(default)]
    pub patient_location: PatientLocationConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or a value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the named file (if present) and the environment
    ///
    /// `name` may omit the extension; the format is inferred from it.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or a value has the wrong type.
    pub fn load_from(name: &str) -> Result<Self, ConfigError> {
        debug!(file = name, "Loading configuration");
        let builder = config::Config::builder()
            .add_source(config::File::with_name(name).required(false))
            .add_source(environment());

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Check that the loaded configuration can serve lookups
    ///
    /// A missing API key is reported here, although the client itself only
    /// fails on the first lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.locationiq
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("locationiq: {e}")))?;

        if self.logging.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "logging: log_filter must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
