//! Geocoding fault taxonomy

use thiserror::Error;
use tracing::{error, warn};

/// Errors raised while constructing a [`crate::LocationIqClient`]
///
/// These are the only failures that ever reach a caller. Everything that
/// can go wrong during a lookup is a [`GeocodingFault`] and is absorbed.
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// The HTTP client could not be built
    #[error("Failed to initialize HTTP client: {0}")]
    HttpClient(String),

    /// A numeric setting is outside the range the client can honour
    #[error("Invalid LocationIQ configuration: {0}")]
    InvalidConfig(String),
}

/// Where the response body was read from
///
/// Statuses in `200..=299` read the success stream, everything else the
/// error stream. Only a literal 200 is ever parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySource {
    /// Body read as a success stream
    Success,
    /// Body read as an error stream
    Error,
}

impl BodySource {
    /// Select the body source for a status code
    #[must_use]
    pub const fn for_status(status: u16) -> Self {
        if matches!(status, 200..=299) {
            Self::Success
        } else {
            Self::Error
        }
    }

    /// Stable name used in log fields
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A classified failure encountered during a single lookup
#[derive(Debug, Error)]
pub enum GeocodingFault {
    /// The request target could not be built from configuration
    #[error("Configuration fault: {0}")]
    Configuration(String),

    /// Network, connection or I/O failure while sending or reading
    #[error("Transport fault: {0}")]
    Transport(String),

    /// The provider answered with a status outside the success criterion
    #[error("Provider fault: HTTP {status}: {body}")]
    Provider {
        /// Response status code
        status: u16,
        /// Stream the body was read from
        body_source: BodySource,
        /// Raw response body, kept for diagnostics
        body: String,
    },

    /// The throttle wait was interrupted by cancellation
    #[error("Cancelled: {0}")]
    Cancelled(String),

    /// The success body did not match the expected schema
    #[error("Parse fault: {0}")]
    Parse(String),

    /// The search text was blank
    #[error("Empty search text")]
    EmptyQuery,
}

impl GeocodingFault {
    /// Stable fault kind name used in log fields
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Transport(_) => "transport",
            Self::Provider { .. } => "provider",
            Self::Cancelled(_) => "cancellation",
            Self::Parse(_) => "parse",
            Self::EmptyQuery => "empty_query",
        }
    }

    /// Returns true if a later identical lookup could succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Cancelled(_) => true,
            Self::Provider { status, .. } => *status == 429 || *status >= 500,
            Self::Configuration(_) | Self::Parse(_) | Self::EmptyQuery => false,
        }
    }

    /// Returns true if this fault came from a cancellation signal
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }

    /// Log the fault with the error/warn split the degradation policy requires
    ///
    /// Error-level entries carry the technical cause, warn-level entries the
    /// decision to continue with an empty result.
    pub fn report(&self, search: &str) {
        let fault = self.kind();
        let retryable = self.is_retryable();
        match self {
            Self::Configuration(detail) => {
                error!(fault, retryable, %search, error = %detail, "LocationIQ configuration fault: malformed request target");
                warn!(fault, "Failed to build LocationIQ request. Returning empty response.");
            },
            Self::Transport(detail) => {
                error!(fault, retryable, %search, error = %detail, "LocationIQ transport fault");
                warn!(fault, "Network error communicating with LocationIQ, proceeding with empty result");
            },
            Self::Provider {
                status,
                body_source,
                body,
            } => {
                error!(
                    fault,
                    retryable,
                    status,
                    body_source = body_source.as_str(),
                    body = %body,
                    "LocationIQ provider fault - error with message: {body}"
                );
                warn!(fault, %search, "Could not geocode address '{search}', proceeding with default coordinates");
            },
            Self::Cancelled(detail) => {
                error!(fault, retryable, %search, error = %detail, "LocationIQ lookup interrupted");
            },
            Self::Parse(detail) => {
                error!(fault, retryable, %search, error = %detail, "LocationIQ parse fault");
            },
            Self::EmptyQuery => {
                warn!(fault, retryable, "Empty search text, nothing to geocode");
            },
        }
    }
}
