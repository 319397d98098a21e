//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_is_transparent() {
        let domain = DomainError::InvalidCoordinates {
            latitude: 91.0,
            longitude: 0.0,
        };
        let err: ApplicationError = domain.clone().into();
        assert_eq!(err.to_string(), domain.to_string());
    }

    #[test]
    fn configuration_error_message() {
        let err = ApplicationError::Configuration("missing api key".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing api key");
    }
}
