//! Logging setup
//!
//! Installs the global `tracing` subscriber for binaries.

mod logging;

pub use logging::{LoggingConfig, TelemetryError, init_logging};
