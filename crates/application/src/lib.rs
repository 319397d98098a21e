//! Application layer - Use cases and orchestration
//!
//! Defines the geocoding port and the patient location enrichment use case.
//! Adapters in the infrastructure layer implement the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
