//! Domain layer for the hospital records geocoding service
//!
//! Contains value objects and domain errors shared by the application and
//! infrastructure layers. Has no I/O and no knowledge of any provider.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::*;
