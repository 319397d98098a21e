//! Application services - Use case implementations

mod patient_location_service;

pub use patient_location_service::{LocationSource, PatientLocation, PatientLocationService};
