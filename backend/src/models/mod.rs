//! Domain models for the clinic simulator

pub mod clinic;
pub mod doctor;
pub mod patient;

// Re-exports
pub use clinic::Clinic;
pub use doctor::{Availability, Doctor};
pub use patient::Patient;
