//! Clinic Simulator Core - Rust Engine
//!
//! Discrete-event simulation of a single-day outpatient clinic:
//! stochastic arrivals, one FIFO queue, several doctors, and Monte Carlo
//! aggregation of waiting times and overtime across many independent
//! runs.
//!
//! # Architecture
//!
//! - **core**: Time management
//! - **models**: Domain types (Patient, Doctor, Clinic)
//! - **arrivals**: Stochastic source contracts (arrival gaps, service times)
//! - **orchestrator**: Per-minute simulation loop
//! - **aggregate**: Monte Carlo batch runner and summary statistics
//! - **report**: Presentation-only formatting helpers
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All time values are whole minutes
//! 2. All randomness is deterministic (seeded RNG, one per run)
//! 3. Within one minute: closing check, then assignment, then stepping

// Module declarations
pub mod aggregate;
pub mod arrivals;
pub mod core;
pub mod models;
pub mod orchestrator;
pub mod report;
pub mod rng;

// Re-exports for convenience
pub use aggregate::{run_batch, run_batch_parallel, AggregateReport, SampleStatistics};
pub use arrivals::{
    ArrivalProcess, FixedGaps, FixedService, PoissonArrivals, ServiceDistribution, UniformService,
};
pub use crate::core::time::Clock;
pub use models::{
    clinic::Clinic,
    doctor::{Availability, Doctor},
    patient::Patient,
};
pub use orchestrator::{
    MinuteResult, Simulation, SimulationConfig, SimulationError, SimulationSummary,
};
pub use rng::RngManager;
