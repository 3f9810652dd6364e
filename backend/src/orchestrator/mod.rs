//! Simulation driver
//!
//! Configuration and validation, the per-minute loop that feeds arrivals
//! into the clinic, and the per-run summary record the Monte Carlo layer
//! aggregates.

pub mod engine;

pub use engine::{
    MinuteResult, Simulation, SimulationConfig, SimulationError, SimulationSummary,
};
