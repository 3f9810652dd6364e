//! Simulation engine
//!
//! Owns one clinic day end to end: the clinic itself, the arrival
//! process, the minute clock, and the run's RNG. The loop is:
//!
//! ```text
//! For each minute t:
//! 1. Admit an arrival if one is due and the clinic still accepts
//! 2. Clinic.step(t)  (closing check -> assignment -> advance)
//! 3. Count down the arrival gap
//! 4. Advance the clock
//! ```
//!
//! terminating when the clinic closes. Everything is deterministic given
//! the seed: same config, same trace.

use crate::arrivals::{ArrivalProcess, PoissonArrivals, UniformService};
use crate::core::time::Clock;
use crate::models::clinic::Clinic;
use crate::models::doctor::{Availability, Doctor};
use crate::models::patient::Patient;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Configuration
// ============================================================================

/// Complete configuration for one simulation run
///
/// All parameters are fixed before construction; there is no runtime
/// reconfiguration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of doctors on duty
    pub ndoctors: usize,

    /// Shortest possible appointment, minutes
    pub appt_min: f64,

    /// Longest possible appointment, minutes
    pub appt_max: f64,

    /// Expected arrivals per minute (Poisson); the mean gap between
    /// arrivals is its inverse
    pub arrival_rate: f64,

    /// Minutes after opening at which the clinic stops admitting
    pub closing_time: usize,

    /// Seed for the run's RNG
    pub rng_seed: u64,

    /// Optional safety bound: abort a run that has not closed after this
    /// many minutes. With `None`, an overloaded configuration (arrivals
    /// the doctors can never drain) simply never terminates.
    pub max_minutes: Option<usize>,
}

impl Default for SimulationConfig {
    /// Default clinic: 3 doctors, 5-20 minute appointments, a patient
    /// roughly every 10 minutes, open 9am-4pm.
    fn default() -> Self {
        Self {
            ndoctors: 3,
            appt_min: 5.0,
            appt_max: 20.0,
            arrival_rate: 0.1,
            closing_time: (16 - 9) * 60,
            rng_seed: 42,
            max_minutes: None,
        }
    }
}

impl SimulationConfig {
    /// Reject impossible configurations at construction time rather than
    /// mid-run.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.ndoctors == 0 {
            return Err(SimulationError::InvalidConfig(
                "ndoctors must be > 0".to_string(),
            ));
        }

        if !self.appt_min.is_finite() || !self.appt_max.is_finite() || self.appt_min < 0.0 {
            return Err(SimulationError::InvalidConfig(
                "appointment bounds must be finite and non-negative".to_string(),
            ));
        }

        if self.appt_min > self.appt_max {
            return Err(SimulationError::InvalidConfig(
                "appt_min must not exceed appt_max".to_string(),
            ));
        }

        // A zero rate would make the mean gap unbounded and the Poisson
        // sampler non-terminating, so it is a config error too.
        if !self.arrival_rate.is_finite() || self.arrival_rate <= 0.0 {
            return Err(SimulationError::InvalidConfig(
                "arrival_rate must be finite and positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Simulation error types
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SimulationError {
    /// Configuration validation error
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The optional safety bound was hit before the clinic closed
    #[error("simulation exceeded {limit} minutes without closing")]
    MinuteLimitExceeded { limit: usize },
}

// ============================================================================
// Per-minute and per-run records
// ============================================================================

/// Snapshot of one simulated minute, for the reporting surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteResult {
    /// The minute that was just simulated
    pub time: usize,

    /// End-of-minute busy state per doctor, in roster order
    pub doctor_status: Vec<Availability>,

    /// Patients left waiting at the end of the minute
    pub waiting: usize,
}

/// Read-only record derived once from a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Patients who were seen by a doctor
    pub n_patients: usize,

    /// Mean waiting time over the history; `None` when no patient was
    /// ever seen (explicit "no data" state, never coerced to zero)
    pub avg_waiting_time: Option<f64>,

    /// Patients whose waiting time was nonzero
    pub n_waited: usize,

    /// `final_time - closing_time - 1`. The closed flag flips on the tick
    /// after the last productive minute, and the loop's final clock
    /// advance lands one past that; the -1 is the fixed correction for
    /// it. Zero means the clinic closed exactly on schedule.
    pub closing_time_diff: i64,
}

// ============================================================================
// Simulation
// ============================================================================

/// One clinic day, run minute by minute until the clinic closes
///
/// # Example
/// ```
/// use clinic_simulator_core_rs::{Simulation, SimulationConfig};
///
/// let config = SimulationConfig {
///     rng_seed: 7,
///     ..SimulationConfig::default()
/// };
/// let mut simulation = Simulation::new(&config).unwrap();
/// let summary = simulation.run().unwrap();
/// assert!(summary.closing_time_diff >= 0);
/// ```
#[derive(Debug)]
pub struct Simulation {
    clinic: Clinic,

    clock: Clock,

    /// Source of inter-arrival gaps
    arrival_process: Box<dyn ArrivalProcess>,

    /// Countdown to the next arrival. Reaching zero (or below) means a
    /// patient is due; once the clinic stops accepting, no fresh gap is
    /// drawn and the counter just drifts negative, unused.
    minutes_until_next_arrival: i64,

    /// The run's single RNG; every draw flows through it
    rng: RngManager,

    /// Explicit identity counter threaded into Patient construction
    next_patient_id: u64,

    max_minutes: Option<usize>,
}

impl Simulation {
    /// Build a run from a validated configuration: uniform service draws
    /// per doctor, Poisson arrival gaps.
    pub fn new(config: &SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let doctors = (0..config.ndoctors)
            .map(|i| {
                Doctor::new(
                    format!("doctor_{i}"),
                    Box::new(UniformService::new(config.appt_min, config.appt_max)),
                )
            })
            .collect();
        let clinic = Clinic::new(doctors, config.closing_time);
        let arrivals = Box::new(PoissonArrivals::from_rate(config.arrival_rate));

        Ok(Self::from_parts(
            clinic,
            arrivals,
            RngManager::new(config.rng_seed),
            config.max_minutes,
        ))
    }

    /// Assemble a run from an explicit clinic and arrival source.
    ///
    /// This is the substitution seam for the stochastic contracts: tests
    /// inject `FixedGaps`/`FixedService` here to get fully scripted runs.
    /// The first arrival gap is drawn immediately.
    pub fn from_parts(
        clinic: Clinic,
        mut arrival_process: Box<dyn ArrivalProcess>,
        mut rng: RngManager,
        max_minutes: Option<usize>,
    ) -> Self {
        let minutes_until_next_arrival = arrival_process.next_gap(&mut rng);
        Self {
            clinic,
            clock: Clock::new(),
            arrival_process,
            minutes_until_next_arrival,
            rng,
            next_patient_id: 0,
            max_minutes,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Minutes elapsed since opening
    pub fn time(&self) -> usize {
        self.clock.current_minute()
    }

    pub fn is_closed(&self) -> bool {
        self.clinic.is_closed()
    }

    pub fn clinic(&self) -> &Clinic {
        &self.clinic
    }

    /// Patients minted so far (equals queue + history sizes)
    pub fn patients_created(&self) -> u64 {
        self.next_patient_id
    }

    // ========================================================================
    // Minute loop
    // ========================================================================

    /// Simulate one minute and return its snapshot.
    ///
    /// Arrivals are admitted while `time < closing_time` (the scheduled
    /// closing, not the dynamic closed flag), so patients keep queueing
    /// through minute `closing_time - 1`. The `<= 0` due-check makes a
    /// drawn gap of 0 mean "another arrival on the next minute" rather
    /// than stranding the counter below zero.
    pub fn step(&mut self) -> MinuteResult {
        let time = self.clock.current_minute();

        if self.minutes_until_next_arrival <= 0 && self.clinic.still_accepting_patients(time) {
            let patient = Patient::new(self.next_patient_id);
            self.next_patient_id += 1;
            self.clinic.add_patient(patient);
            self.minutes_until_next_arrival = self.arrival_process.next_gap(&mut self.rng);
        }

        self.clinic.step(time, &mut self.rng);

        self.minutes_until_next_arrival -= 1;
        self.clock.advance();

        MinuteResult {
            time,
            doctor_status: self
                .clinic
                .doctors()
                .iter()
                .map(|d| d.availability())
                .collect(),
            waiting: self.clinic.waiting_count(),
        }
    }

    /// Run to completion and derive the summary.
    pub fn run(&mut self) -> Result<SimulationSummary, SimulationError> {
        self.run_with(|_| {})
    }

    /// Run to completion, handing every minute's snapshot to `on_minute`
    /// (the per-minute trace hook for the reporting surface).
    pub fn run_with(
        &mut self,
        mut on_minute: impl FnMut(&MinuteResult),
    ) -> Result<SimulationSummary, SimulationError> {
        while !self.clinic.is_closed() {
            if let Some(limit) = self.max_minutes {
                if self.clock.current_minute() >= limit {
                    return Err(SimulationError::MinuteLimitExceeded { limit });
                }
            }
            let minute = self.step();
            on_minute(&minute);
        }
        Ok(self.summary())
    }

    /// Derive the per-run summary from the current state.
    ///
    /// Meaningful once the run has terminated; calling it mid-run gives a
    /// snapshot of the history so far.
    pub fn summary(&self) -> SimulationSummary {
        let history = self.clinic.history();
        let n_patients = history.len();

        let avg_waiting_time = if history.is_empty() {
            None
        } else {
            let total: u64 = history.iter().map(|p| u64::from(p.waiting_time())).sum();
            Some(total as f64 / n_patients as f64)
        };

        let n_waited = history.iter().filter(|p| p.has_waited()).count();

        let closing_time_diff =
            self.clock.current_minute() as i64 - self.clinic.closing_time() as i64 - 1;

        SimulationSummary {
            n_patients,
            avg_waiting_time,
            n_waited,
            closing_time_diff,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
