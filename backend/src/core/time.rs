//! Time management for the simulation
//!
//! A run covers a single clinic day in discrete one-minute steps. The
//! clock only moves forward; "minute 0" is the moment the doors open.

use serde::{Deserialize, Serialize};

/// Monotonic minute counter for one simulated clinic day
///
/// # Example
/// ```
/// use clinic_simulator_core_rs::Clock;
///
/// let mut clock = Clock::new();
/// assert_eq!(clock.current_minute(), 0);
///
/// clock.advance();
/// assert_eq!(clock.current_minute(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Clock {
    /// Minutes elapsed since the clinic opened
    current_minute: usize,
}

impl Clock {
    /// Create a clock at minute 0 (opening time)
    pub fn new() -> Self {
        Self { current_minute: 0 }
    }

    /// Advance time by one minute
    pub fn advance(&mut self) {
        self.current_minute += 1;
    }

    /// Minutes elapsed since opening
    pub fn current_minute(&self) -> usize {
        self.current_minute
    }
}
