//! Patient model
//!
//! One arrival at the clinic. A patient carries an identity label and
//! accumulates waiting time, one minute at a time, for as long as it sits
//! in the queue. Once popped for assignment it never mutates again: its
//! recorded waiting time is exactly the number of full minutes spent
//! queued, not counting the minute it was popped.
//!
//! Identity labels are minted by the simulation's own counter and threaded
//! through construction, so concurrent runs never interfere.

use serde::{Deserialize, Serialize};

/// A patient queued at (or already seen by) the clinic
///
/// # Example
/// ```
/// use clinic_simulator_core_rs::Patient;
///
/// let mut patient = Patient::new(7);
/// assert_eq!(patient.waiting_time(), 0);
///
/// patient.step(); // one full minute in the queue
/// assert_eq!(patient.waiting_time(), 1);
/// assert!(patient.has_waited());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Unique label, monotonically assigned in arrival order
    id: u64,

    /// Full minutes spent in the queue so far
    waiting_time: u32,
}

impl Patient {
    /// Create a patient that just walked in (zero waiting time)
    pub fn new(id: u64) -> Self {
        Self {
            id,
            waiting_time: 0,
        }
    }

    /// Arrival-order label
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Full minutes spent queued before assignment
    pub fn waiting_time(&self) -> u32 {
        self.waiting_time
    }

    /// Account one full minute spent in the queue
    pub fn step(&mut self) {
        self.waiting_time += 1;
    }

    /// Whether this patient waited at all before being seen
    pub fn has_waited(&self) -> bool {
        self.waiting_time > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_patient_has_not_waited() {
        let patient = Patient::new(0);
        assert_eq!(patient.waiting_time(), 0);
        assert!(!patient.has_waited());
    }

    #[test]
    fn test_step_accumulates_minutes() {
        let mut patient = Patient::new(3);
        patient.step();
        patient.step();
        patient.step();
        assert_eq!(patient.waiting_time(), 3);
        assert!(patient.has_waited());
    }

    #[test]
    fn test_id_is_stable() {
        let mut patient = Patient::new(42);
        patient.step();
        assert_eq!(patient.id(), 42);
    }
}
