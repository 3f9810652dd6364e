//! Doctor model
//!
//! One servicing resource. A doctor is either idle (never yet assigned) or
//! counting down the minutes left with the current patient. The countdown
//! is allowed to drift below zero between assignments: anything at or
//! below zero means "available", it is not an error state. Modeling the
//! never-assigned case as a variant rather than a sentinel value keeps the
//! available/busy distinction in the type.

use crate::arrivals::ServiceDistribution;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// Busy state of a doctor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    /// Never assigned a patient yet
    Idle,

    /// Counting down the current appointment; `remaining <= 0` is
    /// equivalent to available
    Busy { remaining: i64 },
}

/// A doctor with its own service-time distribution
pub struct Doctor {
    /// Ordinal label, e.g. "doctor_0"
    label: String,

    /// Distribution the busy countdown is drawn from on each assignment
    service: Box<dyn ServiceDistribution>,

    availability: Availability,
}

impl Doctor {
    pub fn new(label: String, service: Box<dyn ServiceDistribution>) -> Self {
        Self {
            label,
            service,
            availability: Availability::Idle,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn availability(&self) -> Availability {
        self.availability
    }

    /// True iff this doctor can take a patient right now
    pub fn is_available(&self) -> bool {
        match self.availability {
            Availability::Idle => true,
            Availability::Busy { remaining } => remaining <= 0,
        }
    }

    /// Count down one minute of the current appointment, if any.
    ///
    /// The countdown may go negative; negative is the same as available.
    pub fn step(&mut self) {
        if let Availability::Busy { remaining } = &mut self.availability {
            *remaining -= 1;
        }
    }

    /// Take a patient: draw an appointment length and start the countdown.
    ///
    /// Stores `ceil(draw)` minutes and returns them. Callers must only
    /// invoke this on an available doctor; calling while busy silently
    /// overwrites the countdown (caller contract, not checked here).
    pub fn assign_patient(&mut self, rng: &mut RngManager) -> i64 {
        let minutes = self.service.sample(rng).ceil() as i64;
        self.availability = Availability::Busy { remaining: minutes };
        minutes
    }
}

impl std::fmt::Debug for Doctor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Doctor")
            .field("label", &self.label)
            .field("availability", &self.availability)
            .finish()
    }
}
