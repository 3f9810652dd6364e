//! Clinic state machine
//!
//! Owns the doctor roster, the FIFO patient queue, and the append-only
//! history of patients who were handed to a doctor. A patient is in
//! exactly one of {queue, history} at any time after arrival.
//!
//! The per-minute transition runs in a fixed order:
//!
//! 1. Closing check — before assignment, so a clinic with an empty queue
//!    and all-idle doctors closes on the first minute at or after
//!    `closing_time`, not one minute later.
//! 2. Assignment — lowest-index available doctor takes the queue head;
//!    at most one patient per minute.
//! 3. Advance — doctors count down, queued patients accrue waiting time.
//!    A freshly assigned doctor's countdown therefore reflects a full
//!    subsequent minute, and the patient popped this minute does not
//!    accrue.
//!
//! Once `is_closed` flips true it stays true.

use crate::models::doctor::Doctor;
use crate::models::patient::Patient;
use crate::rng::RngManager;
use std::collections::VecDeque;

/// A single-day clinic: doctors, one FIFO queue, one closing time
#[derive(Debug)]
pub struct Clinic {
    /// Fixed roster; index order is the assignment tie-break
    doctors: Vec<Doctor>,

    /// Patients waiting to be seen, earliest arrival at the front
    queue: VecDeque<Patient>,

    /// Patients already handed to a doctor, in assignment order
    history: Vec<Patient>,

    /// Scheduled closing, minutes after opening
    closing_time: usize,

    is_closed: bool,
}

impl Clinic {
    pub fn new(doctors: Vec<Doctor>, closing_time: usize) -> Self {
        Self {
            doctors,
            queue: VecDeque::new(),
            history: Vec::new(),
            closing_time,
            is_closed: false,
        }
    }

    /// Enqueue an arrival at the back of the queue
    pub fn add_patient(&mut self, patient: Patient) {
        self.queue.push_back(patient);
    }

    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    /// Whether new arrivals may still join the queue.
    ///
    /// Evaluated against the *scheduled* closing time, not the dynamic
    /// closed flag: arrivals keep queueing through minute
    /// `closing_time - 1` even while the backlog runs past closing.
    pub fn still_accepting_patients(&self, time: usize) -> bool {
        time < self.closing_time
    }

    /// Patients currently waiting
    pub fn waiting_count(&self) -> usize {
        self.queue.len()
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    /// Patients already assigned, in assignment order
    pub fn history(&self) -> &[Patient] {
        &self.history
    }

    pub fn closing_time(&self) -> usize {
        self.closing_time
    }

    /// Apply one minute of clinic time. See the module docs for why the
    /// order of the three phases matters.
    pub fn step(&mut self, time: usize, rng: &mut RngManager) {
        // 1. Closing check, before assignment
        self.is_closed = self.is_closed
            || (self.queue.is_empty() && self.all_doctors_free() && time >= self.closing_time);

        // 2. Assignment: first available doctor in roster order takes the
        //    queue head. One patient per minute at most; the doctor steps
        //    after assignment below, so it cannot serve twice in a minute.
        if !self.is_closed {
            if let Some(idx) = self.first_available_doctor() {
                if let Some(patient) = self.queue.pop_front() {
                    self.doctors[idx].assign_patient(rng);
                    self.history.push(patient);
                }
            }
        }

        // 3. Advance resource state. The patient popped above is already
        //    in history and does not accrue this minute.
        for doctor in &mut self.doctors {
            doctor.step();
        }
        for patient in &mut self.queue {
            patient.step();
        }
    }

    fn all_doctors_free(&self) -> bool {
        self.doctors.iter().all(|d| d.is_available())
    }

    /// Lowest-index available doctor, the documented deterministic
    /// tie-break
    fn first_available_doctor(&self) -> Option<usize> {
        self.doctors.iter().position(|d| d.is_available())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrivals::FixedService;
    use crate::models::doctor::Availability;

    fn clinic_with(ndoctors: usize, service_minutes: f64, closing_time: usize) -> Clinic {
        let doctors = (0..ndoctors)
            .map(|i| {
                Doctor::new(
                    format!("doctor_{i}"),
                    Box::new(FixedService::new(service_minutes)),
                )
            })
            .collect();
        Clinic::new(doctors, closing_time)
    }

    #[test]
    fn test_empty_clinic_closes_at_closing_time() {
        let mut clinic = clinic_with(2, 5.0, 3);
        let mut rng = RngManager::new(1);

        for t in 0..3 {
            clinic.step(t, &mut rng);
            assert!(!clinic.is_closed(), "closed early at minute {t}");
        }
        clinic.step(3, &mut rng);
        assert!(clinic.is_closed());
    }

    #[test]
    fn test_queue_blocks_closing_regardless_of_time() {
        let mut clinic = clinic_with(1, 4.0, 2);
        let mut rng = RngManager::new(1);

        clinic.add_patient(Patient::new(0));
        clinic.add_patient(Patient::new(1));

        // Well past closing time, but a patient is still queued
        clinic.step(10, &mut rng); // assigns patient 0
        assert!(!clinic.is_closed());
    }

    #[test]
    fn test_busy_doctor_blocks_closing() {
        let mut clinic = clinic_with(1, 4.0, 2);
        let mut rng = RngManager::new(1);

        clinic.add_patient(Patient::new(0));
        clinic.step(5, &mut rng); // assign; countdown 4 -> 3

        // Queue empty now, but the doctor is mid-appointment
        clinic.step(6, &mut rng);
        assert!(!clinic.is_closed());
    }

    #[test]
    fn test_one_assignment_per_minute() {
        let mut clinic = clinic_with(3, 5.0, 100);
        let mut rng = RngManager::new(1);

        clinic.add_patient(Patient::new(0));
        clinic.add_patient(Patient::new(1));
        clinic.step(0, &mut rng);

        assert_eq!(clinic.history().len(), 1);
        assert_eq!(clinic.waiting_count(), 1);
    }

    #[test]
    fn test_lowest_index_available_doctor_wins() {
        let mut clinic = clinic_with(2, 5.0, 100);
        let mut rng = RngManager::new(1);

        clinic.add_patient(Patient::new(0));
        clinic.step(0, &mut rng);

        // Doctor 0 took the patient; doctor 1 untouched
        assert_eq!(
            clinic.doctors()[0].availability(),
            Availability::Busy { remaining: 4 } // 5 drawn, stepped once
        );
        assert_eq!(clinic.doctors()[1].availability(), Availability::Idle);

        // Next patient goes to doctor 1, the lowest-index available one
        clinic.add_patient(Patient::new(1));
        clinic.step(1, &mut rng);
        assert!(matches!(
            clinic.doctors()[1].availability(),
            Availability::Busy { .. }
        ));
    }

    #[test]
    fn test_fifo_head_is_assigned_first() {
        let mut clinic = clinic_with(1, 5.0, 100);
        let mut rng = RngManager::new(1);

        clinic.add_patient(Patient::new(10));
        clinic.add_patient(Patient::new(11));
        clinic.step(0, &mut rng);

        assert_eq!(clinic.history()[0].id(), 10);
        assert_eq!(clinic.waiting_count(), 1);
    }

    #[test]
    fn test_assigned_patient_does_not_accrue_waiting_on_pop_minute() {
        let mut clinic = clinic_with(1, 5.0, 100);
        let mut rng = RngManager::new(1);

        clinic.add_patient(Patient::new(0));
        clinic.add_patient(Patient::new(1));
        clinic.step(0, &mut rng);

        // Patient 0 was popped before the stepping phase
        assert_eq!(clinic.history()[0].waiting_time(), 0);
        // Patient 1 stayed queued and accrued the minute
        assert_eq!(clinic.queue[0].waiting_time(), 1);
    }

    #[test]
    fn test_closing_is_monotonic() {
        let mut clinic = clinic_with(1, 5.0, 0);
        let mut rng = RngManager::new(1);

        clinic.step(0, &mut rng);
        assert!(clinic.is_closed());

        // Stays closed even if stepped again
        clinic.step(1, &mut rng);
        assert!(clinic.is_closed());
    }

    #[test]
    fn test_still_accepting_until_scheduled_closing() {
        let clinic = clinic_with(1, 5.0, 420);
        assert!(clinic.still_accepting_patients(0));
        assert!(clinic.still_accepting_patients(419));
        assert!(!clinic.still_accepting_patients(420));
    }
}
