//! Stochastic sources that drive a clinic day.
//!
//! Two capabilities are required of the outside world: an arrival process
//! producing non-negative integer inter-arrival gaps, and a service-time
//! distribution producing positive real appointment durations (the caller
//! takes the ceiling to get whole busy minutes). Both are trait seams so
//! any generator honoring the contract is substitutable; production runs
//! use Poisson gaps and uniform service draws.
//!
//! All sampling is fed from the run's single `RngManager`, so a seed fully
//! determines a run.

use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// Generator of inter-arrival time gaps, in whole minutes.
pub trait ArrivalProcess: std::fmt::Debug + Send {
    /// Draw the next gap until a patient walks in. Non-negative; a gap of
    /// 0 means another arrival on the very next minute.
    fn next_gap(&mut self, rng: &mut RngManager) -> i64;
}

/// Per-doctor distribution of appointment durations.
pub trait ServiceDistribution: std::fmt::Debug + Send {
    /// Draw one service duration in minutes. Positive real; the doctor
    /// stores `ceil(sample)` as its busy countdown.
    fn sample(&mut self, rng: &mut RngManager) -> f64;
}

/// Poisson-distributed arrival gaps.
///
/// Parametrized by the clinic's arrival *rate* (expected arrivals per
/// minute); the sampled gap has mean `1 / rate`. The default clinic runs
/// at rate 0.1, i.e. a patient roughly every 10 minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoissonArrivals {
    /// Mean inter-arrival gap in minutes (1 / rate)
    mean_gap: f64,
}

impl PoissonArrivals {
    /// Build from an arrival rate in patients per minute.
    ///
    /// The caller (config validation) guarantees the rate is finite and
    /// positive, so the gap mean is finite.
    pub fn from_rate(rate: f64) -> Self {
        Self {
            mean_gap: 1.0 / rate,
        }
    }

    /// Mean gap between arrivals, in minutes
    pub fn mean_gap(&self) -> f64 {
        self.mean_gap
    }
}

impl ArrivalProcess for PoissonArrivals {
    fn next_gap(&mut self, rng: &mut RngManager) -> i64 {
        rng.poisson(self.mean_gap) as i64
    }
}

/// Uniform service durations over `[min, max]` minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniformService {
    min: f64,
    max: f64,
}

impl UniformService {
    /// # Panics
    /// Panics if min > max (config validation rejects this earlier)
    pub fn new(min: f64, max: f64) -> Self {
        assert!(min <= max, "service minimum must not exceed maximum");
        Self { min, max }
    }
}

impl ServiceDistribution for UniformService {
    fn sample(&mut self, rng: &mut RngManager) -> f64 {
        rng.uniform_f64(self.min, self.max)
    }
}

/// Scripted gap sequence; repeats the last element once exhausted.
///
/// NOTE: Available in all builds to support integration testing, but
/// should only be used in test code.
#[derive(Debug, Clone)]
pub struct FixedGaps {
    gaps: Vec<i64>,
    next: usize,
}

impl FixedGaps {
    /// # Panics
    /// Panics if the sequence is empty or contains a negative gap
    pub fn new(gaps: Vec<i64>) -> Self {
        assert!(!gaps.is_empty(), "gap sequence must not be empty");
        assert!(gaps.iter().all(|g| *g >= 0), "gaps must be non-negative");
        Self { gaps, next: 0 }
    }
}

impl ArrivalProcess for FixedGaps {
    fn next_gap(&mut self, _rng: &mut RngManager) -> i64 {
        let gap = self.gaps[self.next];
        if self.next + 1 < self.gaps.len() {
            self.next += 1;
        }
        gap
    }
}

/// Constant service duration.
///
/// NOTE: Available in all builds to support integration testing, but
/// should only be used in test code.
#[derive(Debug, Clone)]
pub struct FixedService {
    minutes: f64,
}

impl FixedService {
    /// # Panics
    /// Panics if the duration is not finite and non-negative
    pub fn new(minutes: f64) -> Self {
        assert!(
            minutes.is_finite() && minutes >= 0.0,
            "service duration must be finite and non-negative"
        );
        Self { minutes }
    }
}

impl ServiceDistribution for FixedService {
    fn sample(&mut self, _rng: &mut RngManager) -> f64 {
        self.minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poisson_arrivals_gap_mean_is_rate_inverse() {
        let arrivals = PoissonArrivals::from_rate(0.1);
        assert_eq!(arrivals.mean_gap(), 10.0);
    }

    #[test]
    fn test_poisson_arrivals_deterministic() {
        let mut a1 = PoissonArrivals::from_rate(0.1);
        let mut a2 = PoissonArrivals::from_rate(0.1);
        let mut rng1 = RngManager::new(42);
        let mut rng2 = RngManager::new(42);

        for _ in 0..50 {
            assert_eq!(a1.next_gap(&mut rng1), a2.next_gap(&mut rng2));
        }
    }

    #[test]
    fn test_poisson_arrivals_gaps_non_negative() {
        let mut arrivals = PoissonArrivals::from_rate(0.5);
        let mut rng = RngManager::new(7);
        for _ in 0..200 {
            assert!(arrivals.next_gap(&mut rng) >= 0);
        }
    }

    #[test]
    fn test_uniform_service_within_bounds() {
        let mut service = UniformService::new(5.0, 20.0);
        let mut rng = RngManager::new(3);
        for _ in 0..200 {
            let draw = service.sample(&mut rng);
            assert!((5.0..20.0).contains(&draw));
        }
    }

    #[test]
    fn test_fixed_gaps_repeats_last_element() {
        let mut gaps = FixedGaps::new(vec![3, 1]);
        let mut rng = RngManager::new(1);
        assert_eq!(gaps.next_gap(&mut rng), 3);
        assert_eq!(gaps.next_gap(&mut rng), 1);
        assert_eq!(gaps.next_gap(&mut rng), 1);
        assert_eq!(gaps.next_gap(&mut rng), 1);
    }

    #[test]
    #[should_panic(expected = "gap sequence must not be empty")]
    fn test_fixed_gaps_rejects_empty_sequence() {
        FixedGaps::new(vec![]);
    }

    #[test]
    fn test_fixed_service_is_constant() {
        let mut service = FixedService::new(3.2);
        let mut rng = RngManager::new(1);
        assert_eq!(service.sample(&mut rng), 3.2);
        assert_eq!(service.sample(&mut rng), 3.2);
    }
}
