//! Monte Carlo aggregation
//!
//! Runs N independent clinic days and reduces their summaries to
//! population statistics. Each run owns its whole clinic/simulation graph
//! and an independently derived seed (`rng_seed + run_index`), so runs
//! share no state and the batch can execute in parallel with no
//! synchronization; parallel and serial batches produce identical,
//! identically ordered results.
//!
//! Percentiles use nearest-rank-by-truncation on the sorted sample: the
//! 25th/50th/75th ranks all come from `idx = n * p / 100` (integer
//! truncation, clamped to the last index). No interpolation.

use crate::orchestrator::{Simulation, SimulationConfig, SimulationError, SimulationSummary};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Run one batch serially. Results are ordered by run index.
pub fn run_batch(
    config: &SimulationConfig,
    runs: usize,
) -> Result<Vec<SimulationSummary>, SimulationError> {
    config.validate()?;
    (0..runs).map(|i| run_one(config, i)).collect()
}

/// Run one batch across a rayon thread pool, optionally with a progress
/// bar. Results are ordered by run index, identical to the serial batch.
pub fn run_batch_parallel(
    config: &SimulationConfig,
    runs: usize,
    num_threads: Option<usize>,
    show_progress: bool,
) -> Result<Vec<SimulationSummary>, SimulationError> {
    config.validate()?;

    let progress = if show_progress && runs > 0 {
        let bar = ProgressBar::new(runs as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                )
                .expect("static progress template is well-formed")
                .progress_chars("#>-"),
        );
        Some(bar)
    } else {
        None
    };

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = num_threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build().expect("failed to create thread pool");

    let progress_clone = progress.clone();
    let results: Result<Vec<SimulationSummary>, SimulationError> = pool.install(|| {
        (0..runs)
            .into_par_iter()
            .map(|i| {
                let result = run_one(config, i);
                if let Some(ref bar) = progress_clone {
                    bar.inc(1);
                }
                result
            })
            .collect()
    });

    if let Some(ref bar) = progress {
        bar.finish_and_clear();
    }

    results
}

fn run_one(config: &SimulationConfig, run_index: usize) -> Result<SimulationSummary, SimulationError> {
    let run_config = SimulationConfig {
        rng_seed: config.rng_seed.wrapping_add(run_index as u64),
        ..config.clone()
    };
    Simulation::new(&run_config)?.run()
}

// ============================================================================
// Statistics
// ============================================================================

/// Population statistics of one summary field across a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleStatistics {
    pub mean: f64,

    /// 50th percentile by nearest-rank truncation
    pub median: f64,

    /// 25th percentile (lower interquartile bound)
    pub q1: f64,

    /// 75th percentile (upper interquartile bound)
    pub q3: f64,
}

impl SampleStatistics {
    /// Compute the statistics of a sample; `None` for an empty one.
    ///
    /// # Example
    /// ```
    /// use clinic_simulator_core_rs::SampleStatistics;
    ///
    /// let stats = SampleStatistics::from_sample(&[4.0, 1.0, 3.0, 2.0]).unwrap();
    /// assert_eq!(stats.mean, 2.5);
    /// assert_eq!(stats.median, 3.0); // rank 4 * 50 / 100 = index 2
    /// assert_eq!(stats.q1, 2.0);
    /// assert_eq!(stats.q3, 4.0);
    /// ```
    pub fn from_sample(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        Some(Self {
            mean: sorted.iter().sum::<f64>() / sorted.len() as f64,
            median: percentile_by_rank(&sorted, 50),
            q1: percentile_by_rank(&sorted, 25),
            q3: percentile_by_rank(&sorted, 75),
        })
    }
}

/// Nearest-rank-by-truncation percentile of a sorted, non-empty sample
fn percentile_by_rank(sorted: &[f64], percentile: usize) -> f64 {
    let idx = (sorted.len() * percentile / 100).min(sorted.len() - 1);
    sorted[idx]
}

/// Per-field statistics across one Monte Carlo batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    /// Runs in the batch
    pub runs: usize,

    /// Runs whose clinic never saw a patient; they carry no waiting-time
    /// data and are excluded from `avg_waiting_time`
    pub runs_without_patients: usize,

    pub n_patients: SampleStatistics,

    /// `None` when every run in the batch was empty
    pub avg_waiting_time: Option<SampleStatistics>,

    pub n_waited: SampleStatistics,

    pub closing_time_diff: SampleStatistics,
}

impl AggregateReport {
    /// Reduce a batch of per-run summaries; `None` for an empty batch.
    ///
    /// Each field is aggregated independently across the runs.
    pub fn from_summaries(summaries: &[SimulationSummary]) -> Option<Self> {
        let field = |extract: fn(&SimulationSummary) -> f64| -> Vec<f64> {
            summaries.iter().map(extract).collect()
        };

        let n_patients = SampleStatistics::from_sample(&field(|s| s.n_patients as f64))?;
        let n_waited = SampleStatistics::from_sample(&field(|s| s.n_waited as f64))?;
        let closing_time_diff =
            SampleStatistics::from_sample(&field(|s| s.closing_time_diff as f64))?;

        let with_data: Vec<f64> = summaries
            .iter()
            .filter_map(|s| s.avg_waiting_time)
            .collect();

        Some(Self {
            runs: summaries.len(),
            runs_without_patients: summaries.len() - with_data.len(),
            n_patients,
            avg_waiting_time: SampleStatistics::from_sample(&with_data),
            n_waited,
            closing_time_diff,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_by_rank_truncates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile_by_rank(&sorted, 25), 2.0); // idx 1
        assert_eq!(percentile_by_rank(&sorted, 50), 3.0); // idx 2
        assert_eq!(percentile_by_rank(&sorted, 75), 4.0); // idx 3
    }

    #[test]
    fn test_percentile_of_singleton() {
        let sorted = [5.0];
        assert_eq!(percentile_by_rank(&sorted, 25), 5.0);
        assert_eq!(percentile_by_rank(&sorted, 75), 5.0);
    }

    #[test]
    fn test_from_sample_empty_is_none() {
        assert!(SampleStatistics::from_sample(&[]).is_none());
    }

    #[test]
    fn test_from_sample_is_order_insensitive() {
        let a = SampleStatistics::from_sample(&[3.0, 1.0, 2.0]).unwrap();
        let b = SampleStatistics::from_sample(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_summaries_empty_batch_is_none() {
        assert!(AggregateReport::from_summaries(&[]).is_none());
    }
}
