//! Inter-failure interval statistics and exponential fitting
//!
//! From a repetition's sorted failure times: the consecutive gaps, their
//! sample mean and Bessel-corrected standard deviation, the coefficient
//! of variation, and the maximum-likelihood rate of an exponential
//! failure model (λ̂ = 1/mean interval, which is also the MTBF's inverse).

use serde::{Deserialize, Serialize};

/// One inter-failure gap: a row of the intervals table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalRow {
    /// 1-indexed position in the failure sequence
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub duration: f64,
}

/// Inter-failure interval statistics for one repetition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalStats {
    /// Failures behind these statistics
    pub failures: usize,
    pub first_failure: f64,
    pub last_failure: f64,
    /// Consecutive inter-failure gaps, in time order
    pub intervals: Vec<IntervalRow>,
    /// Mean inter-failure interval (MTBF)
    pub mean: f64,
    /// Bessel-corrected sample standard deviation; 0 for a single gap
    pub stddev: f64,
    /// Coefficient of variation, stddev/mean; 0 when the mean is 0
    pub cov: f64,
    /// Exponential maximum-likelihood rate, 1/mean; 0 when the mean is 0
    pub lambda_hat: f64,
}

impl IntervalStats {
    /// Compute from a repetition's failure times, sorted ascending
    ///
    /// Returns `None` below two failure times: the statistics are not
    /// computable there, which is a reportable outcome rather than an
    /// error.
    pub fn from_sorted_times(times: &[f64]) -> Option<Self> {
        debug_assert!(times.is_sorted_by(|a, b| a <= b));
        if times.len() < 2 {
            return None;
        }

        let intervals: Vec<IntervalRow> = times
            .windows(2)
            .enumerate()
            .map(|(i, w)| IntervalRow {
                index: i + 1,
                start: w[0],
                end: w[1],
                duration: w[1] - w[0],
            })
            .collect();

        let n = intervals.len() as f64;
        let mean = intervals.iter().map(|r| r.duration).sum::<f64>() / n;
        let variance = if intervals.len() > 1 {
            intervals
                .iter()
                .map(|r| (r.duration - mean).powi(2))
                .sum::<f64>()
                / (n - 1.0)
        } else {
            0.0
        };
        let stddev = variance.sqrt();
        let cov = if mean > 0.0 { stddev / mean } else { 0.0 };
        let lambda_hat = if mean > 0.0 { 1.0 / mean } else { 0.0 };

        Some(Self {
            failures: times.len(),
            first_failure: times[0],
            last_failure: times[times.len() - 1],
            intervals,
            mean,
            stddev,
            cov,
            lambda_hat,
        })
    }

    /// The interval durations alone
    pub fn durations(&self) -> Vec<f64> {
        self.intervals.iter().map(|r| r.duration).collect()
    }
}
