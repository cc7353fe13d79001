//! Empirical vs fitted-exponential CDF comparison
//!
//! Samples the empirical failure-time CDF on an even grid between the
//! first and last failure, next to the CDF of the fitted exponential
//! model. The model is shifted to start at the first failure time: what
//! is compared is the shape of the inter-failure spacing, not absolute
//! calendar alignment.

use serde::{Deserialize, Serialize};

/// One sample of the comparison grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CdfPoint {
    pub time: f64,
    pub empirical: f64,
    pub exponential: f64,
}

/// Empirical CDF against the fitted exponential on an even grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdfComparison {
    pub points: Vec<CdfPoint>,
}

impl CdfComparison {
    /// Sample the comparison over `grid_points` even steps
    ///
    /// Needs at least two failure times (a span to sample) and a
    /// non-empty grid; reports `None` otherwise.
    pub fn compute(times: &[f64], lambda_hat: f64, grid_points: usize) -> Option<Self> {
        if times.len() < 2 || grid_points == 0 {
            return None;
        }
        let first = times[0];
        let last = times[times.len() - 1];
        let span = last - first;
        let n = times.len() as f64;

        let points = (0..=grid_points)
            .map(|g| {
                let time = first + span * (g as f64 / grid_points as f64);
                let empirical = times.iter().filter(|&&x| x <= time).count() as f64 / n;
                let exponential = 1.0 - (-lambda_hat * (time - first)).exp();
                CdfPoint {
                    time,
                    empirical,
                    exponential,
                }
            })
            .collect();

        Some(Self { points })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intervals::IntervalStats;

    #[test]
    fn test_grid_spans_first_to_last() {
        let times = [10.0, 12.0, 15.0, 25.0];
        let stats = IntervalStats::from_sorted_times(&times).unwrap();
        let cdf = CdfComparison::compute(&times, stats.lambda_hat, 100).unwrap();

        assert_eq!(cdf.points.len(), 101);
        assert_eq!(cdf.points[0].time, 10.0);
        assert_eq!(cdf.points[100].time, 25.0);
    }

    #[test]
    fn test_empirical_cdf_steps() {
        let times = [10.0, 12.0, 15.0, 25.0];
        let cdf = CdfComparison::compute(&times, 0.2, 15).unwrap();

        // At the first failure exactly one of four times has passed
        assert!((cdf.points[0].empirical - 0.25).abs() < 1e-12);
        // At the last failure every time has passed
        assert!((cdf.points.last().unwrap().empirical - 1.0).abs() < 1e-12);
        // Monotone non-decreasing
        for pair in cdf.points.windows(2) {
            assert!(pair[1].empirical >= pair[0].empirical);
        }
    }

    #[test]
    fn test_exponential_shifted_to_first_failure() {
        let times = [10.0, 12.0, 15.0, 25.0];
        let lambda = 0.2;
        let cdf = CdfComparison::compute(&times, lambda, 10).unwrap();

        // The model starts at zero on the first failure, not at t=0
        assert!((cdf.points[0].exponential - 0.0).abs() < 1e-12);
        let last = cdf.points.last().unwrap();
        let expected = 1.0 - (-lambda * (25.0 - 10.0)).exp();
        assert!((last.exponential - expected).abs() < 1e-12);
    }

    #[test]
    fn test_insufficient_input_reports_none() {
        assert!(CdfComparison::compute(&[10.0], 0.2, 100).is_none());
        assert!(CdfComparison::compute(&[10.0, 12.0], 0.2, 0).is_none());
    }
}
