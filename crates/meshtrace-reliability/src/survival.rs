//! Survival curves over failure times
//!
//! Two views of the same failures: the Kaplan–Meier step curve (one step
//! per failure) and a coarse bucketed curve on an even time grid for
//! plotting next to cumulative failure counts.

use serde::{Deserialize, Serialize};

/// One step of the Kaplan–Meier curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivalPoint {
    pub time: f64,
    pub survival: f64,
}

/// Kaplan–Meier survival estimate over sorted failure times
///
/// No censoring support: every unit is assumed to fail inside the
/// observation window. After the i-th of n failures (1-indexed) the
/// survival probability is the running product of `1 − 1/(n − i + 1)`.
/// The curve conceptually starts at 1 before the first failure, is
/// non-increasing, and reaches exactly 0 after the last failure.
pub fn km_survival(times: &[f64]) -> Vec<SurvivalPoint> {
    debug_assert!(times.is_sorted_by(|a, b| a <= b));
    let n = times.len();
    let mut survival = 1.0;
    let mut curve = Vec::with_capacity(n);
    for (i, &time) in times.iter().enumerate() {
        let at_risk = (n - i) as f64;
        survival *= 1.0 - 1.0 / at_risk;
        curve.push(SurvivalPoint { time, survival });
    }
    curve
}

/// One bucket of the coarse failure/survival curves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub time: f64,
    pub cumulative_failures: usize,
    pub surviving_fraction: f64,
}

/// Cumulative failures and surviving fraction on an even time grid
///
/// The grid spans [0, last failure time] in `buckets` even steps.
pub fn bucketed_curves(times: &[f64], buckets: usize) -> Vec<CurvePoint> {
    debug_assert!(times.is_sorted_by(|a, b| a <= b));
    if times.is_empty() || buckets == 0 {
        return Vec::new();
    }
    let max_time = times[times.len() - 1];
    let step = max_time / buckets as f64;

    (0..=buckets)
        .map(|b| {
            let time = b as f64 * step;
            let cumulative = times.iter().filter(|&&x| x <= time).count();
            CurvePoint {
                time,
                cumulative_failures: cumulative,
                surviving_fraction: (times.len() - cumulative) as f64 / times.len() as f64,
            }
        })
        .collect()
}
