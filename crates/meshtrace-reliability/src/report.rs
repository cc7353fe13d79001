//! Per-repetition reliability reports

use serde::{Deserialize, Serialize};
use tracing::info;

use meshtrace_core::AnalysisConfig;

use crate::cdf::CdfComparison;
use crate::failure::Dedup;
use crate::intervals::IntervalStats;
use crate::survival::{CurvePoint, SurvivalPoint, bucketed_curves, km_survival};

/// Reliability results for one repetition
///
/// Sparse runs stay representable: below two failures the interval
/// statistics and CDF comparison are absent rather than the whole report
/// failing, so batch processing over many scenarios never aborts on one
/// quiet run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityReport {
    pub repetition: u32,
    pub failure_count: usize,
    pub intervals: Option<IntervalStats>,
    pub cdf: Option<CdfComparison>,
    pub survival: Vec<SurvivalPoint>,
    pub curves: Vec<CurvePoint>,
}

impl ReliabilityReport {
    /// Build from one repetition's deduplicated, ascending failure times
    pub fn build(repetition: u32, times: &[f64], config: &AnalysisConfig) -> Self {
        let intervals = IntervalStats::from_sorted_times(times);
        let cdf = intervals
            .as_ref()
            .and_then(|s| CdfComparison::compute(times, s.lambda_hat, config.cdf_grid_points));

        info!(
            repetition,
            failures = times.len(),
            computable = intervals.is_some(),
            "built reliability report"
        );

        Self {
            repetition,
            failure_count: times.len(),
            intervals,
            cdf,
            survival: km_survival(times),
            curves: bucketed_curves(times, config.curve_buckets),
        }
    }

    /// One report per repetition present in a deduplicated failure set
    pub fn for_all(failures: &Dedup, config: &AnalysisConfig) -> Vec<Self> {
        failures
            .by_repetition()
            .iter()
            .map(|(&repetition, times)| Self::build(repetition, times, config))
            .collect()
    }
}
