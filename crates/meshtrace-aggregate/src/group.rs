//! Per-scenario accumulation
//!
//! A group collects the per-repetition results of one scenario and
//! reduces each to the numbers its summary averages over. Repetition
//! counts may differ between scenarios, and between the journey and
//! reliability sides of the same scenario; averages cover whatever runs
//! exist.

use serde::{Deserialize, Serialize};

use meshtrace_journey::RunSummary;
use meshtrace_reliability::ReliabilityReport;

use crate::error::{AggregateError, AggregateResult};
use crate::scenario::ScenarioKey;

/// The per-run numbers a scenario summary averages over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunDigest {
    pub repetition: u32,
    pub success_rate: Option<f64>,
    pub unicast_ratio: Option<f64>,
    /// Mean first-arrival transit across delivered flows
    pub mean_transit: Option<f64>,
    pub min_transit: Option<f64>,
    pub max_transit: Option<f64>,
    /// Mean network reach across all flows
    pub mean_unique_nodes: Option<f64>,
    /// Mean copies received across delivered flows
    pub mean_copies: Option<f64>,
}

impl RunDigest {
    fn from_summary(summary: &RunSummary) -> Self {
        let transits: Vec<f64> = summary
            .flows
            .iter()
            .filter(|f| f.delivered)
            .filter_map(|f| f.transit_time)
            .collect();
        let unique: Vec<f64> = summary
            .flows
            .iter()
            .map(|f| f.unique_nodes_touched as f64)
            .collect();
        let copies: Vec<f64> = summary
            .flows
            .iter()
            .filter(|f| f.delivered)
            .map(|f| f.copies_received as f64)
            .collect();

        Self {
            repetition: summary.repetition,
            success_rate: summary.success_rate(),
            unicast_ratio: summary.mix.unicast_ratio(),
            mean_transit: mean(&transits),
            min_transit: transits.iter().copied().reduce(f64::min),
            max_transit: transits.iter().copied().reduce(f64::max),
            mean_unique_nodes: mean(&unique),
            mean_copies: mean(&copies),
        }
    }
}

/// The per-run reliability numbers a scenario summary averages over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityDigest {
    pub repetition: u32,
    pub failure_count: usize,
    pub mean_interval: Option<f64>,
    pub cov: Option<f64>,
    pub lambda_hat: Option<f64>,
}

impl ReliabilityDigest {
    fn from_report(report: &ReliabilityReport) -> Self {
        Self {
            repetition: report.repetition,
            failure_count: report.failure_count,
            mean_interval: report.intervals.as_ref().map(|s| s.mean),
            cov: report.intervals.as_ref().map(|s| s.cov),
            lambda_hat: report.intervals.as_ref().map(|s| s.lambda_hat),
        }
    }
}

/// Accumulates one scenario's per-repetition results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioGroup {
    pub key: ScenarioKey,
    runs: Vec<RunDigest>,
    reliability: Vec<ReliabilityDigest>,
}

impl ScenarioGroup {
    pub fn new(key: ScenarioKey) -> Self {
        Self {
            key,
            runs: Vec::new(),
            reliability: Vec::new(),
        }
    }

    /// Add one repetition's journey results
    pub fn add_run(&mut self, summary: &RunSummary) {
        self.runs.push(RunDigest::from_summary(summary));
    }

    /// Add one repetition's reliability results
    pub fn add_reliability(&mut self, report: &ReliabilityReport) {
        self.reliability.push(ReliabilityDigest::from_report(report));
    }

    /// Fold another group into this one
    ///
    /// Fails when the keys differ: combining across scenario boundaries
    /// is a programming error, not a statistic.
    pub fn merge(&mut self, other: ScenarioGroup) -> AggregateResult<()> {
        if other.key != self.key {
            return Err(AggregateError::GroupingMismatch {
                expected: self.key.clone(),
                actual: other.key,
            });
        }
        self.runs.extend(other.runs);
        self.reliability.extend(other.reliability);
        Ok(())
    }

    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    pub fn reliability_run_count(&self) -> usize {
        self.reliability.len()
    }

    /// Reduce this group to its summary row
    pub fn summarize(&self) -> ScenarioSummary {
        ScenarioSummary {
            key: self.key.clone(),
            run_count: self.runs.len(),
            reliability_run_count: self.reliability.len(),
            mean_success_rate: mean_of(self.runs.iter().map(|r| r.success_rate)),
            mean_unicast_ratio: mean_of(self.runs.iter().map(|r| r.unicast_ratio)),
            mean_transit: mean_of(self.runs.iter().map(|r| r.mean_transit)),
            mean_min_transit: mean_of(self.runs.iter().map(|r| r.min_transit)),
            mean_max_transit: mean_of(self.runs.iter().map(|r| r.max_transit)),
            mean_unique_nodes: mean_of(self.runs.iter().map(|r| r.mean_unique_nodes)),
            mean_copies: mean_of(self.runs.iter().map(|r| r.mean_copies)),
            mean_failure_count: mean_of(
                self.reliability
                    .iter()
                    .map(|r| Some(r.failure_count as f64)),
            ),
            mean_interval: mean_of(self.reliability.iter().map(|r| r.mean_interval)),
            mean_cov: mean_of(self.reliability.iter().map(|r| r.cov)),
            mean_lambda_hat: mean_of(self.reliability.iter().map(|r| r.lambda_hat)),
        }
    }
}

/// One row of the aggregate scenario table
///
/// Every average covers the runs that reported the metric; `None` means
/// no run did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub key: ScenarioKey,
    pub run_count: usize,
    pub reliability_run_count: usize,
    pub mean_success_rate: Option<f64>,
    pub mean_unicast_ratio: Option<f64>,
    pub mean_transit: Option<f64>,
    /// Average of per-run minimum transit times
    pub mean_min_transit: Option<f64>,
    /// Average of per-run maximum transit times
    pub mean_max_transit: Option<f64>,
    pub mean_unique_nodes: Option<f64>,
    pub mean_copies: Option<f64>,
    pub mean_failure_count: Option<f64>,
    pub mean_interval: Option<f64>,
    pub mean_cov: Option<f64>,
    pub mean_lambda_hat: Option<f64>,
}

fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

fn mean_of(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let present: Vec<f64> = values.flatten().collect();
    mean(&present)
}
