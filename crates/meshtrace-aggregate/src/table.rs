//! The aggregate scenario table

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use meshtrace_journey::RunSummary;
use meshtrace_reliability::ReliabilityReport;

use crate::error::AggregateResult;
use crate::group::{ScenarioGroup, ScenarioSummary};
use crate::scenario::ScenarioKey;

/// Scenario groups under their exact keys
///
/// Routing results through the table makes cross-scenario mixing
/// impossible by construction: every run lands in the group its key
/// names, and groups only ever merge with themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioTable {
    groups: BTreeMap<ScenarioKey, ScenarioGroup>,
}

impl ScenarioTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn group_mut(&mut self, key: &ScenarioKey) -> &mut ScenarioGroup {
        self.groups
            .entry(key.clone())
            .or_insert_with(|| ScenarioGroup::new(key.clone()))
    }

    /// File one repetition's journey results under its scenario
    pub fn add_run(&mut self, key: &ScenarioKey, summary: &RunSummary) {
        self.group_mut(key).add_run(summary);
    }

    /// File one repetition's reliability results under its scenario
    pub fn add_reliability(&mut self, key: &ScenarioKey, report: &ReliabilityReport) {
        self.group_mut(key).add_reliability(report);
    }

    /// Absorb an externally built group, merging with any existing one
    pub fn insert_group(&mut self, group: ScenarioGroup) -> AggregateResult<()> {
        match self.groups.get_mut(&group.key) {
            Some(existing) => existing.merge(group),
            None => {
                self.groups.insert(group.key.clone(), group);
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> impl Iterator<Item = &ScenarioGroup> {
        self.groups.values()
    }

    /// One summary row per scenario, in key order
    pub fn summarize(&self) -> Vec<ScenarioSummary> {
        let rows: Vec<ScenarioSummary> = self.groups.values().map(|g| g.summarize()).collect();
        info!(scenarios = rows.len(), "summarized scenario table");
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ParamBucket;
    use meshtrace_core::AnalysisConfig;
    use meshtrace_journey::{ForwardMix, RoutingMode};

    fn run(repetition: u32, generated: usize, delivered: usize) -> RunSummary {
        RunSummary {
            repetition,
            generated,
            delivered_unique: delivered,
            mode: RoutingMode::TableDriven,
            mix: ForwardMix::new(30, 5),
            flows: Vec::new(),
        }
    }

    #[test]
    fn test_runs_land_in_their_scenario() {
        let mut table = ScenarioTable::new();
        let dsdv = ScenarioKey::new("dsdv", ParamBucket::PairCount(4));
        let flooding = ScenarioKey::new("flooding", ParamBucket::PairCount(4));

        table.add_run(&dsdv, &run(0, 10, 9));
        table.add_run(&dsdv, &run(1, 10, 7));
        table.add_run(&flooding, &run(0, 10, 10));

        assert_eq!(table.len(), 2);
        let rows = table.summarize();
        assert_eq!(rows[0].key, dsdv);
        assert_eq!(rows[0].run_count, 2);
        let rate = rows[0].mean_success_rate.unwrap();
        assert!((rate - 0.8).abs() < 1e-12);
        assert_eq!(rows[1].key, flooding);
        assert_eq!(rows[1].run_count, 1);
    }

    #[test]
    fn test_reliability_attaches_independently() {
        // Journey results for two repetitions, reliability for one:
        // heterogeneous counts are fine
        let mut table = ScenarioTable::new();
        let key = ScenarioKey::new("dsdv", ParamBucket::MobilitySpeed(5));
        let config = AnalysisConfig::default();

        table.add_run(&key, &run(0, 10, 8));
        table.add_run(&key, &run(1, 10, 6));
        table.add_reliability(
            &key,
            &ReliabilityReport::build(0, &[10.0, 12.0, 15.0, 25.0], &config),
        );

        let rows = table.summarize();
        assert_eq!(rows[0].run_count, 2);
        assert_eq!(rows[0].reliability_run_count, 1);
        assert_eq!(rows[0].mean_failure_count, Some(4.0));
        let lambda = rows[0].mean_lambda_hat.unwrap();
        assert!((lambda - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_insert_group_merges_same_key() {
        let mut table = ScenarioTable::new();
        let key = ScenarioKey::new("flooding", ParamBucket::Unspecified);

        let mut a = ScenarioGroup::new(key.clone());
        a.add_run(&run(0, 5, 5));
        let mut b = ScenarioGroup::new(key.clone());
        b.add_run(&run(1, 5, 3));

        table.insert_group(a).unwrap();
        table.insert_group(b).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.summarize()[0].run_count, 2);
    }
}
