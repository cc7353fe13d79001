//! Run-level reconstruction and summaries
//!
//! Ties the pieces together for one repetition: group the log into
//! flows, reconstruct each journey, accumulate the forward mix, classify
//! the routing mode, and expose the per-flow metric rows reporting
//! consumes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use meshtrace_core::{AnalysisConfig, EventKind, EventLog, FlowKey};

use crate::classify::{ForwardMix, RoutingMode};
use crate::error::JourneyError;
use crate::flow::group_by_flow;
use crate::journey::PacketJourney;

/// First-arrival metrics for one flow: one row of the journey table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowMetrics {
    pub repetition: u32,
    pub flow: FlowKey,
    pub delivered: bool,
    /// First-arrival transit time; `None` when undelivered or truncated
    pub transit_time: Option<f64>,
    /// First-arrival TTL-derived hop count
    pub hop_count: Option<u32>,
    pub copies_received: usize,
    /// Nodes that handled the flow, as a network-reach measure
    pub unique_nodes_touched: usize,
    /// Distinct-forwarder estimate kept for parity with the TTL count
    pub naive_hop_count: u32,
}

impl FlowMetrics {
    fn from_journey(journey: &PacketJourney, repetition: u32) -> Self {
        let first = journey.first_arrival();
        Self {
            repetition,
            flow: journey.flow,
            delivered: journey.delivered(),
            transit_time: first.and_then(|d| d.transit_time),
            hop_count: first.and_then(|d| d.hop_count),
            copies_received: journey.copies_received(),
            unique_nodes_touched: journey.unique_nodes_touched.len(),
            naive_hop_count: journey.naive_hop_count,
        }
    }
}

/// Everything reconstructed from one repetition's event log
#[derive(Debug, Clone)]
pub struct RunReconstruction {
    pub repetition: u32,
    pub journeys: BTreeMap<FlowKey, PacketJourney>,
    /// Flows rejected for a malformed TTL trail, kept for accounting
    pub rejected: Vec<(FlowKey, JourneyError)>,
    pub mix: ForwardMix,
    pub mode: RoutingMode,
    /// Source transmissions observed in the log
    pub generated: usize,
}

impl RunReconstruction {
    /// Flows with at least one delivered copy
    pub fn delivered_unique(&self) -> usize {
        self.journeys.values().filter(|j| j.delivered()).count()
    }

    /// One first-arrival metric row per reconstructed flow
    pub fn flow_metrics(&self) -> Vec<FlowMetrics> {
        self.journeys
            .values()
            .map(|j| FlowMetrics::from_journey(j, self.repetition))
            .collect()
    }

    /// Freeze this reconstruction into its per-repetition summary
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            repetition: self.repetition,
            generated: self.generated,
            delivered_unique: self.delivered_unique(),
            mode: self.mode,
            mix: self.mix,
            flows: self.flow_metrics(),
        }
    }
}

/// Aggregated view of one repetition, immutable once built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub repetition: u32,
    /// Source transmissions observed
    pub generated: usize,
    /// Flows delivered at least once (first-arrival basis, copies ignored)
    pub delivered_unique: usize,
    pub mode: RoutingMode,
    pub mix: ForwardMix,
    pub flows: Vec<FlowMetrics>,
}

impl RunSummary {
    /// Delivered share of generated packets; `None` when nothing was
    /// generated
    pub fn success_rate(&self) -> Option<f64> {
        (self.generated > 0).then(|| self.delivered_unique as f64 / self.generated as f64)
    }
}

/// Reconstruct every flow of one repetition
///
/// Flows with malformed TTL trails are dropped from the result and
/// recorded in `rejected`; their forwards do not count toward the mix.
pub fn reconstruct_run(
    log: &EventLog,
    repetition: u32,
    config: &AnalysisConfig,
) -> RunReconstruction {
    let mut journeys = BTreeMap::new();
    let mut rejected = Vec::new();
    let mut mix = ForwardMix::default();

    for (flow, events) in group_by_flow(&log.events) {
        match PacketJourney::reconstruct(flow, &events, config) {
            Ok(journey) => {
                mix.absorb(ForwardMix::new(
                    journey.unicast_forwards,
                    journey.broadcast_forwards,
                ));
                journeys.insert(flow, journey);
            }
            Err(err) => {
                warn!(%flow, %err, "rejecting flow with malformed trace");
                rejected.push((flow, err));
            }
        }
    }

    let mode = mix.classify(config.unicast_dominance);
    let generated = log.count_kind(EventKind::TxSrc);
    info!(
        repetition,
        flows = journeys.len(),
        rejected = rejected.len(),
        generated,
        %mode,
        "reconstructed run"
    );

    RunReconstruction {
        repetition,
        journeys,
        rejected,
        mix,
        mode,
        generated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshtrace_core::{HopEvent, HopType};

    fn event(seq: u64, time: f64, kind: EventKind, node: u32, ttl: u32) -> HopEvent {
        HopEvent {
            sim_time: time,
            kind,
            packet_seq: seq,
            src: 1000,
            dst: 1001,
            current_node: node,
            ttl_after_decr: ttl,
            chosen_via: 2,
            next_hop_type: HopType::Unicast,
        }
    }

    fn log(events: Vec<HopEvent>) -> EventLog {
        EventLog::from_events(events)
    }

    #[test]
    fn test_run_counts_generated_and_delivered() {
        let events = vec![
            event(0, 0.0, EventKind::TxSrc, 1000, 5),
            event(0, 1.2, EventKind::Delivered, 1001, 3),
            event(1, 2.0, EventKind::TxSrc, 1000, 5),
            // Flow 1 never delivers
            event(1, 2.5, EventKind::TxFwdData, 3, 4),
        ];
        let run = reconstruct_run(&log(events), 0, &AnalysisConfig::default());
        assert_eq!(run.generated, 2);
        assert_eq!(run.delivered_unique(), 1);
        assert_eq!(run.journeys.len(), 2);
        assert!(run.rejected.is_empty());

        let summary = run.summary();
        assert_eq!(summary.success_rate(), Some(0.5));
        assert_eq!(summary.flows.len(), 2);
    }

    #[test]
    fn test_rejected_flow_is_skipped_and_counted() {
        let events = vec![
            event(0, 0.0, EventKind::TxSrc, 1000, 5),
            event(0, 1.2, EventKind::Delivered, 1001, 3),
            // Flow 1 carries a TTL trail that runs backwards
            event(1, 2.0, EventKind::TxSrc, 1000, 2),
            event(1, 3.0, EventKind::Delivered, 1001, 6),
        ];
        let run = reconstruct_run(&log(events), 0, &AnalysisConfig::default());
        assert_eq!(run.journeys.len(), 1);
        assert_eq!(run.rejected.len(), 1);
        assert!(matches!(
            run.rejected[0].1,
            JourneyError::NegativeHopCount { .. }
        ));
    }

    #[test]
    fn test_empty_log_summary() {
        let run = reconstruct_run(&log(vec![]), 3, &AnalysisConfig::default());
        let summary = run.summary();
        assert_eq!(summary.generated, 0);
        assert_eq!(summary.success_rate(), None);
        assert_eq!(summary.mode, RoutingMode::Flooding);
    }
}
