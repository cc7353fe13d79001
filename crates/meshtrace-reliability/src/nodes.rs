//! Node-level delivery statistics and partition detection
//!
//! The simulator's scalar output carries per-node packet counters. These
//! combine with the deduplicated failure set in two ways: a per-node
//! delivery-rate table, and a list of partition candidates, nodes that
//! never failed yet fell silent before the mesh stopped losing members.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use meshtrace_core::{AnalysisConfig, ScalarSet};

use crate::failure::Dedup;

/// Per-node packet delivery statistics for one repetition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePacketStats {
    pub repetition: u32,
    pub node: u32,
    pub sent: u64,
    pub received: u64,
    /// Received share of sent; `None` when the node sent nothing
    pub pdr: Option<f64>,
    /// Simulated time of the last data packet received for this node
    pub last_reception: Option<f64>,
    pub routing_table_size_mean: Option<f64>,
}

/// Extract the per-node delivery table from a scalar set
pub fn node_packet_stats(set: &ScalarSet, config: &AnalysisConfig) -> Vec<NodePacketStats> {
    let sent = set.node_values("sentDataPackets", config);
    let received = set.node_values("receivedDataPacketsForMe", config);
    let last_rx = set.node_values("lastDataPacketReceptionTime", config);
    let table_size = set.node_values("routingTableSizeMean", config);

    let keys: BTreeSet<(u32, u32)> = sent
        .keys()
        .chain(received.keys())
        .chain(last_rx.keys())
        .chain(table_size.keys())
        .copied()
        .collect();

    keys.into_iter()
        .map(|(repetition, node)| {
            let sent = sent.get(&(repetition, node)).copied().unwrap_or(0.0) as u64;
            let received = received.get(&(repetition, node)).copied().unwrap_or(0.0) as u64;
            NodePacketStats {
                repetition,
                node,
                sent,
                received,
                pdr: (sent > 0).then(|| received as f64 / sent as f64),
                last_reception: last_rx.get(&(repetition, node)).copied(),
                routing_table_size_mean: table_size.get(&(repetition, node)).copied(),
            }
        })
        .collect()
}

/// Nodes likely partitioned from the mesh, per repetition
///
/// A candidate never failed, but its last packet reception predates the
/// repetition's final failure: the mesh kept dying around it while it
/// heard nothing.
pub fn partition_candidates(
    failures: &Dedup,
    stats: &[NodePacketStats],
) -> BTreeMap<u32, Vec<u32>> {
    let mut failed_nodes: BTreeMap<u32, BTreeSet<u32>> = BTreeMap::new();
    let mut last_failure: BTreeMap<u32, f64> = BTreeMap::new();
    for record in &failures.records {
        failed_nodes
            .entry(record.repetition)
            .or_default()
            .insert(record.node);
        let entry = last_failure.entry(record.repetition).or_insert(record.time);
        if record.time > *entry {
            *entry = record.time;
        }
    }

    let mut candidates: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
    for stat in stats {
        let Some(&final_failure) = last_failure.get(&stat.repetition) else {
            continue;
        };
        let Some(last_rx) = stat.last_reception else {
            continue;
        };
        let has_failed = failed_nodes
            .get(&stat.repetition)
            .is_some_and(|nodes| nodes.contains(&stat.node));
        if !has_failed && last_rx < final_failure {
            candidates.entry(stat.repetition).or_default().push(stat.node);
        }
    }

    for (repetition, nodes) in &candidates {
        debug!(repetition, count = nodes.len(), "partition candidates");
    }
    candidates
}
