//! Flow grouping
//!
//! Partitions a flat event log into per-flow event sequences. Simulation
//! logs are not guaranteed to arrive in time order, so every partition is
//! sorted by simulated time before reconstruction scans it.

use std::collections::BTreeMap;

use meshtrace_core::{FlowKey, HopEvent};

/// Partition events by flow and sort each partition by simulated time
pub fn group_by_flow(events: &[HopEvent]) -> BTreeMap<FlowKey, Vec<HopEvent>> {
    let mut flows: BTreeMap<FlowKey, Vec<HopEvent>> = BTreeMap::new();
    for event in events {
        flows.entry(event.flow_key()).or_default().push(event.clone());
    }
    for partition in flows.values_mut() {
        partition.sort_by(|a, b| a.sim_time.total_cmp(&b.sim_time));
    }
    flows
}
