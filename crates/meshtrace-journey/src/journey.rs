//! Packet-journey reconstruction
//!
//! A single forward scan over a flow's time-sorted events rebuilds the
//! packet's delivery record. Redundant forwarding routinely lands several
//! physical copies of one logical packet at the destination; every copy
//! is kept, and first-arrival metrics are always distinguished from
//! all-copies metrics.
//!
//! Hop counts come from the TTL decrement trail: the source records the
//! budget after its own decrement, the destination records what is left,
//! and the difference is the hop count. A distinct-forwarder counter is
//! kept alongside for reporting parity, but the TTL trail is the
//! authoritative source.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use meshtrace_core::{AnalysisConfig, EventKind, FlowKey, HopEvent};

use crate::error::JourneyError;

/// One physical copy of a flow arriving at its destination
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    /// Simulated time the copy reached the destination
    pub time: f64,
    /// Remaining hop budget recorded at delivery
    pub ttl_at_delivery: u32,
    /// Seconds since generation; `None` when the source transmit is
    /// missing from the trace
    pub transit_time: Option<f64>,
    /// Hops derived from the TTL trail; `None` when the source transmit
    /// is missing from the trace
    pub hop_count: Option<u32>,
}

/// Arithmetic mean of a sample with its extremes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleSpread {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl SampleSpread {
    fn of(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &v in values {
            min = min.min(v);
            max = max.max(v);
            sum += v;
        }
        Some(Self {
            mean: sum / values.len() as f64,
            min,
            max,
        })
    }
}

/// Metrics across every delivered copy of a flow
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CopyStats {
    pub copies: usize,
    /// Transit-time spread across copies with a known generation time
    pub transit: Option<SampleSpread>,
    /// Hop-count spread across copies with a known initial TTL
    pub hops: Option<SampleSpread>,
}

/// A reconstructed delivery journey for one logical packet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacketJourney {
    pub flow: FlowKey,
    /// Time of the source transmit; `None` when the trace is truncated
    pub generated_time: Option<f64>,
    /// Hop budget recorded at the source transmit
    pub initial_ttl: Option<u32>,
    /// One entry per copy that reached the destination, in time order
    pub deliveries: Vec<Delivery>,
    /// Every node that handled this flow
    pub unique_nodes_touched: BTreeSet<u32>,
    /// Next-hop choices addressed to a single neighbour
    pub unicast_forwards: u64,
    /// Next-hop choices addressed to all neighbours
    pub broadcast_forwards: u64,
    /// Distinct-forwarder hop estimate; the TTL trail is authoritative
    pub naive_hop_count: u32,
}

impl PacketJourney {
    /// Reconstruct one flow from its time-sorted events
    ///
    /// A delivery whose TTL exceeds the source's initial budget marks a
    /// malformed trace and rejects the whole flow. A flow without a
    /// source transmit is reconstructed with its derived metrics absent;
    /// a flow without deliveries is simply undelivered. Neither is an
    /// error.
    pub fn reconstruct(
        flow: FlowKey,
        events: &[HopEvent],
        config: &AnalysisConfig,
    ) -> Result<Self, JourneyError> {
        let mut journey = Self {
            flow,
            generated_time: None,
            initial_ttl: None,
            deliveries: Vec::new(),
            unique_nodes_touched: BTreeSet::new(),
            unicast_forwards: 0,
            broadcast_forwards: 0,
            naive_hop_count: 0,
        };
        let mut path_nodes = BTreeSet::new();

        for event in events {
            journey.unique_nodes_touched.insert(event.current_node);

            if event.chooses_next_hop() {
                if event.is_broadcast(config.broadcast_address) {
                    journey.broadcast_forwards += 1;
                } else {
                    journey.unicast_forwards += 1;
                }
            }

            match event.kind {
                EventKind::TxSrc => {
                    // First transmit wins; retransmissions keep the
                    // original generation time and budget
                    if journey.generated_time.is_none() {
                        journey.generated_time = Some(event.sim_time);
                        journey.initial_ttl = Some(event.ttl_after_decr);
                    }
                    path_nodes.insert(event.current_node);
                }
                EventKind::TxFwdData | EventKind::TxFwdAck => {
                    if path_nodes.insert(event.current_node) {
                        journey.naive_hop_count += 1;
                    }
                }
                EventKind::EnqueueFwd => {}
                EventKind::Delivered => {
                    // A delivery anywhere but the destination is a
                    // relay-side acknowledgment, not a copy received
                    if event.current_node != flow.dst {
                        continue;
                    }
                    let hop_count = match journey.initial_ttl {
                        Some(initial) if event.ttl_after_decr > initial => {
                            return Err(JourneyError::NegativeHopCount {
                                flow,
                                initial_ttl: initial,
                                ttl_at_delivery: event.ttl_after_decr,
                            });
                        }
                        Some(initial) => Some(initial - event.ttl_after_decr),
                        None => None,
                    };
                    journey.deliveries.push(Delivery {
                        time: event.sim_time,
                        ttl_at_delivery: event.ttl_after_decr,
                        transit_time: journey.generated_time.map(|g| event.sim_time - g),
                        hop_count,
                    });
                }
            }
        }

        Ok(journey)
    }

    /// Whether at least one copy reached the destination
    pub fn delivered(&self) -> bool {
        !self.deliveries.is_empty()
    }

    /// Number of physical copies received at the destination
    pub fn copies_received(&self) -> usize {
        self.deliveries.len()
    }

    /// The earliest delivery; duplicates that arrived later are kept in
    /// [`PacketJourney::deliveries`] for overhead metrics
    pub fn first_arrival(&self) -> Option<&Delivery> {
        self.deliveries
            .iter()
            .min_by(|a, b| a.time.total_cmp(&b.time))
    }

    /// Mean/min/max metrics across every delivered copy
    pub fn copy_stats(&self) -> Option<CopyStats> {
        if self.deliveries.is_empty() {
            return None;
        }
        let transits: Vec<f64> = self
            .deliveries
            .iter()
            .filter_map(|d| d.transit_time)
            .collect();
        let hops: Vec<f64> = self
            .deliveries
            .iter()
            .filter_map(|d| d.hop_count.map(f64::from))
            .collect();
        Some(CopyStats {
            copies: self.deliveries.len(),
            transit: SampleSpread::of(&transits),
            hops: SampleSpread::of(&hops),
        })
    }
}
