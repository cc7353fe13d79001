//! # Meshtrace Journey
//!
//! Flow grouping, packet-journey reconstruction, and routing-mode
//! classification for mesh delivery traces.
//!
//! ## Overview
//!
//! A simulation's event log is a flat, unordered stream of per-hop
//! records. This crate correlates that stream back into causally-ordered
//! per-packet delivery journeys:
//!
//! 1. **Group** events by flow (source, destination, sequence) and sort
//!    each group by simulated time ([`group_by_flow`]).
//! 2. **Scan** each group once, rebuilding the journey: generation time
//!    and initial TTL at the source transmit, network reach from the
//!    nodes touched, and one [`Delivery`] entry per physical copy that
//!    reached the destination ([`PacketJourney::reconstruct`]).
//! 3. **Classify** the forwarding discipline from the run's
//!    unicast/broadcast split ([`ForwardMix::classify`]).
//!
//! Opportunistic broadcast routinely delivers several copies of one
//! logical packet, so first-arrival metrics ([`PacketJourney::first_arrival`])
//! and all-copies metrics ([`PacketJourney::copy_stats`]) are separate,
//! independently requestable views. An undelivered flow is an expected
//! outcome under lossy radio propagation, not an error; a TTL trail that
//! runs backwards is a malformed trace and rejects its flow.
//!
//! [`reconstruct_run`] wraps the whole pipeline for one repetition and
//! produces the immutable [`RunSummary`] consumed by cross-run
//! aggregation.

pub mod classify;
pub mod error;
pub mod flow;
pub mod journey;
pub mod run;

#[cfg(test)]
mod integration_scenarios;

// Re-export main types
pub use classify::{ForwardMix, RoutingMode};
pub use error::{JourneyError, JourneyResult};
pub use flow::group_by_flow;
pub use journey::{CopyStats, Delivery, PacketJourney, SampleSpread};
pub use run::{FlowMetrics, RunReconstruction, RunSummary, reconstruct_run};
