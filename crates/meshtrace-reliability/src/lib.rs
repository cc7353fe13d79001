//! # Meshtrace Reliability
//!
//! Failure/survival statistics for mesh simulation runs.
//!
//! ## Pipeline
//!
//! Raw failure observations come out of the simulator noisy: the same
//! physical failure can be reported by several components. The engine
//! first collapses them onto canonical keys ([`dedup_failures`]),
//! counting what it dropped, then derives per-repetition statistics:
//!
//! - **Intervals** ([`IntervalStats`]): consecutive inter-failure gaps,
//!   sample mean and Bessel-corrected deviation, coefficient of
//!   variation, and the exponential maximum-likelihood rate λ̂ = 1/mean.
//! - **Model comparison** ([`CdfComparison`]): the empirical CDF sampled
//!   against the fitted exponential, shifted to the first failure time.
//! - **Survival** ([`km_survival`]): the Kaplan–Meier step curve, plus
//!   coarse bucketed curves ([`bucketed_curves`]) for plotting.
//! - **Node stats** ([`node_packet_stats`], [`partition_candidates`]):
//!   per-node delivery rates from scalar counters, and nodes that fell
//!   silent without failing.
//!
//! [`ReliabilityReport`] bundles a repetition's results. Runs with fewer
//! than two failures report their statistics as absent instead of
//! failing: sparse runs are data, not errors.

pub mod cdf;
pub mod failure;
pub mod intervals;
pub mod nodes;
pub mod report;
pub mod survival;

// Re-export main types
pub use cdf::{CdfComparison, CdfPoint};
pub use failure::{Dedup, dedup_failures};
pub use intervals::{IntervalRow, IntervalStats};
pub use nodes::{NodePacketStats, node_packet_stats, partition_candidates};
pub use report::ReliabilityReport;
pub use survival::{CurvePoint, SurvivalPoint, bucketed_curves, km_survival};
