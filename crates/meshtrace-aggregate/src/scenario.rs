//! Scenario grouping keys
//!
//! Repetitions aggregate along two axes: the protocol label under test
//! and one parameter bucket (traffic pair count, mobile-node speed).
//! Keys compare exactly; buckets are never floats, so two scenarios
//! either match or they do not.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Parameter bucket a scenario's repetitions share
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
pub enum ParamBucket {
    /// Concurrent end-node pairs exchanging traffic
    #[display("{_0}-pairs")]
    PairCount(u32),
    /// Mobile-node speed, whole metres per second
    #[display("{_0}mps")]
    MobilitySpeed(u32),
    /// Scenario has no parameter dimension
    #[display("default")]
    Unspecified,
}

/// Exact grouping key for cross-run aggregation
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[display("{protocol}/{bucket}")]
pub struct ScenarioKey {
    /// Protocol label, e.g. "dsdv" or "flooding"
    pub protocol: String,
    pub bucket: ParamBucket,
}

impl ScenarioKey {
    pub fn new(protocol: impl Into<String>, bucket: ParamBucket) -> Self {
        Self {
            protocol: protocol.into(),
            bucket,
        }
    }
}
