//! Routing-mode classification
//!
//! Infers the forwarding discipline that produced a trace from its
//! unicast/broadcast split. The decision rule is a carried-over
//! heuristic: unicast forwards exceeding a configurable multiple of
//! broadcast forwards classify the run as table-driven, anything else as
//! flooding. The raw counts and ratio always travel with the label so
//! consumers can apply stricter thresholds of their own.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Forwarding discipline dominating a trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum RoutingMode {
    /// Forwards follow routing-table lookups toward one neighbour
    #[display("table-driven")]
    TableDriven,
    /// Forwards flood to all neighbours
    #[display("flooding")]
    Flooding,
}

/// Unicast/broadcast split of every next-hop choice in a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardMix {
    pub unicast: u64,
    pub broadcast: u64,
}

impl ForwardMix {
    pub fn new(unicast: u64, broadcast: u64) -> Self {
        Self { unicast, broadcast }
    }

    /// Total next-hop choices observed
    pub fn total(&self) -> u64 {
        self.unicast + self.broadcast
    }

    /// Fold another mix into this one
    pub fn absorb(&mut self, other: ForwardMix) {
        self.unicast += other.unicast;
        self.broadcast += other.broadcast;
    }

    /// Unicast share of all next-hop choices; `None` when the trace has
    /// no forwards at all
    pub fn unicast_ratio(&self) -> Option<f64> {
        let total = self.total();
        (total > 0).then(|| self.unicast as f64 / total as f64)
    }

    /// Classify the dominant forwarding discipline
    ///
    /// `dominance` is the multiple of the broadcast count the unicast
    /// count must exceed (2.0 by default configuration).
    pub fn classify(&self, dominance: f64) -> RoutingMode {
        if self.unicast as f64 > dominance * self.broadcast as f64 {
            RoutingMode::TableDriven
        } else {
            RoutingMode::Flooding
        }
    }
}
