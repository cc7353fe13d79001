//! Analysis configuration
//!
//! Every tunable the algorithmic components depend on lives here and is
//! passed in explicitly by the caller: node id-offset conventions, the
//! broadcast sentinel, classifier threshold, dedup precision, and grid
//! resolutions. Components never hard-code these values.

use serde::{Deserialize, Serialize};

use crate::scalar::NodeRole;

/// Configuration for one analysis pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Reserved next-hop address meaning "all neighbours"
    pub broadcast_address: u32,
    /// Module-path tag identifying relay nodes
    pub relay_tag: String,
    /// Module-path tag identifying end nodes
    pub end_node_tag: String,
    /// Module-path tag identifying mobile rescue nodes
    pub rescue_tag: String,
    /// Added to a relay's module index to form its logical id
    pub relay_id_offset: u32,
    /// Added to an end node's module index to form its logical id
    pub end_node_id_offset: u32,
    /// Added to a rescue node's module index to form its logical id
    pub rescue_id_offset: u32,
    /// Unicast forwards must exceed this multiple of broadcast forwards
    /// for a run to classify as table-driven routing
    pub unicast_dominance: f64,
    /// Sub-second decimal places at which two failure observations
    /// compare equal during deduplication
    pub failure_time_decimals: u32,
    /// Sample points on the empirical-vs-exponential CDF grid
    pub cdf_grid_points: usize,
    /// Buckets for the coarse cumulative-failure and survival curves
    pub curve_buckets: usize,
    /// Fraction of malformed records above which parsing an event log
    /// fails outright instead of recovering per record
    pub max_malformed_fraction: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            broadcast_address: 16_777_215,
            relay_tag: ".loRaNodes[".to_string(),
            end_node_tag: ".loRaEndNodes[".to_string(),
            rescue_tag: ".loRaRescueNodes[".to_string(),
            relay_id_offset: 0,
            end_node_id_offset: 1000,
            rescue_id_offset: 2000,
            unicast_dominance: 2.0,
            failure_time_decimals: 9,
            cdf_grid_points: 100,
            curve_buckets: 20,
            max_malformed_fraction: 0.5,
        }
    }
}

impl AnalysisConfig {
    /// Module-path tag for a node role
    pub fn module_tag(&self, role: NodeRole) -> &str {
        match role {
            NodeRole::Relay => &self.relay_tag,
            NodeRole::EndNode => &self.end_node_tag,
            NodeRole::Rescue => &self.rescue_tag,
        }
    }

    /// Logical-id offset for a node role
    pub fn node_id_offset(&self, role: NodeRole) -> u32 {
        match role {
            NodeRole::Relay => self.relay_id_offset,
            NodeRole::EndNode => self.end_node_id_offset,
            NodeRole::Rescue => self.rescue_id_offset,
        }
    }

    /// Validate configuration invariants
    ///
    /// Returns a list of warnings/errors if the configuration has potential
    /// issues. An empty list means the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.unicast_dominance <= 0.0 {
            warnings.push(ConfigWarning::NonPositiveDominance);
        }

        if self.cdf_grid_points == 0 {
            warnings.push(ConfigWarning::EmptyCdfGrid);
        }

        if self.curve_buckets == 0 {
            warnings.push(ConfigWarning::EmptyCurveBuckets);
        }

        if !(0.0..=1.0).contains(&self.max_malformed_fraction) {
            warnings.push(ConfigWarning::MalformedFractionOutOfRange);
        }

        // Offsets must keep role id ranges apart
        let mut offsets = [
            self.relay_id_offset,
            self.end_node_id_offset,
            self.rescue_id_offset,
        ];
        offsets.sort_unstable();
        if offsets[0] == offsets[1] || offsets[1] == offsets[2] {
            warnings.push(ConfigWarning::OverlappingIdOffsets);
        }

        // Rounding beyond f64 precision stops distinguishing observations
        if self.failure_time_decimals > 12 {
            warnings.push(ConfigWarning::ExcessiveDedupPrecision);
        }

        warnings
    }

    /// Check if the configuration is valid (no warnings)
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// Configuration warnings and errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigWarning {
    /// Classifier threshold is zero or negative
    NonPositiveDominance,
    /// CDF grid has no sample points
    EmptyCdfGrid,
    /// Curve bucket count is zero
    EmptyCurveBuckets,
    /// Malformation tolerance is outside [0, 1]
    MalformedFractionOutOfRange,
    /// Two node roles share the same logical-id offset
    OverlappingIdOffsets,
    /// Dedup precision exceeds what f64 times can carry
    ExcessiveDedupPrecision,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::NonPositiveDominance => {
                write!(f, "unicast_dominance must be positive")
            }
            ConfigWarning::EmptyCdfGrid => {
                write!(f, "cdf_grid_points is zero")
            }
            ConfigWarning::EmptyCurveBuckets => {
                write!(f, "curve_buckets is zero")
            }
            ConfigWarning::MalformedFractionOutOfRange => {
                write!(f, "max_malformed_fraction is outside [0, 1]")
            }
            ConfigWarning::OverlappingIdOffsets => {
                write!(f, "two node roles share a logical-id offset")
            }
            ConfigWarning::ExcessiveDedupPrecision => {
                write!(f, "failure_time_decimals is beyond f64 precision (> 12)")
            }
        }
    }
}
