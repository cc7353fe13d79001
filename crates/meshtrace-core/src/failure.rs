//! Raw node-failure observations

use serde::{Deserialize, Serialize};

/// One observed node failure
///
/// Raw observations may repeat: more than one component can report the
/// same physical failure. Identity for deduplication is the canonical
/// key, not the struct itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub node: u32,
    /// Simulated seconds at which the node died
    pub time: f64,
    pub repetition: u32,
}

impl FailureRecord {
    /// Canonical identity: repetition, node, and the failure time rounded
    /// to `decimals` sub-second places. Observations of one physical
    /// failure compare equal under this key.
    pub fn canonical_key(&self, decimals: u32) -> (u32, u32, i64) {
        let scale = 10f64.powi(decimals as i32);
        (self.repetition, self.node, (self.time * scale).round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_key_rounds_jitter_away() {
        let a = FailureRecord {
            node: 4,
            time: 120.000000000_2,
            repetition: 1,
        };
        let b = FailureRecord {
            node: 4,
            time: 120.000000000_4,
            repetition: 1,
        };
        assert_eq!(a.canonical_key(9), b.canonical_key(9));
    }

    #[test]
    fn test_canonical_key_separates_real_differences() {
        let a = FailureRecord {
            node: 4,
            time: 120.0,
            repetition: 1,
        };
        let b = FailureRecord {
            node: 4,
            time: 120.1,
            repetition: 1,
        };
        assert_ne!(a.canonical_key(9), b.canonical_key(9));

        let c = FailureRecord {
            node: 4,
            time: 120.0,
            repetition: 2,
        };
        assert_ne!(a.canonical_key(9), c.canonical_key(9));
    }
}
