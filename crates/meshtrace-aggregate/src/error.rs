//! Error types for cross-run aggregation

use thiserror::Error;

use crate::scenario::ScenarioKey;

/// Errors raised while combining scenario results
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// Results under different keys were asked to combine. This is a
    /// caller bug, never an averaging opportunity.
    #[error("Grouping mismatch: cannot merge {actual} into {expected}")]
    GroupingMismatch {
        expected: ScenarioKey,
        actual: ScenarioKey,
    },
}

/// Result type alias for aggregation operations
pub type AggregateResult<T> = Result<T, AggregateError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ParamBucket;

    #[test]
    fn test_grouping_mismatch_display() {
        let err = AggregateError::GroupingMismatch {
            expected: ScenarioKey::new("dsdv", ParamBucket::PairCount(4)),
            actual: ScenarioKey::new("flooding", ParamBucket::PairCount(4)),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("dsdv/4-pairs"));
        assert!(msg.contains("flooding/4-pairs"));
    }
}
