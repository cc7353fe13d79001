//! # Meshtrace Aggregate
//!
//! Cross-run aggregation of journey and reliability results.
//!
//! Repeated simulation runs of one scenario (a protocol label plus a
//! parameter bucket such as pair count or mobility speed) reduce to one
//! summary row each. Grouping keys compare exactly: results file under
//! the [`ScenarioKey`] the caller names, scenarios with different
//! repetition counts summarize side by side, and an attempt to merge
//! groups under different keys is an error, never a silent average.
//!
//! ```rust,ignore
//! use meshtrace_aggregate::{ParamBucket, ScenarioKey, ScenarioTable};
//!
//! let mut table = ScenarioTable::new();
//! let key = ScenarioKey::new("flooding", ParamBucket::PairCount(4));
//! for (repetition, log) in logs.iter().enumerate() {
//!     let run = reconstruct_run(log, repetition as u32, &config);
//!     table.add_run(&key, &run.summary());
//! }
//! let rows = table.summarize();
//! ```

pub mod error;
pub mod group;
pub mod scenario;
pub mod table;

// Re-export main types
pub use error::{AggregateError, AggregateResult};
pub use group::{ReliabilityDigest, RunDigest, ScenarioGroup, ScenarioSummary};
pub use scenario::{ParamBucket, ScenarioKey};
pub use table::ScenarioTable;
