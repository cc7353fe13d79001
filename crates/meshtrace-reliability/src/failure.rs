//! Failure-record deduplication
//!
//! Some traces emit the same physical failure as more than one raw
//! observation (several components reporting the same event). Observations
//! are collapsed on their canonical key, and the number dropped is part of
//! the result: duplicates are expected, counted, and reported, never
//! silently absorbed.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use meshtrace_core::FailureRecord;

/// Outcome of failure deduplication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dedup {
    /// Canonical records, sorted by (repetition, time, node)
    pub records: Vec<FailureRecord>,
    /// Raw observations dropped as duplicates
    pub dropped: usize,
}

impl Dedup {
    /// Failure times per repetition, ascending
    pub fn by_repetition(&self) -> BTreeMap<u32, Vec<f64>> {
        let mut by_rep: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        for record in &self.records {
            by_rep.entry(record.repetition).or_default().push(record.time);
        }
        by_rep
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Collapse raw failure observations onto their canonical keys
///
/// Order-independent: observations are sorted before scanning, so any
/// permutation of the same input set yields the same output. Idempotent:
/// deduplicating an already-deduplicated list drops nothing.
pub fn dedup_failures(observations: &[FailureRecord], decimals: u32) -> Dedup {
    let mut sorted: Vec<FailureRecord> = observations.to_vec();
    sorted.sort_by(|a, b| {
        a.canonical_key(decimals)
            .cmp(&b.canonical_key(decimals))
            .then(a.time.total_cmp(&b.time))
    });

    let mut seen = BTreeSet::new();
    let mut records = Vec::new();
    let mut dropped = 0usize;
    for record in sorted {
        if seen.insert(record.canonical_key(decimals)) {
            records.push(record);
        } else {
            dropped += 1;
        }
    }

    records.sort_by(|a, b| {
        a.repetition
            .cmp(&b.repetition)
            .then(a.time.total_cmp(&b.time))
            .then(a.node.cmp(&b.node))
    });

    if dropped > 0 {
        debug!(dropped, kept = records.len(), "dropped duplicate failure observations");
    }
    Dedup { records, dropped }
}
