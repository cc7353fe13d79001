//! Typed model for the simulator's scalar output
//!
//! Scalar files carry one `scalar <module> <name> <value>` line per
//! recorded value, with `run` header lines marking repetition boundaries.
//! Module paths encode a node's role and index (`Net.loRaEndNodes[0]`,
//! `Net.loRaNodes[3]`); the role determines the logical-id offset, so one
//! convention serves coordinates, counters, and failure times alike.
//!
//! All parsing here is pure text transformation. Callers do the file I/O
//! and hand over already-loaded lines.

use std::collections::BTreeMap;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::error::ScalarError;
use crate::failure::FailureRecord;

/// Role a node plays in the mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum NodeRole {
    /// Fixed relay forming the mesh backbone
    #[display("relay")]
    Relay,
    /// Traffic source/sink at the network edge
    #[display("end")]
    EndNode,
    /// Mobile node the mesh is tracking
    #[display("rescue")]
    Rescue,
}

impl NodeRole {
    /// Match order matters: the relay tag is a suffix of the others, so
    /// the more specific tags are tried first.
    pub const ALL: [NodeRole; 3] = [NodeRole::EndNode, NodeRole::Rescue, NodeRole::Relay];
}

/// One scalar line from the simulator, tagged with its repetition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarRecord {
    pub module: String,
    pub name: String,
    pub value: f64,
    pub repetition: u32,
}

impl ScalarRecord {
    /// Parse a `scalar <module> <name> <value>` line
    ///
    /// Returns `Ok(None)` for lines that are not scalar records (run
    /// headers, vector declarations, attributes, blank lines). A scalar
    /// line with missing parts or a non-numeric value is an error.
    pub fn parse_line(line: &str, repetition: u32) -> Result<Option<Self>, ScalarError> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix("scalar ") else {
            return Ok(None);
        };

        let mut parts = rest.split_whitespace();
        let module = parts
            .next()
            .ok_or_else(|| ScalarError::MalformedLine(line.to_string()))?;
        let name = parts
            .next()
            .ok_or_else(|| ScalarError::MalformedLine(line.to_string()))?;
        let raw = parts
            .next()
            .ok_or_else(|| ScalarError::MalformedLine(line.to_string()))?;
        let value = raw.parse::<f64>().map_err(|_| ScalarError::NonNumericValue {
            name: name.to_string(),
            value: raw.to_string(),
        })?;

        Ok(Some(Self {
            module: module.to_string(),
            name: name.to_string(),
            value,
            repetition,
        }))
    }

    /// Extract the repetition index from a `run ...` header line, where
    /// it appears as `-r <n>`
    pub fn parse_run_header(line: &str) -> Option<u32> {
        let rest = line.trim().strip_prefix("run ")?;
        let mut tokens = rest.split_whitespace();
        while let Some(token) = tokens.next() {
            if token == "-r"
                && let Some(next) = tokens.next()
                && let Ok(rep) = next.parse()
            {
                return Some(rep);
            }
        }
        None
    }

    /// Logical node id encoded in the module path, resolved through the
    /// role tags and id offsets in `config`. `None` for modules that are
    /// not nodes (radio medium, visualizer, ...).
    pub fn node_id(&self, config: &AnalysisConfig) -> Option<u32> {
        for role in NodeRole::ALL {
            let tag = config.module_tag(role);
            if let Some(index) = extract_index(&self.module, tag) {
                return Some(config.node_id_offset(role) + index);
            }
        }
        None
    }
}

fn extract_index(module: &str, tag: &str) -> Option<u32> {
    let start = module.find(tag)? + tag.len();
    let end = module[start..].find(']')? + start;
    module[start..end].parse().ok()
}

/// An in-memory collection of scalar records with typed queries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScalarSet {
    pub records: Vec<ScalarRecord>,
}

impl ScalarSet {
    pub fn new(records: Vec<ScalarRecord>) -> Self {
        Self { records }
    }

    /// Parse a whole scalar file body, tracking the repetition index
    /// across run headers
    pub fn parse_lines<'a, I>(lines: I) -> Result<Self, ScalarError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut repetition = 0;
        let mut records = Vec::new();

        for line in lines {
            if let Some(rep) = ScalarRecord::parse_run_header(line) {
                repetition = rep;
                continue;
            }
            if let Some(record) = ScalarRecord::parse_line(line, repetition)? {
                records.push(record);
            }
        }

        Ok(Self { records })
    }

    /// Fold another set into this one (e.g. per-file sets of one batch)
    pub fn extend(&mut self, other: ScalarSet) {
        self.records.extend(other.records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Raw failure-time observations, duplicates included
    pub fn failure_times(&self, config: &AnalysisConfig) -> Vec<FailureRecord> {
        self.records
            .iter()
            .filter(|r| r.name == "failureTime")
            .filter_map(|r| {
                r.node_id(config).map(|node| FailureRecord {
                    node,
                    time: r.value,
                    repetition: r.repetition,
                })
            })
            .collect()
    }

    /// Per-(repetition, node) value of a named scalar. When a node
    /// reports the same scalar more than once, the last value wins.
    pub fn node_values(&self, name: &str, config: &AnalysisConfig) -> BTreeMap<(u32, u32), f64> {
        let mut values = BTreeMap::new();
        for record in self.records.iter().filter(|r| r.name == name) {
            if let Some(node) = record.node_id(config) {
                values.insert((record.repetition, node), record.value);
            }
        }
        values
    }

    /// Total energy drawn across all nodes of one repetition, summing
    /// whichever energy scalars the simulator emitted. `None` when no
    /// energy scalars exist for the repetition.
    pub fn total_energy(&self, repetition: u32) -> Option<f64> {
        const ENERGY_SCALARS: [&str; 3] = [
            "totalEnergyConsumed",
            "residualEnergyCapacity",
            "energyConsumed",
        ];

        let mut total = 0.0;
        let mut seen = false;
        for record in &self.records {
            if record.repetition == repetition
                && ENERGY_SCALARS.contains(&record.name.as_str())
            {
                total += record.value.abs();
                seen = true;
            }
        }
        seen.then_some(total)
    }
}

/// Node coordinates per logical id
///
/// End nodes report `positionX`/`positionY`, relay nodes `CordiX`/`CordiY`;
/// both spellings land in the same table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoordinateTable {
    positions: BTreeMap<u32, (Option<f64>, Option<f64>)>,
}

impl CoordinateTable {
    /// Collect coordinates from a scalar set
    pub fn from_scalars(set: &ScalarSet, config: &AnalysisConfig) -> Self {
        let mut table = Self::default();
        for record in &set.records {
            let is_x = matches!(record.name.as_str(), "CordiX" | "positionX");
            let is_y = matches!(record.name.as_str(), "CordiY" | "positionY");
            if !is_x && !is_y {
                continue;
            }
            let Some(node) = record.node_id(config) else {
                continue;
            };
            let entry = table.positions.entry(node).or_insert((None, None));
            if is_x {
                entry.0 = Some(record.value);
            } else {
                entry.1 = Some(record.value);
            }
        }
        table
    }

    /// Complete (x, y) for a node; `None` while either axis is missing
    pub fn get(&self, node: u32) -> Option<(f64, f64)> {
        match self.positions.get(&node) {
            Some((Some(x), Some(y))) => Some((*x, *y)),
            _ => None,
        }
    }

    /// Euclidean distance between two nodes, in the simulator's metres
    pub fn distance(&self, a: u32, b: u32) -> Option<f64> {
        let (ax, ay) = self.get(a)?;
        let (bx, by) = self.get(b)?;
        Some((ax - bx).hypot(ay - by))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
