//! Typed hop-event model for mesh delivery traces
//!
//! Models the per-hop rows a simulation emits while a data packet moves
//! through the mesh: the source transmission, forwards and queue
//! admissions at intermediate nodes, and deliveries at the destination.
//! Records arrive already loaded; parsing is a pure transformation.

use std::collections::HashMap;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// One already-loaded tabular record, field name to raw value
pub type RawRecord = HashMap<String, String>;

/// What a node was doing when it logged a hop event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum EventKind {
    /// Data packet transmitted by its source
    #[display("TX_SRC")]
    TxSrc,
    /// Data packet forwarded by an intermediate node
    #[display("TX_FWD_DATA")]
    TxFwdData,
    /// Acknowledgement forwarded by an intermediate node
    #[display("TX_FWD_ACK")]
    TxFwdAck,
    /// Packet admitted to a node's forwarding queue
    #[display("ENQUEUE_FWD")]
    EnqueueFwd,
    /// Packet handed to the application layer at some node
    #[display("DELIVERED")]
    Delivered,
}

impl EventKind {
    /// Parse the literal column value written by the simulator
    pub fn parse(value: &str) -> Result<Self, RecordError> {
        match value {
            "TX_SRC" => Ok(Self::TxSrc),
            "TX_FWD_DATA" => Ok(Self::TxFwdData),
            "TX_FWD_ACK" => Ok(Self::TxFwdAck),
            "ENQUEUE_FWD" => Ok(Self::EnqueueFwd),
            "DELIVERED" => Ok(Self::Delivered),
            other => Err(RecordError::UnknownEventKind(other.to_string())),
        }
    }
}

/// How the next hop was addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum HopType {
    /// A single neighbour chosen from the routing table
    #[display("UNICAST")]
    Unicast,
    /// All neighbours at once
    #[display("BCAST")]
    Bcast,
}

impl HopType {
    /// Parse the literal column value written by the simulator
    pub fn parse(value: &str) -> Result<Self, RecordError> {
        match value {
            "UNICAST" => Ok(Self::Unicast),
            "BCAST" => Ok(Self::Bcast),
            other => Err(RecordError::UnknownHopType(other.to_string())),
        }
    }
}

/// Identifies one logical packet's journey: (source, destination, sequence)
///
/// Sequence numbers are unique per source only within one flow; results
/// derived from a key are tagged with a repetition index before they are
/// aggregated across runs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[display("{src}->{dst}#{packet_seq}")]
pub struct FlowKey {
    pub src: u32,
    pub dst: u32,
    pub packet_seq: u64,
}

/// One observed hop-level occurrence in the network
///
/// Immutable once parsed; the reconstruction engine only reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HopEvent {
    /// Simulated clock, seconds
    pub sim_time: f64,
    pub kind: EventKind,
    /// Sequence number, unique per source within one flow
    pub packet_seq: u64,
    pub src: u32,
    pub dst: u32,
    /// Node observing/performing the event
    pub current_node: u32,
    /// Remaining hop budget after this node's decrement
    pub ttl_after_decr: u32,
    /// Next-hop node id, or the reserved broadcast address
    pub chosen_via: u32,
    pub next_hop_type: HopType,
}

impl HopEvent {
    /// Parse a raw record, rejecting missing fields and non-numeric
    /// values outright. No field is ever coerced or defaulted.
    pub fn from_record(record: &RawRecord) -> Result<Self, RecordError> {
        Ok(Self {
            sim_time: field_f64(record, "simTime")?,
            kind: EventKind::parse(field(record, "event")?)?,
            packet_seq: field_u64(record, "packetSeq")?,
            src: field_u32(record, "src")?,
            dst: field_u32(record, "dst")?,
            current_node: field_u32(record, "currentNode")?,
            ttl_after_decr: field_u32(record, "ttlAfterDecr")?,
            chosen_via: field_u32(record, "chosenVia")?,
            next_hop_type: HopType::parse(field(record, "nextHopType")?)?,
        })
    }

    /// The logical flow this event belongs to
    pub fn flow_key(&self) -> FlowKey {
        FlowKey {
            src: self.src,
            dst: self.dst,
            packet_seq: self.packet_seq,
        }
    }

    /// Whether this event addressed all neighbours, either by declared
    /// hop type or through the reserved broadcast address
    pub fn is_broadcast(&self, broadcast_address: u32) -> bool {
        self.next_hop_type == HopType::Bcast || self.chosen_via == broadcast_address
    }

    /// Events that choose a next hop and therefore reveal the
    /// forwarding discipline in use
    pub fn chooses_next_hop(&self) -> bool {
        matches!(
            self.kind,
            EventKind::TxSrc | EventKind::TxFwdData | EventKind::TxFwdAck
        )
    }
}

fn field<'a>(record: &'a RawRecord, name: &'static str) -> Result<&'a str, RecordError> {
    let value = record
        .get(name)
        .map(|v| v.trim())
        .ok_or(RecordError::MissingField(name))?;
    if value.is_empty() {
        return Err(RecordError::MissingField(name));
    }
    Ok(value)
}

fn field_f64(record: &RawRecord, name: &'static str) -> Result<f64, RecordError> {
    let raw = field(record, name)?;
    raw.parse().map_err(|_| RecordError::NonNumeric {
        field: name,
        value: raw.to_string(),
    })
}

fn field_u64(record: &RawRecord, name: &'static str) -> Result<u64, RecordError> {
    let raw = field(record, name)?;
    raw.parse().map_err(|_| RecordError::NonNumeric {
        field: name,
        value: raw.to_string(),
    })
}

fn field_u32(record: &RawRecord, name: &'static str) -> Result<u32, RecordError> {
    let raw = field(record, name)?;
    raw.parse().map_err(|_| RecordError::NonNumeric {
        field: name,
        value: raw.to_string(),
    })
}
