//! # Meshtrace Core
//!
//! Core data model, configuration, and errors for mesh trace analysis.
//!
//! A discrete-event mesh simulation leaves two artifacts behind: a flat
//! event log of per-hop occurrences (transmissions, forwards, deliveries)
//! and scalar files of per-node measurements (coordinates, counters,
//! failure times). This crate gives both a strict typed representation:
//!
//! - **Events** ([`HopEvent`], [`EventLog`]): parsed from already-loaded
//!   tabular records, rejecting anything missing or non-numeric. Records
//!   group into flows by [`FlowKey`].
//! - **Scalars** ([`ScalarRecord`], [`ScalarSet`], [`CoordinateTable`]):
//!   the `scalar <module> <name> <value>` line format, with one
//!   role-and-offset convention mapping module paths to logical node ids.
//! - **Failures** ([`FailureRecord`]): raw failure observations with the
//!   canonical identity used for deduplication downstream.
//! - **Configuration** ([`AnalysisConfig`]): every tunable the analysis
//!   components depend on, passed in explicitly.
//!
//! The crate never touches the filesystem. Callers load records and lines
//! however they like and hand them over; everything here is a pure,
//! deterministic transformation over finite input.

pub mod config;
pub mod error;
pub mod event;
pub mod failure;
pub mod log;
pub mod scalar;

// Re-export main types
pub use config::{AnalysisConfig, ConfigWarning};
pub use error::{RecordError, ScalarError, TraceError, TraceResult};
pub use event::{EventKind, FlowKey, HopEvent, HopType, RawRecord};
pub use failure::FailureRecord;
pub use log::EventLog;
pub use scalar::{CoordinateTable, NodeRole, ScalarRecord, ScalarSet};
