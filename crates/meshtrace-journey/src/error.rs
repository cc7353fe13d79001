//! Error types for journey reconstruction

use meshtrace_core::FlowKey;
use thiserror::Error;

/// Errors raised while reconstructing one flow
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JourneyError {
    #[error(
        "TTL trail for flow {flow} runs backwards: {initial_ttl} at source, {ttl_at_delivery} at delivery"
    )]
    NegativeHopCount {
        flow: FlowKey,
        initial_ttl: u32,
        ttl_at_delivery: u32,
    },
}

/// Result type alias for journey operations
pub type JourneyResult<T> = Result<T, JourneyError>;
