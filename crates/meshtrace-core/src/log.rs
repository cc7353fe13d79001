//! Parsed event logs with per-record recovery
//!
//! A log holds one simulation's hop events in arrival order. Records that
//! fail to parse are skipped and counted rather than failing the run,
//! unless malformation crosses the configured tolerance.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AnalysisConfig;
use crate::error::{TraceError, TraceResult};
use crate::event::{EventKind, HopEvent, RawRecord};

/// One simulation's hop events, in arrival order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    pub events: Vec<HopEvent>,
    /// Records rejected during parsing
    pub malformed: usize,
}

impl EventLog {
    /// Build a log from already-parsed events
    pub fn from_events(events: Vec<HopEvent>) -> Self {
        Self {
            events,
            malformed: 0,
        }
    }

    /// Parse a record sequence into a log
    ///
    /// Malformed records are skipped, counted, and logged. Fails with
    /// [`TraceError::PervasiveMalformation`] when the rejected fraction
    /// exceeds `config.max_malformed_fraction`.
    pub fn parse<'a, I>(records: I, config: &AnalysisConfig) -> TraceResult<Self>
    where
        I: IntoIterator<Item = &'a RawRecord>,
    {
        let mut events = Vec::new();
        let mut malformed = 0usize;
        let mut total = 0usize;

        for record in records {
            total += 1;
            match HopEvent::from_record(record) {
                Ok(event) => events.push(event),
                Err(err) => {
                    malformed += 1;
                    debug!(%err, record = total - 1, "skipping malformed record");
                }
            }
        }

        if total > 0 && malformed as f64 / total as f64 > config.max_malformed_fraction {
            return Err(TraceError::PervasiveMalformation { malformed, total });
        }
        if malformed > 0 {
            warn!(malformed, total, "recovered from malformed records");
        }

        Ok(Self { events, malformed })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Count events of one kind across the whole log
    pub fn count_kind(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(event: &str, seq: &str, time: &str) -> RawRecord {
        [
            ("simTime", time),
            ("event", event),
            ("packetSeq", seq),
            ("src", "1000"),
            ("dst", "1001"),
            ("currentNode", "1000"),
            ("ttlAfterDecr", "5"),
            ("chosenVia", "3"),
            ("nextHopType", "UNICAST"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_parse_recovers_from_bad_records() {
        let config = AnalysisConfig::default();
        let records = vec![
            record("TX_SRC", "0", "1.0"),
            record("TX_SRC", "not-a-number", "2.0"),
            record("DELIVERED", "0", "3.0"),
        ];

        let log = EventLog::parse(records.iter(), &config).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.malformed, 1);
        assert_eq!(log.count_kind(EventKind::TxSrc), 1);
        assert_eq!(log.count_kind(EventKind::Delivered), 1);
    }

    #[test]
    fn test_pervasive_malformation_fails() {
        let config = AnalysisConfig::default();
        let records = vec![
            record("TX_SRC", "0", "1.0"),
            record("TX_SRC", "x", "2.0"),
            record("TX_SRC", "y", "3.0"),
        ];

        let err = EventLog::parse(records.iter(), &config).unwrap_err();
        assert!(matches!(
            err,
            TraceError::PervasiveMalformation {
                malformed: 2,
                total: 3
            }
        ));
    }

    #[test]
    fn test_empty_input_is_fine() {
        let config = AnalysisConfig::default();
        let log = EventLog::parse(std::iter::empty(), &config).unwrap();
        assert!(log.is_empty());
        assert_eq!(log.malformed, 0);
    }
}
