//! Error types for trace analysis

use thiserror::Error;

/// Top-level error type for trace analysis
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    #[error("Scalar error: {0}")]
    Scalar(#[from] ScalarError),

    #[error("Malformed records are pervasive: {malformed} of {total} rejected")]
    PervasiveMalformation { malformed: usize, total: usize },
}

/// Errors raised while parsing one tabular event record
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Required field missing: {0}")]
    MissingField(&'static str),

    #[error("Non-numeric value in field {field}: {value:?}")]
    NonNumeric { field: &'static str, value: String },

    #[error("Unknown event kind: {0:?}")]
    UnknownEventKind(String),

    #[error("Unknown next-hop type: {0:?}")]
    UnknownHopType(String),
}

/// Errors raised while parsing scalar output lines
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScalarError {
    #[error("Malformed scalar line: {0:?}")]
    MalformedLine(String),

    #[error("Non-numeric value for scalar {name}: {value:?}")]
    NonNumericValue { name: String, value: String },
}

/// Result type alias for trace analysis operations
pub type TraceResult<T> = Result<T, TraceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_error_display() {
        let err = RecordError::MissingField("simTime");
        assert!(format!("{}", err).contains("simTime"));

        let err = RecordError::NonNumeric {
            field: "ttlAfterDecr",
            value: "abc".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("ttlAfterDecr"));
        assert!(msg.contains("abc"));

        let err = RecordError::UnknownEventKind("TX_WHAT".to_string());
        assert!(format!("{}", err).contains("TX_WHAT"));
    }

    #[test]
    fn test_scalar_error_display() {
        let err = ScalarError::MalformedLine("scalar".to_string());
        assert!(format!("{}", err).contains("Malformed scalar line"));

        let err = ScalarError::NonNumericValue {
            name: "failureTime".to_string(),
            value: "??".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("failureTime"));
        assert!(msg.contains("??"));
    }

    #[test]
    fn test_error_conversions() {
        let record_err = RecordError::MissingField("src");
        let trace_err: TraceError = record_err.into();
        assert!(matches!(trace_err, TraceError::Record(_)));

        let scalar_err = ScalarError::MalformedLine("x".to_string());
        let trace_err: TraceError = scalar_err.into();
        assert!(matches!(trace_err, TraceError::Scalar(_)));
    }

    #[test]
    fn test_pervasive_malformation_display() {
        let err = TraceError::PervasiveMalformation {
            malformed: 9,
            total: 10,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("9"));
        assert!(msg.contains("10"));
    }
}
