//! Typed errors for the aggregation library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can match on
//! what went wrong. Per-source unavailability is expected behavior here, not
//! control flow by exception: adapters return one `SourceError` and stop, and
//! the aggregator downgrades it to a reported [`SourceFailure`].

use serde::Serialize;
use thiserror::Error;

use crate::types::record::SourceDescriptor;

/// Errors a source adapter can hit while listing models.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source does not exist
    #[error("source not found: {0}")]
    NotFound(String),

    /// The source exists but the credential cannot read it
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// Transport-level failure (connection, timeout, malformed body)
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Non-success response from the service (rate limit, server error)
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
}

/// Result type alias for source adapter operations.
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// How a source failed, as reported in the final aggregation result.
///
/// The distinction is purely about what the caller still has: nothing
/// (`SourceUnavailable`) or a usable prefix (`PartialFetchFailure`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    /// The source could not be reached at all; zero records were gathered.
    SourceUnavailable,

    /// Some records were gathered before the stream broke; they are kept.
    PartialFetchFailure,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceUnavailable => f.write_str("source unavailable"),
            Self::PartialFetchFailure => f.write_str("partial fetch failure"),
        }
    }
}

/// One reported per-source failure in an aggregation run.
#[derive(Debug, Clone, Serialize)]
pub struct SourceFailure {
    /// Which source failed
    pub source: SourceDescriptor,

    /// Whether anything was salvaged from it
    pub kind: FailureKind,

    /// Human-readable cause, for the run summary
    pub message: String,
}

impl SourceFailure {
    /// Create a new failure entry.
    pub fn new(source: SourceDescriptor, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            source,
            kind,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_kind_display() {
        assert_eq!(
            FailureKind::SourceUnavailable.to_string(),
            "source unavailable"
        );
        assert_eq!(
            FailureKind::PartialFetchFailure.to_string(),
            "partial fetch failure"
        );
    }

    #[test]
    fn source_error_display_includes_cause() {
        let err = SourceError::Api {
            status: 429,
            message: "too many requests".to_string(),
        };
        assert_eq!(err.to_string(), "API error 429: too many requests");
    }
}
