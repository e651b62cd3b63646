//! Configuration for aggregation runs.

use tokio_util::sync::CancellationToken;

/// Options for one aggregation pass.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// How many sources to fetch concurrently. Concurrency never reorders
    /// output: per-source results are merged back in configured order.
    pub concurrency: usize,

    /// Cancels the whole run. In-flight fetches stop and whatever was
    /// gathered is returned as a partial result.
    pub cancel: CancellationToken,
}

impl AggregateOptions {
    /// Create options with defaults (concurrency 4, no external cancellation).
    pub fn new() -> Self {
        Self {
            concurrency: 4,
            cancel: CancellationToken::new(),
        }
    }

    /// Set the source-level fan-out.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Wire in an externally-owned cancellation token.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self::new()
    }
}
