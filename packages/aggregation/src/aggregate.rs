//! The aggregation pipeline: fan out over configured sources, normalize,
//! merge in configured order, and report per-source failures.
//!
//! A single source's total failure never aborts the run. Failure kind is
//! decided here, not in the adapters: a source that yielded nothing is
//! `SourceUnavailable`, one that broke mid-stream is `PartialFetchFailure`
//! and keeps its prefix.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::{FailureKind, SourceFailure};
use crate::normalize::normalize;
use crate::traits::source::ModelSource;
use crate::types::config::AggregateOptions;
use crate::types::record::{SourceDescriptor, UnifiedModelRecord};

/// Result of one aggregation pass.
///
/// `records` is ordered by configured source order, then per-source page
/// order; the order is deterministic for fixed configuration and upstream
/// responses regardless of fetch concurrency.
#[derive(Debug, Clone, Default)]
pub struct AggregationResult {
    /// All successfully normalized records, tagged with provenance.
    pub records: Vec<UnifiedModelRecord>,

    /// One entry per failed source, in configured source order.
    pub source_errors: Vec<SourceFailure>,
}

impl AggregationResult {
    /// True when every configured source was listed without failure.
    ///
    /// An empty `records` with no errors is still a complete, successful run.
    pub fn is_complete(&self) -> bool {
        self.source_errors.is_empty()
    }

    /// Record count per source, in output order.
    pub fn counts_by_source(&self) -> Vec<(SourceDescriptor, usize)> {
        let mut counts: Vec<(SourceDescriptor, usize)> = Vec::new();
        for record in &self.records {
            match counts.iter_mut().find(|(source, _)| *source == record.source) {
                Some((_, count)) => *count += 1,
                None => counts.push((record.source.clone(), 1)),
            }
        }
        counts
    }
}

/// Accumulation slot for one source. Slots are private to their fetch task,
/// so concurrent sources never contend on a shared collection.
struct SourceSlot {
    records: Vec<UnifiedModelRecord>,
    failure: Option<SourceFailure>,
}

/// Run one aggregation pass over the configured sources.
///
/// Sources are fetched with bounded concurrency (`options.concurrency`) but
/// results are merged back in the order `sources` was given, catalog first by
/// convention. Cancelling `options.cancel` stops in-flight fetches and
/// returns whatever was gathered as a partial result.
pub async fn aggregate(
    sources: &[Arc<dyn ModelSource>],
    options: &AggregateOptions,
) -> AggregationResult {
    info!(
        sources = sources.len(),
        concurrency = options.concurrency,
        "starting aggregation pass"
    );

    let mut slots: Vec<(usize, SourceSlot)> = stream::iter(sources.iter().cloned().enumerate())
        .map(|(index, source)| {
            let cancel = options.cancel.clone();
            async move { (index, drain_source(source.as_ref(), &cancel).await) }
        })
        .buffer_unordered(options.concurrency.max(1))
        .collect()
        .await;

    // Restore configured source order so output is concurrency-invariant.
    slots.sort_by_key(|(index, _)| *index);

    let mut result = AggregationResult::default();
    for (_, slot) in slots {
        result.records.extend(slot.records);
        if let Some(failure) = slot.failure {
            result.source_errors.push(failure);
        }
    }

    info!(
        records = result.records.len(),
        failed_sources = result.source_errors.len(),
        "aggregation pass complete"
    );

    result
}

/// Consume one source's stream to exhaustion, normalizing as records arrive.
async fn drain_source(source: &dyn ModelSource, cancel: &CancellationToken) -> SourceSlot {
    let descriptor = source.descriptor();
    let mut slot = SourceSlot {
        records: Vec::new(),
        failure: None,
    };

    if cancel.is_cancelled() {
        slot.failure = Some(SourceFailure::new(
            descriptor,
            FailureKind::SourceUnavailable,
            "run cancelled before this source was fetched",
        ));
        return slot;
    }

    info!(source = %descriptor, "listing source");
    let mut records = source.list_models();

    loop {
        let item = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!(
                    source = %descriptor,
                    records = slot.records.len(),
                    "run cancelled mid-source"
                );
                slot.failure = Some(SourceFailure::new(
                    descriptor.clone(),
                    classify(slot.records.len()),
                    "run cancelled",
                ));
                break;
            }
            item = records.next() => item,
        };

        match item {
            Some(Ok(raw)) => slot.records.push(normalize(&raw, &descriptor)),
            Some(Err(error)) => {
                warn!(
                    source = %descriptor,
                    records = slot.records.len(),
                    error = %error,
                    "source failed; keeping what was gathered"
                );
                slot.failure = Some(SourceFailure::new(
                    descriptor.clone(),
                    classify(slot.records.len()),
                    error.to_string(),
                ));
                break;
            }
            None => {
                info!(source = %descriptor, records = slot.records.len(), "source complete");
                break;
            }
        }
    }

    slot
}

/// Zero records gathered means the source was effectively unreachable.
fn classify(records_gathered: usize) -> FailureKind {
    if records_gathered == 0 {
        FailureKind::SourceUnavailable
    } else {
        FailureKind::PartialFetchFailure
    }
}
