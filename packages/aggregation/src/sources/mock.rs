//! Mock source for testing.
//!
//! Canned pages, injectable failures, and an optional never-completing tail
//! for exercising cancellation. Lives in `src` (not behind `cfg(test)`) so
//! downstream crates can drive the aggregator in their own tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_stream::try_stream;
use serde_json::{json, Value};

use crate::error::SourceError;
use crate::traits::source::{ModelSource, RecordStream};
use crate::types::record::{RawModelRecord, SourceDescriptor};

/// Failure to inject after the canned pages are exhausted.
#[derive(Debug, Clone)]
enum MockFailure {
    NotFound,
    AccessDenied,
    Api { status: u16, message: String },
}

impl MockFailure {
    fn to_error(&self, identifier: &str) -> SourceError {
        match self {
            Self::NotFound => SourceError::NotFound(identifier.to_string()),
            Self::AccessDenied => SourceError::AccessDenied(identifier.to_string()),
            Self::Api { status, message } => SourceError::Api {
                status: *status,
                message: message.clone(),
            },
        }
    }
}

/// A configurable in-memory source.
///
/// # Example
///
/// ```rust
/// use aggregation::sources::MockSource;
///
/// let source = MockSource::registry("azureml-meta")
///     .with_page(vec![
///         MockSource::record("Llama-3-8B", "2"),
///         MockSource::record("Llama-3-70B", "1"),
///     ]);
/// ```
pub struct MockSource {
    descriptor: SourceDescriptor,
    pages: Vec<Vec<RawModelRecord>>,
    failure: Option<MockFailure>,
    pend_after_pages: bool,
    list_calls: AtomicUsize,
}

impl MockSource {
    /// A mock standing in for the catalog.
    pub fn catalog() -> Self {
        Self::with_descriptor(SourceDescriptor::catalog())
    }

    /// A mock standing in for a named registry.
    pub fn registry(name: impl Into<String>) -> Self {
        Self::with_descriptor(SourceDescriptor::registry(name))
    }

    fn with_descriptor(descriptor: SourceDescriptor) -> Self {
        Self {
            descriptor,
            pages: Vec::new(),
            failure: None,
            pend_after_pages: false,
            list_calls: AtomicUsize::new(0),
        }
    }

    /// A registry mock that fails immediately as nonexistent.
    pub fn unavailable(name: impl Into<String>) -> Self {
        Self::registry(name).failing_not_found()
    }

    /// Append one canned page of records.
    pub fn with_page(mut self, records: Vec<RawModelRecord>) -> Self {
        self.pages.push(records);
        self
    }

    /// Fail with "not found" after the canned pages (immediately if none).
    pub fn failing_not_found(mut self) -> Self {
        self.failure = Some(MockFailure::NotFound);
        self
    }

    /// Fail with "access denied" after the canned pages.
    pub fn failing_access_denied(mut self) -> Self {
        self.failure = Some(MockFailure::AccessDenied);
        self
    }

    /// Fail with an API error after the canned pages.
    pub fn failing_api(mut self, status: u16, message: impl Into<String>) -> Self {
        self.failure = Some(MockFailure::Api {
            status,
            message: message.into(),
        });
        self
    }

    /// After the canned pages, pend forever instead of completing.
    ///
    /// Used to exercise cancellation mid-source.
    pub fn pending_after_pages(mut self) -> Self {
        self.pend_after_pages = true;
        self
    }

    /// How many times `list_models` was invoked.
    pub fn list_call_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Build a minimal raw record in the registry vocabulary.
    pub fn record(name: &str, version: &str) -> RawModelRecord {
        Self::record_from(json!({ "name": name, "version": version }))
    }

    /// Build a raw record from an arbitrary JSON object.
    pub fn record_from(value: Value) -> RawModelRecord {
        RawModelRecord::from_value(value).expect("mock records must be JSON objects")
    }
}

impl ModelSource for MockSource {
    fn descriptor(&self) -> SourceDescriptor {
        self.descriptor.clone()
    }

    fn list_models(&self) -> RecordStream<'_> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        let pages = self.pages.clone();
        let failure = self.failure.clone();
        let pend = self.pend_after_pages;
        let identifier = self.descriptor.identifier.clone();

        Box::pin(try_stream! {
            for page in pages {
                for record in page {
                    yield record;
                }
            }
            if let Some(failure) = failure {
                Err(failure.to_error(&identifier))?;
            }
            if pend {
                futures::future::pending::<()>().await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn yields_pages_in_order_then_completes() {
        let source = MockSource::registry("azureml")
            .with_page(vec![MockSource::record("a", "1")])
            .with_page(vec![MockSource::record("b", "1"), MockSource::record("c", "2")]);

        let records: Vec<_> = source.list_models().collect().await;

        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.is_ok()));
        let names: Vec<_> = records
            .iter()
            .map(|r| r.as_ref().unwrap().lookup_text("name").unwrap())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn injected_failure_arrives_after_records() {
        let source = MockSource::registry("azureml")
            .with_page(vec![MockSource::record("a", "1")])
            .failing_api(500, "boom");

        let mut stream = source.list_models();
        assert!(stream.next().await.unwrap().is_ok());

        let err = stream.next().await.unwrap().unwrap_err();
        assert!(matches!(err, SourceError::Api { status: 500, .. }));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn unavailable_fails_with_zero_records() {
        let source = MockSource::unavailable("azureml-xai");
        let mut stream = source.list_models();

        let err = stream.next().await.unwrap().unwrap_err();
        assert!(matches!(err, SourceError::NotFound(name) if name == "azureml-xai"));
    }

    #[tokio::test]
    async fn tracks_list_calls() {
        let source = MockSource::catalog();
        assert_eq!(source.list_call_count(), 0);

        let _ = source.list_models().collect::<Vec<_>>().await;
        let _ = source.list_models().collect::<Vec<_>>().await;
        assert_eq!(source.list_call_count(), 2);
    }
}
