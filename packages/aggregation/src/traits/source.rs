//! The `ModelSource` trait for pluggable model listing.
//!
//! An adapter knows how to page through exactly one kind of remote source and
//! yield raw records. Adding a new source kind means a new implementation,
//! not branching logic inside the aggregator.

use futures::stream::BoxStream;

use crate::error::SourceResult;
use crate::types::record::{RawModelRecord, SourceDescriptor};

/// A lazy, paged sequence of raw records from one source.
///
/// Items arrive in upstream page and in-page order. An `Err` item terminates
/// the sequence for this source only; already-yielded records stay usable.
pub type RecordStream<'a> = BoxStream<'a, SourceResult<RawModelRecord>>;

/// A source of raw model records.
///
/// Implementations page through one remote listing endpoint:
/// - [`CatalogSource`](crate::sources::CatalogSource) - the regional catalog,
///   `nextLink` continuation
/// - [`RegistrySource`](crate::sources::RegistrySource) - a named registry,
///   `$skipToken` continuation
/// - [`MockSource`](crate::sources::MockSource) - canned pages for tests
pub trait ModelSource: Send + Sync {
    /// Identity of this source, attached to its records as provenance.
    fn descriptor(&self) -> SourceDescriptor;

    /// Start a fresh listing pass over this source.
    ///
    /// Pages are fetched lazily as the stream is consumed. A page fetch
    /// failure surfaces as one `Err` item and ends the stream; it is never a
    /// fatal fault for the caller.
    fn list_models(&self) -> RecordStream<'_>;
}
