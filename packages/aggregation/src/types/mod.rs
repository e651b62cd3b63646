//! Data types for the aggregation pipeline.

pub mod config;
pub mod record;

pub use config::AggregateOptions;
pub use record::{RawModelRecord, SourceDescriptor, SourceKind, UnifiedModelRecord};
