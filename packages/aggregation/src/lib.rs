//! Multi-Source Model Catalog Aggregation Library
//!
//! Queries a primary model catalog (by region) plus any number of named model
//! registries, normalizes their divergent schemas into one unified record
//! shape, and returns a single ordered dataset with per-source provenance.
//!
//! # Design Philosophy
//!
//! - Sources fail independently; one broken registry never aborts the run
//! - Adapters yield lazy paged streams; the aggregator owns failure policy
//! - Normalization is total: missing upstream fields become sentinels
//! - Output order is deterministic and concurrency-invariant
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use aggregation::{aggregate, AggregateOptions, CatalogSource, RegistrySource};
//!
//! let sources: Vec<Arc<dyn ModelSource>> = vec![
//!     Arc::new(CatalogSource::new(token.clone(), subscription_id, "eastus")),
//!     Arc::new(RegistrySource::new(token.clone(), "azureml-meta")),
//! ];
//!
//! let result = aggregate(&sources, &AggregateOptions::new()).await;
//! for failure in &result.source_errors {
//!     eprintln!("{}: {}", failure.source.label(), failure.message);
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - The `ModelSource` adapter abstraction
//! - [`types`] - Record shapes and aggregation options
//! - [`sources`] - Source implementations (catalog, registry, mock)
//! - [`normalize`] - Total per-source-kind schema normalization
//! - [`aggregate`] - The aggregation pipeline

pub mod aggregate;
pub mod credentials;
pub mod error;
pub mod normalize;
pub mod sources;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{FailureKind, SourceError, SourceFailure};
pub use traits::source::{ModelSource, RecordStream};
pub use types::{
    config::AggregateOptions,
    record::{RawModelRecord, SourceDescriptor, SourceKind, UnifiedModelRecord},
};

// Re-export the pipeline entry point
pub use aggregate::{aggregate, AggregationResult};

// Re-export normalization
pub use normalize::normalize;

// Re-export sources
pub use sources::{CatalogSource, MockSource, RegistrySource};

// Re-export credential wrapper
pub use credentials::AccessToken;
