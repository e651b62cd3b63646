//! Core trait abstractions.

pub mod source;

pub use source::{ModelSource, RecordStream};
