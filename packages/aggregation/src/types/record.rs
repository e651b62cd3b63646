//! Record shapes: source identity, raw per-source records, and the unified
//! record every source is normalized into.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which kind of remote source a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// The primary, singular model catalog, queried by region.
    Catalog,

    /// One of potentially many named model registries.
    Registry,
}

/// Identity of one configured source, attached to every record as provenance.
///
/// Immutable and supplied by configuration. The identifier is the registry
/// name for `Registry` sources and empty for the singular `Catalog`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceDescriptor {
    pub kind: SourceKind,
    pub identifier: String,
}

impl SourceDescriptor {
    /// The singular catalog source.
    pub fn catalog() -> Self {
        Self {
            kind: SourceKind::Catalog,
            identifier: String::new(),
        }
    }

    /// A named registry source.
    pub fn registry(name: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Registry,
            identifier: name.into(),
        }
    }

    /// Human-readable provenance label, as rendered in the report.
    pub fn label(&self) -> String {
        match self.kind {
            SourceKind::Catalog => "AI Foundry Catalog".to_string(),
            SourceKind::Registry => format!("Azure ML Registry ({})", self.identifier),
        }
    }
}

impl std::fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// A raw, source-specific record as returned by one adapter.
///
/// Just a JSON object; the field vocabulary varies per source kind and is
/// only interpreted by the normalizer's static mapping tables. Never exposed
/// past normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawModelRecord(Map<String, Value>);

impl RawModelRecord {
    /// Wrap a JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Wrap a JSON value, if it is an object. Non-object page entries are
    /// skipped by adapters rather than crashing the stream.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Look up a value by dotted path, e.g. `"model.systemData.createdAt"`.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.0.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// Look up a value and render it as text, if it is a non-empty scalar.
    ///
    /// Numbers and booleans stringify (registry versions come back as bare
    /// numbers); empty strings count as absent.
    pub fn lookup_text(&self, path: &str) -> Option<String> {
        match self.lookup(path)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// The unified record shape every source is normalized into.
///
/// All fields except `source` and `name` are optional: absent upstream data
/// yields the field's empty sentinel, never a crash. `name` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedModelRecord {
    /// Provenance: which configured source produced this record.
    pub source: SourceDescriptor,

    /// Model name; `"unknown"` when the source omitted it.
    pub name: String,

    /// Model version; empty when the source omitted it.
    pub version: String,

    pub description: Option<String>,
    pub format: Option<String>,
    pub kind: Option<String>,
    pub sku: Option<String>,
    pub lifecycle_status: Option<String>,
    pub max_capacity: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<String>,
}
