//! Schema normalization: raw source records → [`UnifiedModelRecord`].
//!
//! Total and pure: any field absent (or unparseable) in the raw record maps
//! to that field's empty sentinel, never an error. The catalog and the
//! registries use different raw key vocabularies, so each source kind has its
//! own static mapping table; there is no runtime schema discovery.

use chrono::{DateTime, Utc};

use crate::types::record::{RawModelRecord, SourceDescriptor, SourceKind, UnifiedModelRecord};

/// Sentinel for a missing model name, keeping the non-empty invariant.
const UNKNOWN_NAME: &str = "unknown";

/// Dotted source paths for every unified field, for one source kind.
///
/// `None` means "always unknown for this source kind" - an explicit
/// declaration, so the table stays exhaustive when fields are added.
struct FieldMapping {
    name: &'static str,
    version: &'static str,
    description: Option<&'static str>,
    format: Option<&'static str>,
    kind: Option<&'static str>,
    sku: Option<&'static str>,
    lifecycle_status: Option<&'static str>,
    max_capacity: Option<&'static str>,
    created_at: Option<&'static str>,
    created_by: Option<&'static str>,
    modified_at: Option<&'static str>,
    modified_by: Option<&'static str>,
}

/// Catalog listing items nest the model payload under `model`, with the
/// deployment attributes (`kind`, `skuName`) and `description` on the outer
/// object.
const CATALOG_MAPPING: FieldMapping = FieldMapping {
    name: "model.name",
    version: "model.version",
    description: Some("description"),
    format: Some("model.format"),
    kind: Some("kind"),
    sku: Some("skuName"),
    lifecycle_status: Some("model.lifecycleStatus"),
    max_capacity: Some("model.maxCapacity"),
    created_at: Some("model.systemData.createdAt"),
    created_by: Some("model.systemData.createdBy"),
    modified_at: Some("model.systemData.lastModifiedAt"),
    modified_by: Some("model.systemData.lastModifiedBy"),
};

/// Registry listing items are flat. Registries expose no deployment kind,
/// SKU, or capacity.
const REGISTRY_MAPPING: FieldMapping = FieldMapping {
    name: "name",
    version: "version",
    description: Some("description"),
    format: Some("modelType"),
    kind: None,
    sku: None,
    lifecycle_status: Some("stage"),
    max_capacity: None,
    created_at: Some("creationContext.createdAt"),
    created_by: Some("creationContext.createdBy"),
    modified_at: Some("creationContext.lastModifiedAt"),
    modified_by: Some("creationContext.lastModifiedBy"),
};

fn mapping_for(kind: SourceKind) -> &'static FieldMapping {
    match kind {
        SourceKind::Catalog => &CATALOG_MAPPING,
        SourceKind::Registry => &REGISTRY_MAPPING,
    }
}

/// Normalize one raw record into the unified shape, tagging it with its
/// source.
pub fn normalize(raw: &RawModelRecord, source: &SourceDescriptor) -> UnifiedModelRecord {
    let mapping = mapping_for(source.kind);

    let mut description = text_field(raw, mapping.description);
    if source.kind == SourceKind::Registry {
        description = fold_tags_into_description(raw, description);
    }

    UnifiedModelRecord {
        source: source.clone(),
        name: raw
            .lookup_text(mapping.name)
            .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        version: raw.lookup_text(mapping.version).unwrap_or_default(),
        description,
        format: text_field(raw, mapping.format),
        kind: text_field(raw, mapping.kind),
        sku: text_field(raw, mapping.sku),
        lifecycle_status: text_field(raw, mapping.lifecycle_status),
        max_capacity: number_field(raw, mapping.max_capacity),
        created_at: timestamp_field(raw, mapping.created_at),
        created_by: text_field(raw, mapping.created_by),
        modified_at: timestamp_field(raw, mapping.modified_at),
        modified_by: text_field(raw, mapping.modified_by),
    }
}

fn text_field(raw: &RawModelRecord, path: Option<&str>) -> Option<String> {
    raw.lookup_text(path?)
}

fn number_field(raw: &RawModelRecord, path: Option<&str>) -> Option<i64> {
    match raw.lookup(path?)? {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn timestamp_field(raw: &RawModelRecord, path: Option<&str>) -> Option<DateTime<Utc>> {
    let text = raw.lookup_text(path?)?;
    DateTime::parse_from_rfc3339(&text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Registries carry curation metadata as tags; fold them into the description
/// so they survive into the report.
fn fold_tags_into_description(
    raw: &RawModelRecord,
    description: Option<String>,
) -> Option<String> {
    let tags = raw.lookup("tags")?.as_object()?;
    if tags.is_empty() {
        return description;
    }

    let rendered = tags
        .iter()
        .map(|(key, value)| match value.as_str() {
            Some(s) => format!("{}={}", key, s),
            None => format!("{}={}", key, value),
        })
        .collect::<Vec<_>>()
        .join(", ");

    match description {
        Some(desc) => Some(format!("{} | Tags: {}", desc, rendered)),
        None => Some(format!("Tags: {}", rendered)),
    }
}
