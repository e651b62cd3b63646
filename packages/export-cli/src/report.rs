//! Report sink: renders an aggregation result as a single styled XLSX sheet.
//!
//! Pure consumer of normalized rows - the core never sees file or format
//! concerns. Layout: styled header row, frozen panes, per-column width capped
//! at 50 characters, `N/A` for absent fields.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook};

use aggregation::{AggregationResult, UnifiedModelRecord};

const SHEET_NAME: &str = "AI Foundry Models";
const NOT_AVAILABLE: &str = "N/A";
const MAX_COLUMN_WIDTH: f64 = 50.0;
const HEADER_COLOR: u32 = 0x36_60_92;

const HEADERS: [&str; 13] = [
    "Source",
    "Name",
    "Version",
    "Description",
    "Format",
    "Kind",
    "SKU",
    "Lifecycle Status",
    "Max Capacity",
    "Created Date",
    "Created By",
    "Last Modified Date",
    "Last Modified By",
];

/// Write the report to `path`.
///
/// An empty result still produces a valid workbook with the header row, so a
/// successful-but-empty run is distinguishable from a missing report.
pub fn write_report(path: &Path, result: &AggregationResult) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_COLOR))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap();

    let cell_format = Format::new().set_align(FormatAlign::Top).set_text_wrap();

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.len()).collect();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (row, record) in result.records.iter().enumerate() {
        for (col, value) in row_cells(record).iter().enumerate() {
            worksheet.write_string_with_format(
                (row + 1) as u32,
                col as u16,
                value.as_str(),
                &cell_format,
            )?;
            if value.len() > widths[col] {
                widths[col] = value.len();
            }
        }
    }

    for (col, width) in widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, ((width + 2) as f64).min(MAX_COLUMN_WIDTH))?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    workbook
        .save(path)
        .with_context(|| format!("Failed to save workbook to {}", path.display()))?;

    Ok(())
}

/// Render one record as the 13 report columns, in header order.
fn row_cells(record: &UnifiedModelRecord) -> [String; 13] {
    [
        record.source.label(),
        record.name.clone(),
        present(&record.version),
        optional(&record.description),
        optional(&record.format),
        optional(&record.kind),
        optional(&record.sku),
        optional(&record.lifecycle_status),
        record
            .max_capacity
            .map(|n| n.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        timestamp(&record.created_at),
        optional(&record.created_by),
        timestamp(&record.modified_at),
        optional(&record.modified_by),
    ]
}

fn present(value: &str) -> String {
    if value.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value.to_string()
    }
}

fn optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn timestamp(value: &Option<DateTime<Utc>>) -> String {
    match value {
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aggregation::SourceDescriptor;
    use chrono::TimeZone;

    fn sample_record() -> UnifiedModelRecord {
        UnifiedModelRecord {
            source: SourceDescriptor::registry("azureml-meta"),
            name: "Llama-3-8B".to_string(),
            version: "2".to_string(),
            description: None,
            format: Some("custom_model".to_string()),
            kind: None,
            sku: None,
            lifecycle_status: Some("Production".to_string()),
            max_capacity: None,
            created_at: Some(Utc.with_ymd_and_hms(2024, 4, 18, 12, 0, 0).unwrap()),
            created_by: Some("Meta".to_string()),
            modified_at: None,
            modified_by: None,
        }
    }

    #[test]
    fn absent_fields_render_as_na() {
        let cells = row_cells(&sample_record());

        assert_eq!(cells[0], "Azure ML Registry (azureml-meta)");
        assert_eq!(cells[1], "Llama-3-8B");
        assert_eq!(cells[3], "N/A"); // description
        assert_eq!(cells[6], "N/A"); // sku
        assert_eq!(cells[8], "N/A"); // max capacity
        assert_eq!(cells[9], "2024-04-18 12:00:00");
        assert_eq!(cells[11], "N/A"); // modified date
    }

    #[test]
    fn empty_version_renders_as_na() {
        let mut record = sample_record();
        record.version = String::new();
        assert_eq!(row_cells(&record)[2], "N/A");
    }

    #[test]
    fn writes_a_workbook_for_a_populated_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models.xlsx");

        let result = AggregationResult {
            records: vec![sample_record()],
            source_errors: vec![],
        };

        write_report(&path, &result).unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn writes_a_header_only_workbook_for_an_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");

        write_report(&path, &AggregationResult::default()).unwrap();
        assert!(path.exists());
    }
}
