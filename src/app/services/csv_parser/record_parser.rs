//! Individual CSV record normalization
//!
//! A row is defective when a required field is empty after trimming or its
//! value does not parse as a finite real number. Defects are reported back
//! to the orchestrator as plain descriptions; the parser decides what to do
//! with them (skip and count, per the upload contract).

use csv::StringRecord;

use super::column_layout::ColumnLayout;
use crate::app::models::RawReading;
use crate::constants::{COLUMN_EQUIPMENT_NAME, COLUMN_PARAMETER_NAME, COLUMN_VALUE};

/// Outcome of normalizing a single row: a reading, or a defect description
pub type RowResult = std::result::Result<RawReading, String>;

/// Normalize a single CSV record against the resolved column layout
pub fn parse_reading_record(record: &StringRecord, layout: &ColumnLayout) -> RowResult {
    let equipment_name = required_field(record, layout.equipment_name, COLUMN_EQUIPMENT_NAME)?;
    let parameter_name = required_field(record, layout.parameter_name, COLUMN_PARAMETER_NAME)?;
    let raw_value = required_field(record, layout.value, COLUMN_VALUE)?;

    let value: f64 = raw_value
        .parse()
        .map_err(|_| format!("value '{}' is not a number", raw_value))?;
    if !value.is_finite() {
        return Err(format!("value '{}' is not a finite number", raw_value));
    }

    Ok(RawReading {
        equipment_name,
        equipment_type: optional_field(record, layout.equipment_type),
        parameter_name,
        value,
        unit: optional_field(record, layout.unit),
    })
}

/// Extract a required field, trimmed; empty or absent fields are defects
fn required_field(record: &StringRecord, index: usize, name: &str) -> Result<String, String> {
    let field = record
        .get(index)
        .map(str::trim)
        .unwrap_or_default();
    if field.is_empty() {
        return Err(format!("missing required field '{}'", name));
    }
    Ok(field.to_string())
}

/// Extract an optional field, trimmed; absent columns default to empty
fn optional_field(record: &StringRecord, index: Option<usize>) -> String {
    index
        .and_then(|i| record.get(i))
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}
