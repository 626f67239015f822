//! Header validation and column index resolution
//!
//! The upload contract requires the exact column names `equipment_name`,
//! `parameter_name` and `value` (case-sensitive); `unit` and `type` are
//! optional. A header missing any required column fails the whole upload
//! with an error naming every absent column.

use csv::StringRecord;
use tracing::debug;

use crate::constants::{
    COLUMN_EQUIPMENT_NAME, COLUMN_PARAMETER_NAME, COLUMN_TYPE, COLUMN_UNIT, COLUMN_VALUE,
    REQUIRED_COLUMNS,
};
use crate::{Error, Result};

/// Resolved positions of the contract columns within an upload's header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub equipment_name: usize,
    pub parameter_name: usize,
    pub value: usize,
    pub unit: Option<usize>,
    pub equipment_type: Option<usize>,
}

impl ColumnLayout {
    /// Analyze a header row, failing with the full list of missing
    /// required columns when the contract is not met
    pub fn analyze(headers: &StringRecord) -> Result<Self> {
        let position = |name: &str| headers.iter().position(|header| header.trim() == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| position(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::missing_columns(missing));
        }

        let layout = Self {
            equipment_name: position(COLUMN_EQUIPMENT_NAME).unwrap_or_default(),
            parameter_name: position(COLUMN_PARAMETER_NAME).unwrap_or_default(),
            value: position(COLUMN_VALUE).unwrap_or_default(),
            unit: position(COLUMN_UNIT),
            equipment_type: position(COLUMN_TYPE),
        };
        debug!("Resolved column layout: {:?}", layout);

        Ok(layout)
    }
}
