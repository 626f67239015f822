//! Parsing statistics and result structures
//!
//! Row-level defects are never escalated to upload-level failures; they are
//! counted here and reflected only in a lower `rows_imported`.

use crate::app::models::RawReading;

/// Parsing result with normalized readings and basic statistics
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// Successfully normalized readings, in file order
    pub readings: Vec<RawReading>,

    /// Basic parsing statistics
    pub stats: ParseStats,
}

/// Simple parsing statistics
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Total number of data rows encountered (excluding the header)
    pub total_records: usize,

    /// Number of rows successfully normalized into readings
    pub rows_imported: usize,

    /// Number of rows skipped due to defects
    pub rows_skipped: usize,

    /// Per-row defect descriptions for debugging
    pub errors: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            total_records: 0,
            rows_imported: 0,
            rows_skipped: 0,
            errors: Vec::new(),
        }
    }

    /// Record a skipped row together with its 1-based file line number
    pub fn record_defect(&mut self, line: usize, reason: &str) {
        self.rows_skipped += 1;
        self.errors.push(format!("line {}: {}", line, reason));
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            (self.rows_imported as f64 / self.total_records as f64) * 100.0
        }
    }
}

impl Default for ParseStats {
    fn default() -> Self {
        Self::new()
    }
}
