//! Parsing orchestration and whole-upload failure policy
//!
//! Whole-upload failures: empty payload, unreadable header, missing required
//! columns, or zero surviving rows. Everything else is a row-level defect
//! that is skipped and counted.

use csv::{ReaderBuilder, Trim};
use tracing::{debug, info, warn};

use super::column_layout::ColumnLayout;
use super::record_parser::parse_reading_record;
use super::stats::{ParseOutcome, ParseStats};
use crate::{Error, Result};

/// Parse uploaded CSV bytes into normalized readings.
///
/// `file_name` is used only for error context and logging. Every reading in
/// the returned outcome has non-empty trimmed `equipment_name` and
/// `parameter_name` and a finite numeric `value`.
pub fn parse(bytes: &[u8], file_name: &str) -> Result<ParseOutcome> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::empty_csv(file_name));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| Error::csv_parsing(file_name, "failed to read CSV header", Some(e)))?
        .clone();
    let layout = ColumnLayout::analyze(&headers)?;

    let mut stats = ParseStats::new();
    let mut readings = Vec::new();

    for (index, result) in reader.records().enumerate() {
        stats.total_records += 1;
        // header occupies line 1
        let line = index + 2;

        match result {
            Ok(record) => match parse_reading_record(&record, &layout) {
                Ok(reading) => {
                    readings.push(reading);
                    stats.rows_imported += 1;
                }
                Err(defect) => {
                    debug!("Skipping row at line {}: {}", line, defect);
                    stats.record_defect(line, &defect);
                }
            },
            Err(err) => {
                debug!("Skipping unreadable record at line {}: {}", line, err);
                stats.record_defect(line, &format!("unreadable record: {}", err));
            }
        }
    }

    if readings.is_empty() {
        return Err(Error::no_valid_rows(file_name));
    }

    if stats.rows_skipped > 0 {
        warn!(
            "Parsed '{}' with {} defective rows out of {}",
            file_name, stats.rows_skipped, stats.total_records
        );
    }
    info!(
        "Parsed {} readings from {} records in '{}'",
        stats.rows_imported, stats.total_records, file_name
    );

    Ok(ParseOutcome { readings, stats })
}
