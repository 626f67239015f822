//! CSV parser for uploaded equipment parameter readings
//!
//! This module turns raw CSV bytes into normalized [`RawReading`]s, rejecting
//! structurally invalid uploads early and skipping individually defective
//! rows. It is a pure function over its input: no I/O, no persistence.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`parser`] - Parsing orchestration and whole-upload failure policy
//! - [`column_layout`] - Header validation and column index resolution
//! - [`record_parser`] - Individual CSV record normalization
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use chemstats::app::services::csv_parser;
//!
//! # fn example() -> chemstats::Result<()> {
//! let csv = b"equipment_name,parameter_name,value,unit\n\
//!             Reactor A,Temperature,350.5,\xc2\xb0C\n";
//! let outcome = csv_parser::parse(csv, "readings.csv")?;
//!
//! println!(
//!     "Imported {} of {} rows",
//!     outcome.stats.rows_imported, outcome.stats.total_records
//! );
//! # Ok(())
//! # }
//! ```
//!
//! [`RawReading`]: crate::app::models::RawReading

pub mod column_layout;
pub mod parser;
pub mod record_parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_layout::ColumnLayout;
pub use parser::parse;
pub use stats::{ParseOutcome, ParseStats};
