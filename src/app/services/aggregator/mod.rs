//! Aggregation engine for per-upload equipment statistics
//!
//! Groups readings by equipment and derives, for every parameter detected
//! anywhere in the upload, the arithmetic mean of that parameter's values
//! per equipment, plus overall parameter averages and an equipment-type
//! distribution. Results are recomputed on demand and never persisted.
//!
//! ## Architecture
//!
//! - [`engine`] - Grouping and mean computation with stable ordering
//! - [`classifier`] - Equipment-type classification with an "Unknown" fallback
//!
//! ## Usage
//!
//! ```rust
//! use chemstats::app::services::aggregator::Aggregator;
//!
//! let aggregator = Aggregator::new();
//! let result = aggregator.aggregate(&[]);
//! assert_eq!(result.total_records, 0);
//! ```

pub mod classifier;
pub mod engine;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use classifier::classify_equipment;
pub use engine::{Aggregator, ClassifyFn};
