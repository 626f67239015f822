//! Chemstats Library
//!
//! A Rust library implementing the ingestion, aggregation and retention
//! pipeline behind a chemical-equipment parameter dashboard.
//!
//! This library provides tools for:
//! - Parsing uploaded CSV files of equipment parameter readings with
//!   header validation and per-row defect handling
//! - Computing per-equipment parameter averages and equipment-type
//!   distributions with stable, first-seen ordering
//! - Persisting uploads and their readings atomically in SQLite while
//!   capping each owner to the five most recent uploads
//! - Answering ownership-scoped statistics and history queries
//! - Assembling renderer-ready report models from computed statistics

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod aggregator;
        pub mod csv_parser;
        pub mod report;
        pub mod stats_query;
        pub mod upload_store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{AggregationResult, Reading, Requester, Upload, UploadSummary};
pub use config::Config;

/// Result type alias for the chemstats pipeline
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the ingestion, aggregation and retention pipeline
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV decoding error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Upload rejected: the header lacks required columns
    #[error("Missing required columns: {}. Expected at minimum: equipment_name, parameter_name, value", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// Upload rejected: the file contains no data at all
    #[error("The uploaded CSV file is empty")]
    EmptyCsv { file: String },

    /// Upload rejected: every data row was defective
    #[error("CSV file '{file}' contains no valid data rows")]
    NoValidRows { file: String },

    /// Upload rejected before parsing (size cap, extension, ...)
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Referenced upload does not exist or the requester may not see it.
    /// Deliberately indistinguishable so existence of other users' data
    /// never leaks through the error surface.
    #[error("Upload not found or not accessible")]
    UploadAccess,

    /// Deletion target does not exist (ownership irrelevant)
    #[error("Upload not found: id = {upload_id}")]
    UploadNotFound { upload_id: i64 },

    /// Persistence-layer failure; the enclosing transaction is rolled back
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    /// Date/time parsing error
    #[error("Date/time parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// JSON encoding error at the output boundary
    #[error("JSON encoding error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a missing-columns error from the set of absent header names
    pub fn missing_columns(columns: Vec<String>) -> Self {
        Self::MissingColumns { columns }
    }

    /// Create an empty-file error
    pub fn empty_csv(file: impl Into<String>) -> Self {
        Self::EmptyCsv { file: file.into() }
    }

    /// Create a no-valid-rows error
    pub fn no_valid_rows(file: impl Into<String>) -> Self {
        Self::NoValidRows { file: file.into() }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an upload-not-found error for deletion paths
    pub fn upload_not_found(upload_id: i64) -> Self {
        Self::UploadNotFound { upload_id }
    }

    /// Create a database error with context
    pub fn database(message: impl Into<String>, source: Option<rusqlite::Error>) -> Self {
        Self::Database {
            message: message.into(),
            source,
        }
    }

    /// Create a date/time parsing error
    pub fn datetime_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True when the error is a rejection of the uploaded file itself
    /// (as opposed to an access or persistence failure)
    pub fn is_upload_rejection(&self) -> bool {
        matches!(
            self,
            Self::MissingColumns { .. }
                | Self::EmptyCsv { .. }
                | Self::NoValidRows { .. }
                | Self::Validation { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        Self::Database {
            message: "SQLite operation failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "Date/time parsing failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON encoding failed".to_string(),
            source: error,
        }
    }
}
