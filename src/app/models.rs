//! Data models for the chemstats pipeline
//!
//! This module contains the core data structures for uploads, normalized
//! parameter readings, requester identities, and the derived aggregation
//! shapes consumed by the report assembler and the CLI boundary.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// =============================================================================
// Requester Identity
// =============================================================================

/// The already-authenticated identity behind a pipeline call.
///
/// Authentication itself is an external collaborator; every store and query
/// operation receives a resolved owner id plus an admin-override capability
/// flag and checks access exactly once at its boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    /// Owning identity the call is made on behalf of
    pub user_id: String,

    /// Admin override: may read and delete any owner's uploads
    pub admin: bool,
}

impl Requester {
    /// A plain user acting on their own data
    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            admin: false,
        }
    }

    /// An identity carrying the admin override capability
    pub fn admin(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            admin: true,
        }
    }

    /// Whether this requester may access data owned by `owner_id`
    pub fn can_access(&self, owner_id: &str) -> bool {
        self.admin || self.user_id == owner_id
    }
}

// =============================================================================
// Readings
// =============================================================================

/// One normalized data point produced by the parser, not yet persisted.
///
/// Guarantees held by construction: `equipment_name` and `parameter_name`
/// are non-empty after trimming and `value` is a finite real number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawReading {
    pub equipment_name: String,

    /// Declared equipment type from an optional `type` column; empty when absent
    pub equipment_type: String,

    pub parameter_name: String,

    pub value: f64,

    /// Measurement unit from the optional `unit` column; empty when absent
    pub unit: String,
}

/// One persisted reading, always owned by exactly one upload.
///
/// Readings are never created without a parent upload and are removed only
/// when their upload is deleted (explicitly or by retention trimming).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub id: i64,
    pub upload_id: i64,
    pub equipment_name: String,
    pub equipment_type: String,
    pub parameter_name: String,
    pub value: f64,
    pub unit: String,
}

impl Reading {
    /// Detach the persisted identifiers, leaving the normalized payload
    pub fn into_raw(self) -> RawReading {
        RawReading {
            equipment_name: self.equipment_name,
            equipment_type: self.equipment_type,
            parameter_name: self.parameter_name,
            value: self.value,
            unit: self.unit,
        }
    }
}

// =============================================================================
// Uploads
// =============================================================================

/// One ingestion event and its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upload {
    pub id: i64,
    pub owner_id: String,
    pub file_name: String,
    pub rows_imported: u64,
    pub uploaded_at: DateTime<Utc>,
}

impl Upload {
    /// Owner-visible summary, the shape returned by history queries
    pub fn summary(&self) -> UploadSummary {
        UploadSummary {
            id: self.id,
            file_name: self.file_name.clone(),
            rows_imported: self.rows_imported,
            uploaded_at: self.uploaded_at,
        }
    }
}

/// History entry for one upload (newest first, at most five per owner)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadSummary {
    pub id: i64,
    pub file_name: String,
    pub rows_imported: u64,
    pub uploaded_at: DateTime<Utc>,
}

/// Result of a successful atomic commit, the ingestion boundary output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitOutcome {
    pub upload_id: i64,
    pub rows_imported: u64,
    pub equipment_count: usize,
    pub numeric_columns: Vec<String>,
}

// =============================================================================
// Aggregation Shapes (derived, never persisted)
// =============================================================================

/// Per-equipment statistics entry.
///
/// `avg` maps every parameter detected anywhere in the upload to the mean of
/// this equipment's values for it, with 0.0 standing in where the equipment
/// has no readings for a parameter. Keys keep first-seen order so repeated
/// queries against unchanged data render identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentStats {
    pub name: String,

    /// Classified equipment type; the "Unknown" bucket when unclassifiable
    #[serde(rename = "type")]
    pub equipment_type: String,

    /// Number of readings recorded for this equipment
    pub count: u64,

    pub avg: IndexMap<String, f64>,
}

/// One `(type, count)` entry of the categorical distribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub count: u64,
}

/// Computed statistics over the readings of one upload.
///
/// Recomputed on demand from readings; never stored. Equipment and parameter
/// ordering is first-seen and therefore stable across repeated calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    /// Total number of readings aggregated
    pub total_records: u64,

    /// Distinct parameter names detected across the upload, first-seen order
    pub numeric_columns: Vec<String>,

    /// Per-equipment entries, first-seen order
    pub equipment_list: Vec<EquipmentStats>,

    /// Overall mean per parameter across every reading of the upload
    pub parameter_averages: IndexMap<String, f64>,

    /// Equipment counts per classified type, descending count order,
    /// with an explicit "Unknown" bucket for unclassifiable equipment
    pub type_distribution: Vec<TypeCount>,
}

impl AggregationResult {
    /// The well-defined result of aggregating no readings at all
    pub fn empty() -> Self {
        Self {
            total_records: 0,
            numeric_columns: Vec::new(),
            equipment_list: Vec::new(),
            parameter_averages: IndexMap::new(),
            type_distribution: Vec::new(),
        }
    }

    /// Number of distinct equipment entries
    pub fn equipment_count(&self) -> usize {
        self.equipment_list.len()
    }
}
