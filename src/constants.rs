//! Application constants for the chemstats pipeline
//!
//! This module contains the CSV contract (required/optional column names),
//! retention and size limits, and the keyword table used to classify
//! equipment into types when no dedicated type column is present.

// =============================================================================
// CSV Column Contract
// =============================================================================

/// Column holding the equipment identifier (required, non-empty after trim)
pub const COLUMN_EQUIPMENT_NAME: &str = "equipment_name";

/// Column holding the parameter identifier (required, non-empty after trim)
pub const COLUMN_PARAMETER_NAME: &str = "parameter_name";

/// Column holding the numeric reading (required, finite real number)
pub const COLUMN_VALUE: &str = "value";

/// Optional column holding the measurement unit (defaults to empty)
pub const COLUMN_UNIT: &str = "unit";

/// Optional column holding a declared equipment type (defaults to empty)
pub const COLUMN_TYPE: &str = "type";

/// Columns that must be present in every uploaded CSV header, exact names
pub const REQUIRED_COLUMNS: &[&str] = &[COLUMN_EQUIPMENT_NAME, COLUMN_PARAMETER_NAME, COLUMN_VALUE];

// =============================================================================
// Retention and Size Limits
// =============================================================================

/// Maximum uploads retained per owner; older uploads are trimmed on commit
pub const DEFAULT_MAX_RETAINED_UPLOADS: usize = 5;

/// Maximum accepted upload size in bytes (10 MB)
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Decimal places kept when reporting parameter averages
pub const AVERAGE_DECIMALS: u32 = 2;

// =============================================================================
// Equipment Type Classification
// =============================================================================

/// Bucket for equipment that no classification rule matches
pub const UNKNOWN_TYPE_LABEL: &str = "Unknown";

/// Naming-heuristic fallback used when a row carries no declared type.
/// Patterns are tried in order; the first match wins.
pub const TYPE_KEYWORD_PATTERNS: &[(&str, &str)] = &[
    (r"(?i)\breactor", "Reactor"),
    (r"(?i)\bpump", "Pump"),
    (r"(?i)\bcompressor", "Compressor"),
    (r"(?i)(heat[ _-]?exchanger|\bexchanger|\bcondenser|\bcooler)", "Heat Exchanger"),
    (r"(?i)(\bboiler|\bfurnace|\bheater)", "Heater"),
    (r"(?i)\bvalve", "Valve"),
    (r"(?i)(\btank|\bvessel|\bdrum)", "Tank"),
    (r"(?i)(\bcolumn|\btower|\bdistill)", "Column"),
    (r"(?i)(\bmixer|\bagitator|\bblender)", "Mixer"),
    (r"(?i)(\bfilter|\bseparator|\bcentrifuge)", "Separator"),
];
