//! Test helpers shared across the upload store test modules

use tempfile::TempDir;

use crate::app::models::RawReading;
use crate::app::services::upload_store::Database;
use crate::config::StoreConfig;


/// Open a store backed by a throwaway database file.
///
/// The returned [`TempDir`] must be kept alive for the duration of the test.
pub fn open_test_store(max_retained_uploads: usize) -> (Database, TempDir) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let config = StoreConfig {
        database_path: dir.path().join("chemstats-test.db"),
        max_retained_uploads,
    };
    let db = Database::open(&config).expect("failed to open test store");
    (db, dir)
}

/// A small batch of readings spanning two equipment
pub fn sample_readings() -> Vec<RawReading> {
    vec![
        raw("Reactor A", "Temperature", 350.5, "°C"),
        raw("Reactor A", "Pressure", 12.0, ""),
        raw("Pump B", "Temperature", 80.0, "°C"),
    ]
}

pub fn raw(equipment: &str, parameter: &str, value: f64, unit: &str) -> RawReading {
    RawReading {
        equipment_name: equipment.to_string(),
        equipment_type: String::new(),
        parameter_name: parameter.to_string(),
        value,
        unit: unit.to_string(),
    }
}
