//! Test helpers shared across the aggregator test modules

use crate::app::models::Reading;

// Test modules
mod classifier_tests;
mod engine_tests;

/// Build an in-memory reading without a declared type
pub fn reading(equipment: &str, parameter: &str, value: f64) -> Reading {
    typed_reading(equipment, "", parameter, value)
}

/// Build an in-memory reading with a declared type
pub fn typed_reading(equipment: &str, declared_type: &str, parameter: &str, value: f64) -> Reading {
    Reading {
        id: 0,
        upload_id: 1,
        equipment_name: equipment.to_string(),
        equipment_type: declared_type.to_string(),
        parameter_name: parameter.to_string(),
        value,
        unit: String::new(),
    }
}
