//! Tests for grouping, mean computation and ordering stability

use super::{reading, typed_reading};
use crate::app::services::aggregator::Aggregator;

#[test]
fn test_aggregate_empty_input_yields_empty_result() {
    let result = Aggregator::new().aggregate(&[]);

    assert_eq!(result.total_records, 0);
    assert!(result.numeric_columns.is_empty());
    assert!(result.equipment_list.is_empty());
    assert!(result.parameter_averages.is_empty());
    assert!(result.type_distribution.is_empty());
}

#[test]
fn test_aggregate_reference_scenario() {
    // Scenario from the upload contract: two equipment, two parameters,
    // Pump B lacking a Pressure reading
    let readings = vec![
        reading("Reactor A", "Temperature", 350.5),
        reading("Reactor A", "Pressure", 12.0),
        reading("Pump B", "Temperature", 80.0),
    ];
    let result = Aggregator::new().aggregate(&readings);

    assert_eq!(result.total_records, 3);
    assert_eq!(result.numeric_columns, vec!["Temperature", "Pressure"]);
    assert_eq!(result.equipment_count(), 2);

    let reactor = &result.equipment_list[0];
    assert_eq!(reactor.name, "Reactor A");
    assert_eq!(reactor.count, 2);
    assert_eq!(reactor.avg["Temperature"], 350.5);
    assert_eq!(reactor.avg["Pressure"], 12.0);

    // every detected parameter appears for every equipment, absent as 0.0
    let pump = &result.equipment_list[1];
    assert_eq!(pump.name, "Pump B");
    assert_eq!(pump.avg["Temperature"], 80.0);
    assert_eq!(pump.avg["Pressure"], 0.0);
}

#[test]
fn test_aggregate_means_are_rounded_to_two_decimals() {
    let readings = vec![
        reading("Reactor A", "Temperature", 1.0),
        reading("Reactor A", "Temperature", 2.0),
        reading("Reactor A", "Temperature", 2.005),
    ];
    let result = Aggregator::new().aggregate(&readings);

    assert_eq!(result.equipment_list[0].avg["Temperature"], 1.67);
    assert_eq!(result.parameter_averages["Temperature"], 1.67);
}

#[test]
fn test_aggregate_overall_parameter_averages() {
    let readings = vec![
        reading("Reactor A", "Temperature", 300.0),
        reading("Pump B", "Temperature", 100.0),
        reading("Pump B", "Pressure", 5.0),
    ];
    let result = Aggregator::new().aggregate(&readings);

    assert_eq!(result.parameter_averages["Temperature"], 200.0);
    assert_eq!(result.parameter_averages["Pressure"], 5.0);
}

#[test]
fn test_aggregate_first_seen_ordering() {
    let readings = vec![
        reading("Zeta Pump", "Pressure", 1.0),
        reading("Alpha Reactor", "Temperature", 2.0),
        reading("Zeta Pump", "Flowrate", 3.0),
    ];
    let result = Aggregator::new().aggregate(&readings);

    let names: Vec<&str> = result
        .equipment_list
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec!["Zeta Pump", "Alpha Reactor"]);
    assert_eq!(
        result.numeric_columns,
        vec!["Pressure", "Temperature", "Flowrate"]
    );
}

#[test]
fn test_aggregate_is_commutative_up_to_ordering() {
    let readings = vec![
        reading("Reactor A", "Temperature", 350.5),
        reading("Reactor A", "Pressure", 12.0),
        reading("Pump B", "Temperature", 80.0),
        reading("Pump B", "Flowrate", 3.25),
        reading("Reactor A", "Temperature", 349.5),
    ];
    let mut reversed = readings.clone();
    reversed.reverse();

    let forward = Aggregator::new().aggregate(&readings);
    let backward = Aggregator::new().aggregate(&reversed);

    assert_eq!(forward.total_records, backward.total_records);
    for entry in &forward.equipment_list {
        let twin = backward
            .equipment_list
            .iter()
            .find(|e| e.name == entry.name)
            .expect("equipment present in both results");
        assert_eq!(twin.count, entry.count);
        for (parameter, mean) in &entry.avg {
            assert!((twin.avg[parameter] - mean).abs() < 1e-9);
        }
    }
    for (parameter, mean) in &forward.parameter_averages {
        assert!((backward.parameter_averages[parameter] - mean).abs() < 1e-9);
    }
}

#[test]
fn test_aggregate_type_distribution_counts_equipment() {
    let readings = vec![
        typed_reading("R-1", "Reactor", "Temperature", 1.0),
        typed_reading("R-1", "Reactor", "Pressure", 2.0),
        typed_reading("R-2", "Reactor", "Temperature", 3.0),
        typed_reading("P-1", "Pump", "Flowrate", 4.0),
        typed_reading("X-9", "", "Temperature", 5.0),
    ];
    let result = Aggregator::new().aggregate(&readings);

    // distribution counts distinct equipment, not readings, descending
    assert_eq!(result.type_distribution.len(), 3);
    assert_eq!(result.type_distribution[0].equipment_type, "Reactor");
    assert_eq!(result.type_distribution[0].count, 2);
    assert_eq!(result.type_distribution[1].equipment_type, "Pump");
    assert_eq!(result.type_distribution[1].count, 1);
    assert_eq!(result.type_distribution[2].equipment_type, "Unknown");
    assert_eq!(result.type_distribution[2].count, 1);

    let total: u64 = result.type_distribution.iter().map(|t| t.count).sum();
    assert_eq!(total, result.equipment_count() as u64);
}

#[test]
fn test_aggregate_declared_type_beats_naming_heuristic() {
    // name says pump, declared type says compressor
    let readings = vec![typed_reading("Feed Pump 1", "Compressor", "Flowrate", 1.0)];
    let result = Aggregator::new().aggregate(&readings);

    assert_eq!(result.equipment_list[0].equipment_type, "Compressor");
}

#[test]
fn test_aggregate_with_custom_classifier() {
    fn everything_is_a_widget(_name: &str, _declared: &str) -> Option<String> {
        Some("Widget".to_string())
    }

    let readings = vec![
        reading("Reactor A", "Temperature", 1.0),
        reading("Pump B", "Pressure", 2.0),
    ];
    let result = Aggregator::with_classifier(everything_is_a_widget).aggregate(&readings);

    assert_eq!(result.type_distribution.len(), 1);
    assert_eq!(result.type_distribution[0].equipment_type, "Widget");
    assert_eq!(result.type_distribution[0].count, 2);
}
