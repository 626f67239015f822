//! Tests for the equipment-type classification rule

use crate::app::services::aggregator::classify_equipment;

#[test]
fn test_declared_type_wins() {
    assert_eq!(
        classify_equipment("anything", "Reactor").as_deref(),
        Some("Reactor")
    );
    // declared type is taken verbatim, not re-mapped
    assert_eq!(
        classify_equipment("Feed Pump", "Custom Skid").as_deref(),
        Some("Custom Skid")
    );
}

#[test]
fn test_declared_type_is_trimmed() {
    assert_eq!(
        classify_equipment("X", "  Pump  ").as_deref(),
        Some("Pump")
    );
}

#[test]
fn test_naming_heuristic_matches_common_equipment() {
    let cases = [
        ("Reactor A", "Reactor"),
        ("Feed pump 2", "Pump"),
        ("Main COMPRESSOR", "Compressor"),
        ("Heat Exchanger 3", "Heat Exchanger"),
        ("Shell condenser", "Heat Exchanger"),
        ("Relief valve V-101", "Valve"),
        ("Storage tank T-4", "Tank"),
        ("Distillation column C-2", "Column"),
        ("Static mixer M-1", "Mixer"),
        ("Bag filter F-7", "Separator"),
        ("Steam boiler B-1", "Heater"),
    ];
    for (name, expected) in cases {
        assert_eq!(
            classify_equipment(name, "").as_deref(),
            Some(expected),
            "misclassified '{}'",
            name
        );
    }
}

#[test]
fn test_unclassifiable_names_return_none() {
    assert_eq!(classify_equipment("X-9", ""), None);
    assert_eq!(classify_equipment("Unit 42", ""), None);
    assert_eq!(classify_equipment("", ""), None);
}
