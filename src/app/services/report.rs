//! Report data assembler
//!
//! Pure transformation from computed statistics into the structure the
//! external document renderer consumes: a header block, the per-equipment
//! parameter table, and the type-distribution table. No I/O, no
//! persistence; rendering itself (pagination, charts) happens elsewhere.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::app::models::{AggregationResult, Upload};

/// Title line carried in every report header
pub const REPORT_TITLE: &str = "Chemical Equipment Parameter Report";

/// Header block of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportHeader {
    pub title: String,
    pub owner_id: String,
    pub file_name: String,
    pub rows_imported: u64,
    pub uploaded_at: DateTime<Utc>,
    pub generated_at: DateTime<Utc>,
    pub total_records: u64,
    /// Detected parameter names, first-seen order
    pub detected_parameters: Vec<String>,
}

/// One row of the per-equipment parameter table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRow {
    pub equipment: String,
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub readings: u64,
    /// One column per detected parameter, 0.0 where the equipment has none
    pub averages: IndexMap<String, f64>,
}

/// One row of the type-distribution table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionRow {
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub count: u64,
    /// Share of classified equipment, percent rounded to one decimal
    pub share_percent: f64,
}

/// Renderer-ready report model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportModel {
    pub header: ReportHeader,
    pub parameter_table: Vec<ParameterRow>,
    pub type_distribution: Vec<DistributionRow>,
}

/// Shape one upload's aggregation into a renderer-ready report model
pub fn assemble(aggregation: &AggregationResult, upload: &Upload) -> ReportModel {
    let header = ReportHeader {
        title: REPORT_TITLE.to_string(),
        owner_id: upload.owner_id.clone(),
        file_name: upload.file_name.clone(),
        rows_imported: upload.rows_imported,
        uploaded_at: upload.uploaded_at,
        generated_at: Utc::now(),
        total_records: aggregation.total_records,
        detected_parameters: aggregation.numeric_columns.clone(),
    };

    let parameter_table = aggregation
        .equipment_list
        .iter()
        .map(|entry| ParameterRow {
            equipment: entry.name.clone(),
            equipment_type: entry.equipment_type.clone(),
            readings: entry.count,
            averages: entry.avg.clone(),
        })
        .collect();

    let classified_total: u64 = aggregation.type_distribution.iter().map(|t| t.count).sum();
    let type_distribution = aggregation
        .type_distribution
        .iter()
        .map(|entry| DistributionRow {
            equipment_type: entry.equipment_type.clone(),
            count: entry.count,
            share_percent: share_percent(entry.count, classified_total),
        })
        .collect();

    ReportModel {
        header,
        parameter_table,
        type_distribution,
    }
}

fn share_percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let share = (count as f64 / total as f64) * 100.0;
    (share * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{EquipmentStats, TypeCount};
    use indexmap::IndexMap;

    fn sample_upload() -> Upload {
        Upload {
            id: 7,
            owner_id: "alice".to_string(),
            file_name: "readings.csv".to_string(),
            rows_imported: 3,
            uploaded_at: Utc::now(),
        }
    }

    fn sample_aggregation() -> AggregationResult {
        let mut reactor_avg = IndexMap::new();
        reactor_avg.insert("Temperature".to_string(), 350.5);
        reactor_avg.insert("Pressure".to_string(), 12.0);
        let mut pump_avg = IndexMap::new();
        pump_avg.insert("Temperature".to_string(), 80.0);
        pump_avg.insert("Pressure".to_string(), 0.0);

        let mut parameter_averages = IndexMap::new();
        parameter_averages.insert("Temperature".to_string(), 215.25);
        parameter_averages.insert("Pressure".to_string(), 12.0);

        AggregationResult {
            total_records: 3,
            numeric_columns: vec!["Temperature".to_string(), "Pressure".to_string()],
            equipment_list: vec![
                EquipmentStats {
                    name: "Reactor A".to_string(),
                    equipment_type: "Reactor".to_string(),
                    count: 2,
                    avg: reactor_avg,
                },
                EquipmentStats {
                    name: "Pump B".to_string(),
                    equipment_type: "Pump".to_string(),
                    count: 1,
                    avg: pump_avg,
                },
            ],
            parameter_averages,
            type_distribution: vec![
                TypeCount {
                    equipment_type: "Reactor".to_string(),
                    count: 1,
                },
                TypeCount {
                    equipment_type: "Pump".to_string(),
                    count: 1,
                },
            ],
        }
    }

    #[test]
    fn test_assemble_header_block() {
        let upload = sample_upload();
        let model = assemble(&sample_aggregation(), &upload);

        assert_eq!(model.header.title, REPORT_TITLE);
        assert_eq!(model.header.owner_id, "alice");
        assert_eq!(model.header.file_name, "readings.csv");
        assert_eq!(model.header.rows_imported, 3);
        assert_eq!(model.header.total_records, 3);
        assert_eq!(
            model.header.detected_parameters,
            vec!["Temperature", "Pressure"]
        );
    }

    #[test]
    fn test_assemble_parameter_table_keeps_order_and_columns() {
        let model = assemble(&sample_aggregation(), &sample_upload());

        assert_eq!(model.parameter_table.len(), 2);
        let reactor = &model.parameter_table[0];
        assert_eq!(reactor.equipment, "Reactor A");
        assert_eq!(reactor.averages["Temperature"], 350.5);
        let pump = &model.parameter_table[1];
        // absent parameter still present as 0.0
        assert_eq!(pump.averages["Pressure"], 0.0);
    }

    #[test]
    fn test_assemble_distribution_shares_sum_to_hundred() {
        let model = assemble(&sample_aggregation(), &sample_upload());

        assert_eq!(model.type_distribution.len(), 2);
        assert_eq!(model.type_distribution[0].share_percent, 50.0);
        let total: f64 = model
            .type_distribution
            .iter()
            .map(|r| r.share_percent)
            .sum();
        assert!((total - 100.0).abs() < 0.2);
    }

    #[test]
    fn test_assemble_empty_aggregation() {
        let model = assemble(&AggregationResult::empty(), &sample_upload());

        assert_eq!(model.header.total_records, 0);
        assert!(model.parameter_table.is_empty());
        assert!(model.type_distribution.is_empty());
    }

    #[test]
    fn test_report_model_serializes_with_renamed_type_fields() {
        let model = assemble(&sample_aggregation(), &sample_upload());
        let json = serde_json::to_value(&model).unwrap();

        assert_eq!(json["parameter_table"][0]["type"], "Reactor");
        assert_eq!(json["type_distribution"][0]["type"], "Reactor");
    }
}
