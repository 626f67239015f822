//! Grouping and mean computation with stable ordering
//!
//! Equipment and parameter ordering is first-seen across the reading
//! sequence, so repeated aggregation of unchanged data renders identically
//! for callers. An equipment lacking a detected parameter reports 0.0 for
//! it rather than dropping the column.

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use super::classifier::classify_equipment;
use crate::app::models::{AggregationResult, EquipmentStats, Reading, TypeCount};
use crate::constants::{AVERAGE_DECIMALS, UNKNOWN_TYPE_LABEL};

/// Pluggable classification rule: `(equipment_name, declared_type)` to a
/// category label, or `None` for the "Unknown" bucket
pub type ClassifyFn = fn(&str, &str) -> Option<String>;

/// Per-equipment accumulator for one aggregation pass
#[derive(Debug, Default)]
struct EquipmentAccumulator {
    declared_type: String,
    readings: u64,
    sums: IndexMap<String, (f64, u64)>,
}

/// Aggregation engine with a swappable classification rule
#[derive(Debug, Clone)]
pub struct Aggregator {
    classify: ClassifyFn,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self {
            classify: classify_equipment,
        }
    }
}

impl Aggregator {
    /// Create an engine using the default classification rule
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a custom classification rule
    pub fn with_classifier(classify: ClassifyFn) -> Self {
        Self { classify }
    }

    /// Compute statistics over one upload's readings.
    ///
    /// An empty reading set yields the well-defined empty result rather
    /// than failing.
    pub fn aggregate(&self, readings: &[Reading]) -> AggregationResult {
        if readings.is_empty() {
            return AggregationResult::empty();
        }

        let mut parameters: IndexSet<String> = IndexSet::new();
        let mut equipment: IndexMap<String, EquipmentAccumulator> = IndexMap::new();
        let mut overall: IndexMap<String, (f64, u64)> = IndexMap::new();

        for reading in readings {
            parameters.insert(reading.parameter_name.clone());

            let accumulator = equipment
                .entry(reading.equipment_name.clone())
                .or_default();
            accumulator.readings += 1;
            if accumulator.declared_type.is_empty() {
                let declared = reading.equipment_type.trim();
                if !declared.is_empty() {
                    accumulator.declared_type = declared.to_string();
                }
            }
            let (sum, count) = accumulator
                .sums
                .entry(reading.parameter_name.clone())
                .or_insert((0.0, 0));
            *sum += reading.value;
            *count += 1;

            let (total, samples) = overall
                .entry(reading.parameter_name.clone())
                .or_insert((0.0, 0));
            *total += reading.value;
            *samples += 1;
        }

        let numeric_columns: Vec<String> = parameters.iter().cloned().collect();

        let equipment_list: Vec<EquipmentStats> = equipment
            .iter()
            .map(|(name, accumulator)| {
                let avg: IndexMap<String, f64> = numeric_columns
                    .iter()
                    .map(|parameter| {
                        let mean = accumulator
                            .sums
                            .get(parameter)
                            .map(|(sum, count)| round_mean(*sum, *count))
                            .unwrap_or(0.0);
                        (parameter.clone(), mean)
                    })
                    .collect();

                let equipment_type = (self.classify)(name, &accumulator.declared_type)
                    .unwrap_or_else(|| UNKNOWN_TYPE_LABEL.to_string());

                EquipmentStats {
                    name: name.clone(),
                    equipment_type,
                    count: accumulator.readings,
                    avg,
                }
            })
            .collect();

        let parameter_averages: IndexMap<String, f64> = numeric_columns
            .iter()
            .map(|parameter| {
                let mean = overall
                    .get(parameter)
                    .map(|(sum, count)| round_mean(*sum, *count))
                    .unwrap_or(0.0);
                (parameter.clone(), mean)
            })
            .collect();

        let mut distribution: IndexMap<String, u64> = IndexMap::new();
        for entry in &equipment_list {
            *distribution.entry(entry.equipment_type.clone()).or_insert(0) += 1;
        }
        let mut type_distribution: Vec<TypeCount> = distribution
            .into_iter()
            .map(|(equipment_type, count)| TypeCount {
                equipment_type,
                count,
            })
            .collect();
        // stable sort keeps first-seen order among equal counts
        type_distribution.sort_by(|a, b| b.count.cmp(&a.count));

        debug!(
            "Aggregated {} readings into {} equipment entries across {} parameters",
            readings.len(),
            equipment_list.len(),
            numeric_columns.len()
        );

        AggregationResult {
            total_records: readings.len() as u64,
            numeric_columns,
            equipment_list,
            parameter_averages,
            type_distribution,
        }
    }
}

/// Arithmetic mean rounded to two decimal places
fn round_mean(sum: f64, count: u64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let mean = sum / count as f64;
    let factor = 10f64.powi(AVERAGE_DECIMALS as i32);
    (mean * factor).round() / factor
}
