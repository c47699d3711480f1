use std::collections::BTreeMap;

use serde::Serialize;

use super::distribution::TypeDistribution;
use super::DatasetProfile;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// DatasetSummary – the pre-aggregated descriptor served to consumers
// ---------------------------------------------------------------------------

/// Spread descriptor of one numeric column.
///
/// `cv` is the coefficient of variation, `std / mean × 100`, 0 when the
/// mean is 0.  `std`, `var`, and `cv` are rounded to two decimals, matching
/// the summary endpoint of the upload service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSummary {
    pub min: f64,
    pub max: f64,
    pub std: f64,
    pub var: f64,
    pub cv: f64,
}

/// The summary descriptor consumers receive alongside the metric list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub total_equipment: usize,
    pub averages: BTreeMap<String, f64>,
    pub ranges: BTreeMap<String, RangeSummary>,
    pub type_distribution: TypeDistribution,
    pub type_percentages: BTreeMap<String, f64>,
}

/// Reshape an already-computed profile into the summary descriptor.
/// No statistics are recomputed here; `var` is recovered as `std²`.
pub fn summarize(dataset: &Dataset, profile: &DatasetProfile) -> DatasetSummary {
    let total = dataset.len();

    let mut averages = BTreeMap::new();
    let mut ranges = BTreeMap::new();
    for metric in &profile.metrics {
        averages.insert(metric.parameter.clone(), metric.average);
        let var = metric.std * metric.std;
        let cv = if metric.average == 0.0 {
            0.0
        } else {
            metric.std / metric.average * 100.0
        };
        ranges.insert(
            metric.parameter.clone(),
            RangeSummary {
                min: metric.min,
                max: metric.max,
                std: round2(metric.std),
                var: round2(var),
                cv: round2(cv),
            },
        );
    }

    let type_percentages = profile
        .distribution
        .iter()
        .map(|(ty, &count)| {
            let pct = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            };
            (ty.clone(), round2(pct))
        })
        .collect();

    DatasetSummary {
        total_equipment: total,
        averages,
        ranges,
        type_distribution: profile.distribution.clone(),
        type_percentages,
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::profile_dataset;
    use crate::data::model::{EquipmentRecord, FieldValue};

    fn dataset() -> Dataset {
        let rows = [("A", 2.0), ("A", 4.0), ("B", 6.0), ("B", 8.0)];
        let records = rows
            .iter()
            .map(|(ty, flow)| {
                EquipmentRecord::new(
                    [
                        (
                            "equipment_name".to_string(),
                            FieldValue::String(format!("E-{flow}")),
                        ),
                        (
                            "equipment_type".to_string(),
                            FieldValue::String(ty.to_string()),
                        ),
                        ("flowrate".to_string(), FieldValue::Float(*flow)),
                    ]
                    .into(),
                )
            })
            .collect();
        Dataset::from_records(None, "cv", records).unwrap()
    }

    #[test]
    fn cv_is_std_over_mean_times_hundred() {
        let ds = dataset();
        let profile = profile_dataset(&ds);
        let summary = summarize(&ds, &profile);

        // mean = 5, population std = sqrt(5) ≈ 2.2360679…
        let range = &summary.ranges["flowrate"];
        assert_eq!(range.std, 2.24);
        assert_eq!(range.var, 5.0);
        assert_eq!(range.cv, 44.72);
        assert_eq!(summary.averages["flowrate"], 5.0);
    }

    #[test]
    fn zero_mean_guards_cv() {
        let records = vec![
            EquipmentRecord::new(
                [
                    ("label".to_string(), FieldValue::String("a".into())),
                    ("delta".to_string(), FieldValue::Float(-1.0)),
                ]
                .into(),
            ),
            EquipmentRecord::new(
                [
                    ("label".to_string(), FieldValue::String("b".into())),
                    ("delta".to_string(), FieldValue::Float(1.0)),
                ]
                .into(),
            ),
        ];
        let ds = Dataset::from_records(None, "zero", records).unwrap();
        let profile = profile_dataset(&ds);
        let summary = summarize(&ds, &profile);
        assert_eq!(summary.ranges["delta"].cv, 0.0);
    }

    #[test]
    fn percentages_mirror_distribution() {
        let ds = dataset();
        let summary = summarize(&ds, &profile_dataset(&ds));
        assert_eq!(summary.total_equipment, 4);
        assert_eq!(summary.type_percentages["A"], 50.0);
        assert_eq!(summary.type_percentages["B"], 50.0);
        assert_eq!(
            summary.type_distribution.values().sum::<usize>(),
            summary.total_equipment
        );
    }
}
