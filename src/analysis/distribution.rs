use std::collections::BTreeMap;

use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Categorical type distribution
// ---------------------------------------------------------------------------

/// Record count per distinct value of the categorical type column.
pub type TypeDistribution = BTreeMap<String, usize>;

/// Count records per type value.  When no type column was detected every
/// record lands in a single `Equipment` bucket, so the counts always sum to
/// the dataset size.
pub fn type_distribution(dataset: &Dataset, type_column: Option<&str>) -> TypeDistribution {
    let mut counts = TypeDistribution::new();
    match type_column {
        Some(column) => {
            for rec in &dataset.records {
                *counts.entry(rec.text(column)).or_insert(0) += 1;
            }
        }
        None => {
            if !dataset.is_empty() {
                counts.insert("Equipment".to_string(), dataset.len());
            }
        }
    }
    counts
}

/// Percentage share of one type, rounded to one decimal place for display.
/// The total record count is the authoritative denominator; 0 when it is 0.
pub fn share_percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = 100.0 * count as f64 / total as f64;
    (pct * 10.0).round() / 10.0
}

/// `(type, count, share %)` rows in stable (alphabetical) order.
pub fn distribution_shares(
    distribution: &TypeDistribution,
    total: usize,
) -> Vec<(String, usize, f64)> {
    distribution
        .iter()
        .map(|(ty, &count)| (ty.clone(), count, share_percent(count, total)))
        .collect()
}
