use std::fmt;

use serde::Serialize;

use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Numeric conventions
// ---------------------------------------------------------------------------
// These constants pin the exact conventions of the reference analysis:
// population variance (divisor = n), linear interpolation of order
// statistics for quantiles, and Tukey fences at 1.5 × IQR.

/// Fence multiplier for IQR-based outlier detection.
pub const FENCE_MULTIPLIER: f64 = 1.5;

/// Relative-spread cutoffs for the efficiency label, in ascending order.
pub const SPREAD_EXCELLENT: f64 = 0.5;
pub const SPREAD_GOOD: f64 = 1.0;
pub const SPREAD_FAIR: f64 = 2.0;

/// Largest outlier count still labelled `moderate`.
pub const MODERATE_OUTLIER_MAX: usize = 2;

// ---------------------------------------------------------------------------
// Health labels
// ---------------------------------------------------------------------------

/// Overall range relative to scale: `(max − min) / |mean|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Efficiency {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl fmt::Display for Efficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Efficiency::Excellent => "Excellent",
            Efficiency::Good => "Good",
            Efficiency::Fair => "Fair",
            Efficiency::Poor => "Poor",
        };
        write!(f, "{label}")
    }
}

/// Dispersion signal from the outlier count, independent of [`Efficiency`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stability {
    Stable,
    Moderate,
    Unstable,
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stability::Stable => "stable",
            Stability::Moderate => "moderate",
            Stability::Unstable => "unstable",
        };
        write!(f, "{label}")
    }
}

/// Efficiency label from the extrema and mean of a column.
/// Relative spread is defined as 0 when the mean is 0.
pub fn efficiency_label(min: f64, max: f64, average: f64) -> Efficiency {
    let spread = if average == 0.0 {
        0.0
    } else {
        (max - min) / average.abs()
    };
    if spread < SPREAD_EXCELLENT {
        Efficiency::Excellent
    } else if spread < SPREAD_GOOD {
        Efficiency::Good
    } else if spread < SPREAD_FAIR {
        Efficiency::Fair
    } else {
        Efficiency::Poor
    }
}

/// Stability label from the number of fence outliers.
pub fn stability_label(outliers: usize) -> Stability {
    match outliers {
        0 => Stability::Stable,
        n if n <= MODERATE_OUTLIER_MAX => Stability::Moderate,
        _ => Stability::Unstable,
    }
}

// ---------------------------------------------------------------------------
// ParameterMetric – the full statistical profile of one numeric column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterMetric {
    pub parameter: String,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub std: f64,
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub outliers: usize,
    pub data_points: usize,
    pub efficiency: Efficiency,
    pub status: Stability,
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// Non-null, non-NaN values of `column` coerced to `f64`, in record order.
pub fn column_values(dataset: &Dataset, column: &str) -> Vec<f64> {
    dataset
        .records
        .iter()
        .filter_map(|rec| rec.numeric(column))
        .collect()
}

/// Quantile by linear interpolation of order statistics.
///
/// `sorted` must be ascending and `p` in `[0, 100]`.  The fractional rank is
/// `p/100 × (n−1)`; an integral rank returns that element, otherwise the
/// floor and ceiling elements are blended by the fractional part.  Returns
/// 0.0 for an empty slice.
pub fn quantile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let frac = rank - lower as f64;
        sorted[lower] * (1.0 - frac) + sorted[upper] * frac
    }
}

/// Number of values strictly outside the Tukey fences
/// `[q1 − 1.5·IQR, q3 + 1.5·IQR]`.
pub fn outlier_count(values: &[f64], q1: f64, q3: f64) -> usize {
    let iqr = q3 - q1;
    let lower_bound = q1 - FENCE_MULTIPLIER * iqr;
    let upper_bound = q3 + FENCE_MULTIPLIER * iqr;
    values
        .iter()
        .filter(|&&v| v < lower_bound || v > upper_bound)
        .count()
}

/// Full statistical profile of one numeric column.
///
/// A column with no valid values is a defined no-op: `None`, never an error,
/// and the column is simply absent from the metric list.
pub fn describe_column(dataset: &Dataset, column: &str) -> Option<ParameterMetric> {
    let mut values = column_values(dataset, column);
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    let count = values.len();
    let sum: f64 = values.iter().sum();
    let average = sum / count as f64;
    let min = values[0];
    let max = values[count - 1];

    // Population variance: divisor = n, not n − 1.
    let variance = values.iter().map(|v| (v - average).powi(2)).sum::<f64>() / count as f64;
    let std = variance.sqrt();

    let q1 = quantile(&values, 25.0);
    let median = quantile(&values, 50.0);
    let q3 = quantile(&values, 75.0);
    let iqr = q3 - q1;

    let outliers = outlier_count(&values, q1, q3);

    Some(ParameterMetric {
        parameter: column.to_string(),
        average,
        min,
        max,
        std,
        median,
        q1,
        q3,
        iqr,
        outliers,
        data_points: count,
        efficiency: efficiency_label(min, max, average),
        status: stability_label(outliers),
    })
}
