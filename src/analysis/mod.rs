/// Analysis pipeline: classify columns, describe them, aggregate types.
///
/// ```text
///   Dataset ──► classifier ──► describe (stats + health) ──► Vec<ParameterMetric>
///      │
///      └─────► distribution ──► TypeDistribution
/// ```
///
/// Everything here is a pure function of an immutable [`Dataset`] snapshot;
/// the whole profile is recomputed from scratch on every dataset change.
pub mod classifier;
pub mod describe;
pub mod distribution;
pub mod summary;

use crate::data::model::Dataset;
use classifier::{ColumnOverrides, ColumnRoles};
use describe::ParameterMetric;
use distribution::TypeDistribution;

// ---------------------------------------------------------------------------
// DatasetProfile – everything the renderers consume
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetProfile {
    /// Numeric analysis targets, in discovery order.
    pub numeric_columns: Vec<String>,
    /// One metric per numeric column that had at least one valid value,
    /// in the same order as `numeric_columns`.
    pub metrics: Vec<ParameterMetric>,
    /// Detected name/type columns; `None` for a column-less dataset.
    pub roles: Option<ColumnRoles>,
    /// Record count per categorical type value.
    pub distribution: TypeDistribution,
}

/// Run the full pipeline with the default column heuristics.
pub fn profile_dataset(dataset: &Dataset) -> DatasetProfile {
    profile_dataset_with(dataset, &ColumnOverrides::default())
}

/// Run the full pipeline, honouring explicit classifier overrides.
pub fn profile_dataset_with(dataset: &Dataset, overrides: &ColumnOverrides) -> DatasetProfile {
    let numeric_columns = classifier::numeric_columns_with(dataset, overrides);

    let metrics: Vec<ParameterMetric> = numeric_columns
        .iter()
        .filter_map(|col| describe::describe_column(dataset, col))
        .collect();

    let roles = classifier::detect_roles(dataset);
    let type_column = roles.as_ref().and_then(|r| r.type_column.as_deref());
    let distribution = distribution::type_distribution(dataset, type_column);

    log::debug!(
        "profiled {} records: {} numeric columns, {} types",
        dataset.len(),
        numeric_columns.len(),
        distribution.len()
    );

    DatasetProfile {
        numeric_columns,
        metrics,
        roles,
        distribution,
    }
}
