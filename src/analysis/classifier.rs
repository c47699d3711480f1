use std::collections::BTreeSet;

use crate::data::model::{Dataset, FieldValue};

// ---------------------------------------------------------------------------
// Column classification predicates
// ---------------------------------------------------------------------------

/// Identifier columns are excluded from analysis regardless of value type:
/// the literal `id` plus foreign-key style `*_id` columns.
pub fn is_identifier(column: &str) -> bool {
    let lower = column.to_ascii_lowercase();
    lower == "id" || lower.ends_with("_id")
}

/// Columns whose name signals a categorical role.  Substring match, so
/// `equipment_name` and `equipment_type` are caught as well.
pub fn is_categorical(column: &str) -> bool {
    let lower = column.to_ascii_lowercase();
    lower.contains("name") || lower.contains("type")
}

/// Explicit schema override for the name-based heuristic, so a numeric
/// column like `pressure_rating_type_code` can be rescued (or a misdetected
/// one suppressed) without changing the predicates.
#[derive(Debug, Clone, Default)]
pub struct ColumnOverrides {
    /// Always treated as numeric analysis targets.
    pub include: BTreeSet<String>,
    /// Never treated as numeric analysis targets.
    pub exclude: BTreeSet<String>,
}

// ---------------------------------------------------------------------------
// Numeric column discovery
// ---------------------------------------------------------------------------

/// Field names of the first record (assumed schema-representative) whose
/// value is numeric and whose name does not mark it as identifier or
/// categorical.  An empty dataset yields an empty list, not an error.
pub fn numeric_columns(dataset: &Dataset) -> Vec<String> {
    numeric_columns_with(dataset, &ColumnOverrides::default())
}

/// Like [`numeric_columns`], honouring explicit include/exclude overrides.
pub fn numeric_columns_with(dataset: &Dataset, overrides: &ColumnOverrides) -> Vec<String> {
    let Some(first) = dataset.records.first() else {
        return Vec::new();
    };

    first
        .fields
        .iter()
        .filter_map(|(column, value)| {
            if overrides.exclude.contains(column) {
                return None;
            }
            if overrides.include.contains(column) {
                return Some(column.clone());
            }
            if is_identifier(column) || is_categorical(column) {
                return None;
            }
            match value.as_f64() {
                Some(v) if !v.is_nan() => Some(column.clone()),
                _ => None,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Column role detection (name / type columns)
// ---------------------------------------------------------------------------

/// Which column identifies a record and which one categorises it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRoles {
    pub name_column: String,
    pub type_column: Option<String>,
}

const NAME_HINTS: &[&str] = &["name", "equipment", "item", "machine", "device", "unit"];
const TYPE_HINTS: &[&str] = &["type", "category", "class", "kind", "classification"];

/// Detect the name and type columns by header hints, falling back to the
/// first column for the name and to the first low-cardinality string column
/// for the type.  `None` when the dataset has no columns at all.
pub fn detect_roles(dataset: &Dataset) -> Option<ColumnRoles> {
    let columns = &dataset.column_names;
    let first = columns.first()?;

    let name_column = columns
        .iter()
        .find(|col| contains_hint(col, NAME_HINTS))
        .unwrap_or(first)
        .clone();

    let type_column = columns
        .iter()
        .filter(|col| **col != name_column)
        .find(|col| contains_hint(col, TYPE_HINTS))
        .cloned()
        .or_else(|| {
            // Fallback: a string column with fewer distinct values than half
            // the record count is likely a category.
            columns
                .iter()
                .filter(|col| **col != name_column)
                .find(|col| {
                    is_string_column(dataset, col)
                        && dataset
                            .unique_values
                            .get(*col)
                            .is_some_and(|vals| vals.len() * 2 < dataset.len())
                })
                .cloned()
        });

    Some(ColumnRoles {
        name_column,
        type_column,
    })
}

fn contains_hint(column: &str, hints: &[&str]) -> bool {
    let lower = column.to_ascii_lowercase();
    hints.iter().any(|hint| lower.contains(hint))
}

fn is_string_column(dataset: &Dataset, column: &str) -> bool {
    dataset
        .records
        .first()
        .and_then(|rec| rec.get(column))
        .is_some_and(|val| matches!(val, FieldValue::String(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::EquipmentRecord;

    fn dataset(rows: Vec<Vec<(&str, FieldValue)>>) -> Dataset {
        let records = rows
            .into_iter()
            .map(|pairs| {
                EquipmentRecord::new(
                    pairs
                        .into_iter()
                        .map(|(k, v)| (k.to_string(), v))
                        .collect(),
                )
            })
            .collect();
        Dataset::from_records(None, "test", records).unwrap()
    }

    fn sample() -> Dataset {
        dataset(vec![vec![
            ("id", FieldValue::Integer(1)),
            ("dataset_id", FieldValue::Integer(9)),
            ("equipment_name", FieldValue::String("P-101".into())),
            ("equipment_type", FieldValue::String("Pump".into())),
            ("flowrate", FieldValue::Float(120.5)),
            ("pressure", FieldValue::Float(4.2)),
            ("notes", FieldValue::String("ok".into())),
        ]])
    }

    #[test]
    fn discovers_numeric_columns_only() {
        assert_eq!(numeric_columns(&sample()), vec!["flowrate", "pressure"]);
    }

    #[test]
    fn excludes_identifiers_even_when_numeric() {
        let cols = numeric_columns(&sample());
        assert!(!cols.contains(&"id".to_string()));
        assert!(!cols.contains(&"dataset_id".to_string()));
    }

    #[test]
    fn excludes_name_and_type_by_substring() {
        // Numeric-coercible values do not rescue a categorical header.
        let ds = dataset(vec![vec![
            ("equipment_type", FieldValue::Integer(3)),
            ("flowrate", FieldValue::Float(1.0)),
        ]]);
        assert_eq!(numeric_columns(&ds), vec!["flowrate"]);
    }

    #[test]
    fn empty_dataset_yields_empty_set() {
        let ds = Dataset::from_records(None, "empty", Vec::new()).unwrap();
        assert!(numeric_columns(&ds).is_empty());
    }

    #[test]
    fn overrides_rescue_and_suppress() {
        let overrides = ColumnOverrides {
            include: ["pressure_rating_type_code".to_string()].into(),
            exclude: ["pressure".to_string()].into(),
        };
        let ds = dataset(vec![vec![
            ("pressure_rating_type_code", FieldValue::Integer(16)),
            ("pressure", FieldValue::Float(4.2)),
            ("flowrate", FieldValue::Float(120.5)),
        ]]);
        assert_eq!(
            numeric_columns_with(&ds, &overrides),
            vec!["flowrate", "pressure_rating_type_code"]
        );
    }

    #[test]
    fn detects_roles_from_header_hints() {
        let roles = detect_roles(&sample()).unwrap();
        // "equipment_name" wins over "dataset_id" by the name hint; column
        // order is alphabetical so "equipment_name" is the first hit.
        assert_eq!(roles.name_column, "equipment_name");
        assert_eq!(roles.type_column.as_deref(), Some("equipment_type"));
    }

    #[test]
    fn type_falls_back_to_low_cardinality_string_column() {
        let rows: Vec<Vec<(&str, FieldValue)>> = (0..6)
            .map(|i| {
                vec![
                    ("label", FieldValue::String(format!("E-{i}"))),
                    (
                        "group",
                        FieldValue::String(if i % 2 == 0 { "A" } else { "B" }.into()),
                    ),
                    ("flowrate", FieldValue::Float(i as f64)),
                ]
            })
            .collect();
        let roles = detect_roles(&dataset(rows)).unwrap();
        assert_eq!(roles.type_column.as_deref(), Some("group"));
    }

    #[test]
    fn no_columns_means_no_roles() {
        let ds = Dataset::from_records(None, "empty", Vec::new()).unwrap();
        assert_eq!(detect_roles(&ds), None);
    }
}
