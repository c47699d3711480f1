use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// FieldValue – a single cell of an equipment record
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as produced by the upload parser.
/// Used in `BTreeMap` / `BTreeSet` downstream so `FieldValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put FieldValue in BTreeSet --

impl Eq for FieldValue {}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use FieldValue::*;
        fn discriminant(v: &FieldValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Null => write!(f, "<null>"),
        }
    }
}

impl FieldValue {
    /// Try to interpret the value as an `f64` for statistical analysis.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// EquipmentRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single equipment record: flat mapping column name → cell value.
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentRecord {
    pub fields: BTreeMap<String, FieldValue>,
}

impl EquipmentRecord {
    pub fn new(fields: BTreeMap<String, FieldValue>) -> Self {
        EquipmentRecord { fields }
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column)
    }

    /// The cell coerced to a finite number; `None` for null, NaN, and
    /// non-numeric values (those are filtered out of every statistic).
    pub fn numeric(&self, column: &str) -> Option<f64> {
        self.fields
            .get(column)
            .and_then(FieldValue::as_f64)
            .filter(|v| !v.is_nan())
    }

    /// The cell rendered as display text (`<null>` when missing).
    pub fn text(&self, column: &str) -> String {
        self.fields
            .get(column)
            .map(ToString::to_string)
            .unwrap_or_else(|| FieldValue::Null.to_string())
    }
}

// ---------------------------------------------------------------------------
// InvalidInput – boundary validation error
// ---------------------------------------------------------------------------

/// Rejected before any statistics run: every downstream formula assumes a
/// rectangular, field-consistent record set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("expected an array of equipment records")]
    NotAnArray,
    #[error("record {index} is not a flat object")]
    NotAnObject { index: usize },
    #[error("record {index} does not match the field schema of the first record")]
    InconsistentRecord { index: usize },
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed column indices.
/// Immutable once built; all derived statistics are pure functions of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Identifier assigned by the upload service, if any.
    pub id: Option<i64>,
    /// Human-readable dataset name (file stem when absent upstream).
    pub name: String,
    /// All equipment records, in upload order.
    pub records: Vec<EquipmentRecord>,
    /// Ordered list of column names shared by every record.
    pub column_names: Vec<String>,
    /// For each column the sorted set of unique values.
    pub unique_values: BTreeMap<String, BTreeSet<FieldValue>>,
}

impl Dataset {
    /// Build column indices from validated records.
    ///
    /// Fails with [`InvalidInput::InconsistentRecord`] when a record's field
    /// set differs from the first record's.
    pub fn from_records(
        id: Option<i64>,
        name: impl Into<String>,
        records: Vec<EquipmentRecord>,
    ) -> Result<Self, InvalidInput> {
        let column_names: Vec<String> = records
            .first()
            .map(|r| r.fields.keys().cloned().collect())
            .unwrap_or_default();

        let mut unique_values: BTreeMap<String, BTreeSet<FieldValue>> = BTreeMap::new();
        for (index, rec) in records.iter().enumerate() {
            if rec.fields.len() != column_names.len()
                || !rec.fields.keys().zip(&column_names).all(|(a, b)| a == b)
            {
                return Err(InvalidInput::InconsistentRecord { index });
            }
            for (col, val) in &rec.fields {
                unique_values
                    .entry(col.clone())
                    .or_default()
                    .insert(val.clone());
            }
        }

        Ok(Dataset {
            id,
            name: name.into(),
            records,
            column_names,
            unique_values,
        })
    }

    /// Number of equipment records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, FieldValue)]) -> EquipmentRecord {
        EquipmentRecord::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn from_records_indexes_columns() {
        let ds = Dataset::from_records(
            Some(1),
            "plant",
            vec![
                record(&[
                    ("name", FieldValue::String("P-1".into())),
                    ("flowrate", FieldValue::Float(10.0)),
                ]),
                record(&[
                    ("name", FieldValue::String("P-2".into())),
                    ("flowrate", FieldValue::Float(12.5)),
                ]),
            ],
        )
        .unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.column_names, vec!["flowrate", "name"]);
        assert_eq!(ds.unique_values["flowrate"].len(), 2);
    }

    #[test]
    fn from_records_rejects_ragged_schema() {
        let err = Dataset::from_records(
            None,
            "plant",
            vec![
                record(&[("name", FieldValue::String("P-1".into()))]),
                record(&[("flowrate", FieldValue::Float(1.0))]),
            ],
        )
        .unwrap_err();
        assert_eq!(err, InvalidInput::InconsistentRecord { index: 1 });
    }

    #[test]
    fn numeric_filters_non_numbers() {
        let rec = record(&[
            ("flowrate", FieldValue::Float(3.5)),
            ("pressure", FieldValue::Float(f64::NAN)),
            ("type", FieldValue::String("Pump".into())),
            ("spare", FieldValue::Null),
        ]);
        assert_eq!(rec.numeric("flowrate"), Some(3.5));
        assert_eq!(rec.numeric("pressure"), None);
        assert_eq!(rec.numeric("type"), None);
        assert_eq!(rec.numeric("spare"), None);
        assert_eq!(rec.numeric("absent"), None);
    }
}
