use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value as JsonValue;

use super::model::{Dataset, EquipmentRecord, FieldValue, InvalidInput};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an equipment dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – upload-service descriptor `{ "id", "name", "equipment": [...] }`
///   or a bare top-level array of records
/// * `.csv`  – header row of column names, one equipment record per row
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset");

    match ext.as_str() {
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            dataset_from_json(stem, &text)
        }
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV file")?;
            dataset_from_csv(stem, file)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// JSON descriptor
// ---------------------------------------------------------------------------

/// Parse the upload-service dataset descriptor:
///
/// ```json
/// {
///   "id": 7,
///   "name": "plant_survey",
///   "equipment": [
///     { "equipment_name": "P-101", "equipment_type": "Pump", "flowrate": 120.5 },
///     ...
///   ]
/// }
/// ```
///
/// A bare top-level array is accepted as well; `name_hint` then names the
/// dataset.  Anything that is not an array of flat objects is rejected with
/// [`InvalidInput`] before reaching the statistics pipeline.
pub fn dataset_from_json(name_hint: &str, text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let (id, name, equipment) = match &root {
        JsonValue::Object(obj) => {
            let id = obj.get("id").and_then(JsonValue::as_i64);
            let name = obj
                .get("name")
                .and_then(JsonValue::as_str)
                .unwrap_or(name_hint)
                .to_string();
            let equipment = obj.get("equipment").ok_or(InvalidInput::NotAnArray)?;
            (id, name, equipment)
        }
        other => (None, name_hint.to_string(), other),
    };

    let rows = equipment.as_array().ok_or(InvalidInput::NotAnArray)?;

    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or(InvalidInput::NotAnObject { index })?;

        let mut fields = BTreeMap::new();
        for (key, val) in obj {
            fields.insert(key.clone(), json_to_field(val));
        }
        records.push(EquipmentRecord::new(fields));
    }

    log::debug!("parsed {} equipment records from JSON", records.len());
    Ok(Dataset::from_records(id, name, records)?)
}

fn json_to_field(val: &JsonValue) -> FieldValue {
    match val {
        JsonValue::String(s) => FieldValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                FieldValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                FieldValue::Float(f)
            } else {
                FieldValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => FieldValue::Bool(*b),
        JsonValue::Null => FieldValue::Null,
        other => FieldValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, every cell type-guessed as
/// integer / float / bool / string (empty cell → null).
pub fn dataset_from_csv(name_hint: &str, input: impl io::Read) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut fields = BTreeMap::new();
        for (col_idx, value) in row.iter().enumerate() {
            let col_name = &headers[col_idx];
            fields.insert(col_name.clone(), guess_field_type(value.trim()));
        }
        records.push(EquipmentRecord::new(fields));
    }

    log::debug!("parsed {} equipment records from CSV", records.len());
    Ok(Dataset::from_records(None, name_hint, records)?)
}

fn guess_field_type(s: &str) -> FieldValue {
    if s.is_empty() {
        return FieldValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return FieldValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return FieldValue::Float(f);
    }
    if s == "true" || s == "false" {
        return FieldValue::Bool(s == "true");
    }
    FieldValue::String(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_descriptor_round_trip() {
        let text = r#"{
            "id": 3,
            "name": "plant_survey",
            "equipment": [
                {"equipment_name": "P-101", "equipment_type": "Pump", "flowrate": 120.5},
                {"equipment_name": "C-201", "equipment_type": "Compressor", "flowrate": 88.0}
            ]
        }"#;
        let ds = dataset_from_json("fallback", text).unwrap();
        assert_eq!(ds.id, Some(3));
        assert_eq!(ds.name, "plant_survey");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].numeric("flowrate"), Some(120.5));
    }

    #[test]
    fn json_bare_array_uses_name_hint() {
        let ds = dataset_from_json("uploaded", r#"[{"name": "V-1", "type": "Valve"}]"#).unwrap();
        assert_eq!(ds.id, None);
        assert_eq!(ds.name, "uploaded");
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn json_rejects_non_array_equipment() {
        let err = dataset_from_json("x", r#"{"equipment": 42}"#).unwrap_err();
        assert_eq!(
            err.downcast::<InvalidInput>().unwrap(),
            InvalidInput::NotAnArray
        );
    }

    #[test]
    fn json_rejects_non_object_record() {
        let err = dataset_from_json("x", r#"[1, 2, 3]"#).unwrap_err();
        assert_eq!(
            err.downcast::<InvalidInput>().unwrap(),
            InvalidInput::NotAnObject { index: 0 }
        );
    }

    #[test]
    fn csv_guesses_cell_types() {
        let csv = "equipment_name,equipment_type,flowrate,inspections\n\
                   P-101,Pump,120.5,4\n\
                   V-300,Valve,,0\n";
        let ds = dataset_from_csv("survey", csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].numeric("flowrate"), Some(120.5));
        assert_eq!(
            ds.records[0].get("inspections"),
            Some(&FieldValue::Integer(4))
        );
        assert_eq!(ds.records[1].get("flowrate"), Some(&FieldValue::Null));
        assert_eq!(
            ds.records[0].get("equipment_type"),
            Some(&FieldValue::String("Pump".into()))
        );
    }
}
