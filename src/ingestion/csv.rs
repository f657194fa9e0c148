//! CSV record ingestion.

use std::path::Path;

use crate::error::{OpsError, OpsResult};
use crate::types::{DataType, Record, Schema, Value};

/// Read a headered CSV file into a [`Value::List`] of records typed by `schema`.
///
/// Rules:
///
/// - CSV must have headers.
/// - Headers must contain all schema fields (order can differ); other columns are ignored.
/// - Each non-empty cell is parsed according to the schema field type.
/// - Empty cells leave the field absent on that record.
pub fn records_from_csv_path(path: impl AsRef<Path>, schema: &Schema) -> OpsResult<Value> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    records_from_csv_reader(&mut rdr, schema)
}

/// Read records from an existing CSV reader.
pub fn records_from_csv_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    schema: &Schema,
) -> OpsResult<Value> {
    let headers = rdr.headers()?.clone();

    // Map schema fields -> CSV column indexes (allows re-ordered CSV columns).
    let mut col_idxs = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        match headers.iter().position(|h| h == field.name) {
            Some(idx) => col_idxs.push(idx),
            None => {
                return Err(OpsError::SchemaMismatch {
                    message: format!(
                        "missing required column '{field}'. headers={:?}",
                        headers.iter().collect::<Vec<_>>(),
                        field = field.name
                    ),
                });
            }
        }
    }

    let mut records = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // 1-based, and the header is row 1.
        let user_row = row_idx0 + 2;
        let row = result?;

        let mut record = Record::new();
        for (field, &csv_idx) in schema.fields.iter().zip(col_idxs.iter()) {
            let raw = row.get(csv_idx).unwrap_or("");
            if let Some(value) = parse_typed_value(user_row, &field.name, &field.data_type, raw)? {
                record.insert(field.name.clone(), value);
            }
        }
        records.push(Value::Record(record));
    }

    Ok(Value::List(records))
}

fn parse_typed_value(
    row: usize,
    column: &str,
    data_type: &DataType,
    raw: &str,
) -> OpsResult<Option<Value>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let parse_error = |message: String| OpsError::ParseError {
        row,
        column: column.to_owned(),
        raw: raw.to_owned(),
        message,
    };

    let value = match data_type {
        DataType::Utf8 => Value::Utf8(trimmed.to_owned()),
        DataType::Int64 => trimmed
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(|e| parse_error(e.to_string()))?,
        DataType::Float64 => trimmed
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(|e| parse_error(e.to_string()))?,
        DataType::Bool => parse_bool(trimmed).map(Value::Bool).map_err(parse_error)?,
    };
    Ok(Some(value))
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Ok(true),
        "false" | "f" | "0" | "no" | "n" => Ok(false),
        _ => Err("expected bool (true/false/1/0/yes/no)".to_string()),
    }
}
