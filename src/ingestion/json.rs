//! JSON record ingestion.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"a":1}, {"a":2}]`
//! - A single JSON object (one record)
//! - Newline-delimited JSON (NDJSON): `{"a":1}\n{"a":2}\n`

use std::fs;
use std::path::Path;

use crate::error::{OpsError, OpsResult};
use crate::types::Value;

/// Read records from a JSON/NDJSON file. Returns a [`Value::List`] of [`Value::Record`]s.
pub fn records_from_json_path(path: impl AsRef<Path>) -> OpsResult<Value> {
    let text = fs::read_to_string(path)?;
    records_from_json_str(&text)
}

/// Parse records from an in-memory JSON/NDJSON string.
pub fn records_from_json_str(input: &str) -> OpsResult<Value> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(OpsError::SchemaMismatch {
            message: "json input is empty".to_string(),
        });
    }

    // First try parsing as a single JSON value (array or object).
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
        match v {
            serde_json::Value::Array(items) => records_from_values(items),
            serde_json::Value::Object(_) => records_from_values(vec![v]),
            _ => Err(OpsError::SchemaMismatch {
                message: "json must be an object, an array of objects, or NDJSON".to_string(),
            }),
        }
    } else {
        // Fall back to NDJSON.
        let mut values = Vec::new();
        for (i, line) in trimmed.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let v = serde_json::from_str::<serde_json::Value>(line).map_err(|e| {
                OpsError::SchemaMismatch {
                    message: format!("invalid ndjson at line {}: {}", i + 1, e),
                }
            })?;
            values.push(v);
        }
        records_from_values(values)
    }
}

fn records_from_values(values: Vec<serde_json::Value>) -> OpsResult<Value> {
    let mut records = Vec::with_capacity(values.len());
    for (idx0, v) in values.into_iter().enumerate() {
        if !v.is_object() {
            return Err(OpsError::SchemaMismatch {
                message: format!("row {} is not a json object", idx0 + 1),
            });
        }
        records.push(Value::from(v));
    }
    Ok(Value::List(records))
}
