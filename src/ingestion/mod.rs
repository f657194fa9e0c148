//! Loading record collections from files.
//!
//! Most callers should use [`load_records`], which picks the reader from the file extension
//! (or from [`IngestionOptions::format`]) and returns a [`Value::List`] of records ready for
//! [`crate::processing::apply_operations`].
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - [`json`]

pub mod csv;
pub mod json;

use std::path::Path;

use crate::error::{OpsError, OpsResult};
use crate::types::{Schema, Value};

/// Supported ingestion formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionFormat {
    /// Comma-separated values (needs a [`Schema`]).
    Csv,
    /// JSON array-of-objects, single object, or NDJSON.
    Json,
}

impl IngestionFormat {
    /// Parse an ingestion format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" | "ndjson" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Options controlling [`load_records`].
#[derive(Debug, Clone, Default)]
pub struct IngestionOptions {
    /// If `None`, auto-detect format from file extension.
    pub format: Option<IngestionFormat>,
    /// Column types for CSV input. Required for CSV, ignored for JSON.
    pub schema: Option<Schema>,
}

/// Load a record collection from `path`.
///
/// ```no_run
/// use record_ops::ingestion::{load_records, IngestionOptions};
/// use record_ops::processing::{apply_operations, create_filter, Operation};
/// use record_ops::types::Value;
///
/// # fn main() -> Result<(), record_ops::OpsError> {
/// let dhabas = load_records("dhabas.json", &IngestionOptions::default())?;
/// let good = apply_operations(
///     dhabas,
///     vec![Operation::filter(create_filter("rating", ">=", Value::from(4)))],
/// );
/// println!("good dhabas: {}", good.len());
/// # Ok(())
/// # }
/// ```
pub fn load_records(path: impl AsRef<Path>, options: &IngestionOptions) -> OpsResult<Value> {
    let path = path.as_ref();
    let fmt = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    match fmt {
        IngestionFormat::Json => json::records_from_json_path(path),
        IngestionFormat::Csv => {
            let schema = options.schema.as_ref().ok_or_else(|| OpsError::SchemaMismatch {
                message: format!("csv input requires a schema ({})", path.display()),
            })?;
            csv::records_from_csv_path(path, schema)
        }
    }
}

fn infer_format_from_path(path: &Path) -> OpsResult<IngestionFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| OpsError::SchemaMismatch {
            message: format!(
                "cannot infer format: path has no extension ({})",
                path.display()
            ),
        })?;

    IngestionFormat::from_extension(ext).ok_or_else(|| OpsError::SchemaMismatch {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::{load_records, IngestionFormat, IngestionOptions};

    #[test]
    fn format_from_extension() {
        assert_eq!(IngestionFormat::from_extension("JSON"), Some(IngestionFormat::Json));
        assert_eq!(IngestionFormat::from_extension("ndjson"), Some(IngestionFormat::Json));
        assert_eq!(IngestionFormat::from_extension("csv"), Some(IngestionFormat::Csv));
        assert_eq!(IngestionFormat::from_extension("parquet"), None);
    }

    #[test]
    fn unknown_extension_is_an_error() {
        let err = load_records("ratings.xlsx", &IngestionOptions::default()).unwrap_err();
        assert!(err.to_string().contains("cannot infer format from extension 'xlsx'"));
    }

    #[test]
    fn csv_without_schema_is_an_error() {
        let opts = IngestionOptions {
            format: Some(IngestionFormat::Csv),
            ..Default::default()
        };
        let err = load_records("whatever", &opts).unwrap_err();
        assert!(err.to_string().contains("csv input requires a schema"));
    }
}
