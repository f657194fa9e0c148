use thiserror::Error;

/// Convenience result type for the fallible parts of the crate.
pub type OpsResult<T> = Result<T, OpsError>;

/// Error type returned by ingestion and strict parsing functions.
///
/// The record operations themselves (`create_filter`, `create_sorter`, `create_mapper`,
/// `apply_operations`) never fail; they fall back to defined values instead.
#[derive(Debug, Error)]
pub enum OpsError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV ingestion error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON ingestion error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input does not have the expected shape (missing columns, non-object rows, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// Engine options that cannot be executed (zero chunk size, zero threads, etc.).
    #[error("invalid options: {message}")]
    InvalidOptions { message: String },

    /// The execution engine could not start its worker pool.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A comparison operator string is not one of `>`, `<`, `>=`, `<=`, `===`.
    #[error("unknown comparison operator '{0}'")]
    UnknownOperator(String),
}
