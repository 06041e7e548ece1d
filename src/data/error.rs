use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading the source table.
///
/// Any of these is fatal at startup: no partial dataset is ever served.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}
