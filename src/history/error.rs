use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Failed to read history file '{0}'")]
    CacheRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to write history file '{0}'")]
    CacheWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to decode parquet history file '{0}'")]
    ParquetRead(PathBuf, #[source] PolarsError),

    #[error("Encoding error writing parquet history file '{0}'")]
    ParquetWrite(PathBuf, #[source] PolarsError),

    #[error("Required column '{0}' not found in DataFrame")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("Row {0} of the history has no timestamp")]
    NullTimestamp(usize),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
