//! Data-layer error types.

use arrow::error::ArrowError;
use lumen_types::SeriesError;
use parquet::errors::ParquetError;
use thiserror::Error;

/// Errors that can occur while loading or validating fixtures.
#[derive(Debug, Error)]
pub enum DataError {
    /// The fixture file could not be opened.
    #[error("cannot open fixture {path}: {reason}")]
    FileNotFound {
        /// Path as given.
        path: String,
        /// OS error text.
        reason: String,
    },

    /// Parquet metadata or pages could not be decoded.
    #[error(transparent)]
    Parquet(#[from] ParquetError),

    /// A record batch could not be decoded.
    #[error(transparent)]
    Arrow(#[from] ArrowError),

    /// A required column is missing.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// A column has an unexpected data type.
    #[error("column {column} has type {found}, expected {expected}")]
    InvalidColumnType {
        /// Column name.
        column: String,
        /// Arrow type found in the file.
        found: String,
        /// Accepted type(s).
        expected: &'static str,
    },

    /// A timestamp column is missing timezone or not UTC.
    #[error("invalid timezone for column {column}: expected UTC, got {timezone}")]
    InvalidTimezone {
        /// Name of the offending column.
        column: String,
        /// Observed timezone string ("<none>" if missing).
        timezone: String,
    },

    /// The file holds no rows.
    #[error("fixture contains no rows")]
    EmptyData,

    /// A bar violates the fixture contract.
    #[error("invalid bar at index {index}: {reason}")]
    InvalidBar {
        /// Bar index.
        index: usize,
        /// Violated rule.
        reason: String,
    },

    /// The loaded bars do not form a valid series.
    #[error(transparent)]
    Series(#[from] SeriesError),
}
