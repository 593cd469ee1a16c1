//! Lumen Data
//!
//! Parquet fixture loading and validation for bar series and reference
//! indicator columns.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

/// Data-layer error types.
pub mod error;
/// Parquet loading.
pub mod loader;
/// Fixture validation helpers.
pub mod validation;

/// Re-export: data-layer error type.
pub use error::DataError;
/// Re-export: fixture root env override.
pub use loader::FIXTURE_ROOT_ENV;
/// Re-export: series of a runtime-chosen representation.
pub use loader::LoadedSeries;
/// Re-export: load and validate a bar series.
pub use loader::load_and_validate;
/// Re-export: load expected indicator values.
pub use loader::load_reference_column;
/// Re-export: load a bar series from Parquet.
pub use loader::load_series;
/// Re-export: load a bar series in a runtime-chosen representation.
pub use loader::load_series_as;
/// Re-export: resolve a fixture path.
pub use loader::resolve_fixture_path;
/// Re-export: bar validation.
pub use validation::validate_bars;
