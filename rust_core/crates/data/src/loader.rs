use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Array, Float64Array, Int64Array, TimestampNanosecondArray};
use arrow::record_batch::RecordBatch;
use lumen_types::{
    Bar, BarSeries, Decimal, FixtureConfig, Num, NumFactory, NumKind, NumRepresentation,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::DataError;
use crate::validation::validate_bars;

/// Env variable overriding [`FixtureConfig::root`].
pub const FIXTURE_ROOT_ENV: &str = "LUMEN_FIXTURE_ROOT";

/// Bar open time column.
pub const TIME_COLUMN: &str = "UTC time";

/// Resolve a fixture file against the configured root or an env override.
#[must_use]
pub fn resolve_fixture_path(config: &FixtureConfig, file: &str) -> PathBuf {
    let root = std::env::var_os(FIXTURE_ROOT_ENV).map_or_else(|| config.root.clone(), PathBuf::from);
    root.join(file)
}

/// Loads a bar series from a Parquet file with schema:
/// `UTC time` (timestamp ns, UTC), `Open`, `High`, `Low`, `Close`, `Volume`.
///
/// Prices are converted through the series factory; null prices load as NaN.
///
/// # Errors
/// - [`DataError::FileNotFound`], [`DataError::Parquet`] or [`DataError::Arrow`]
///   for unreadable files.
/// - [`DataError::MissingColumn`], [`DataError::InvalidColumnType`] and
///   [`DataError::InvalidTimezone`] for schema violations.
/// - [`DataError::EmptyData`] when the file has no rows.
/// - [`DataError::InvalidBar`] when a row has a null timestamp.
/// - [`DataError::Series`] when timestamps do not strictly increase.
pub fn load_series<K: NumKind>(path: &Path) -> Result<BarSeries<K>, DataError> {
    let factory = NumFactory::<K>::new();
    let mut bars = Vec::new();

    for batch in read_batches(path)? {
        let ts_arr = timestamp_column(&batch, TIME_COLUMN)?;
        let open_arr = numeric_column(&batch, "Open")?;
        let high_arr = numeric_column(&batch, "High")?;
        let low_arr = numeric_column(&batch, "Low")?;
        let close_arr = numeric_column(&batch, "Close")?;
        let volume_arr = numeric_column(&batch, "Volume")?;

        for row_idx in 0..batch.num_rows() {
            if ts_arr.is_null(row_idx) {
                return Err(DataError::InvalidBar {
                    index: bars.len(),
                    reason: format!("null {TIME_COLUMN}"),
                });
            }
            bars.push(Bar::new(
                ts_arr.value(row_idx),
                factory.num_of(open_arr.value(row_idx)),
                factory.num_of(high_arr.value(row_idx)),
                factory.num_of(low_arr.value(row_idx)),
                factory.num_of(close_arr.value(row_idx)),
                factory.num_of(volume_arr.value(row_idx)),
            ));
        }
    }

    if bars.is_empty() {
        return Err(DataError::EmptyData);
    }

    let series = BarSeries::with_bars(series_name(path), bars)?;
    tracing::info!(
        path = %path.display(),
        bars = series.len(),
        representation = K::NAME,
        "loaded bar series"
    );
    Ok(series)
}

/// Convenience: load and validate a bar series.
///
/// # Errors
/// Same as [`load_series`], plus [`DataError::InvalidBar`] from
/// [`validate_bars`].
pub fn load_and_validate<K: NumKind>(path: &Path) -> Result<BarSeries<K>, DataError> {
    let series = load_series::<K>(path)?;
    let bars = (0..series.len())
        .map(|i| series.bar(i))
        .collect::<Result<Vec<_>, _>>()?;
    validate_bars(&bars)?;
    Ok(series)
}

/// Loads one numeric column of expected indicator values.
///
/// The column may be `Float64` or `Int64`; nulls load as NaN.
///
/// # Errors
/// - [`DataError::FileNotFound`], [`DataError::Parquet`] or [`DataError::Arrow`]
///   for unreadable files.
/// - [`DataError::MissingColumn`] / [`DataError::InvalidColumnType`] for schema violations.
/// - [`DataError::EmptyData`] when the file has no rows.
pub fn load_reference_column<K: NumKind>(
    path: &Path,
    column: &str,
) -> Result<Vec<Num<K>>, DataError> {
    let factory = NumFactory::<K>::new();
    let mut values = Vec::new();

    for batch in read_batches(path)? {
        let arr = numeric_column(&batch, column)?;
        values.extend((0..batch.num_rows()).map(|row_idx| factory.num_of(arr.value(row_idx))));
    }

    if values.is_empty() {
        return Err(DataError::EmptyData);
    }

    let nan_count = values.iter().filter(|v| v.is_nan()).count();
    tracing::info!(
        path = %path.display(),
        column,
        rows = values.len(),
        nan = nan_count,
        "loaded reference column"
    );
    Ok(values)
}

/// Bar series of a representation chosen at runtime.
#[derive(Debug, Clone)]
pub enum LoadedSeries {
    /// `f64` series
    Double(Arc<BarSeries<f64>>),
    /// `Decimal` series
    Decimal(Arc<BarSeries<Decimal>>),
}

impl LoadedSeries {
    /// Representation of the loaded values.
    #[must_use]
    pub fn representation(&self) -> NumRepresentation {
        match self {
            LoadedSeries::Double(_) => NumRepresentation::Double,
            LoadedSeries::Decimal(_) => NumRepresentation::Decimal,
        }
    }

    /// Number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            LoadedSeries::Double(series) => series.len(),
            LoadedSeries::Decimal(series) => series.len(),
        }
    }

    /// Returns `true` if no bar was loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Loads a bar series in the requested representation.
///
/// # Errors
/// Same as [`load_series`].
pub fn load_series_as(
    path: &Path,
    representation: NumRepresentation,
) -> Result<LoadedSeries, DataError> {
    Ok(match representation {
        NumRepresentation::Double => LoadedSeries::Double(Arc::new(load_series(path)?)),
        NumRepresentation::Decimal => LoadedSeries::Decimal(Arc::new(load_series(path)?)),
    })
}

fn series_name(path: &Path) -> String {
    path.file_stem().map_or_else(
        || path.display().to_string(),
        |stem| stem.to_string_lossy().into_owned(),
    )
}

fn read_batches(path: &Path) -> Result<Vec<RecordBatch>, DataError> {
    let file = std::fs::File::open(path).map_err(|e| DataError::FileNotFound {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    Ok(reader.collect::<Result<Vec<_>, _>>()?)
}

fn timestamp_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a TimestampNanosecondArray, DataError> {
    let col = batch
        .column_by_name(name)
        .ok_or_else(|| DataError::MissingColumn(name.to_string()))?;
    let arr = col
        .as_any()
        .downcast_ref::<TimestampNanosecondArray>()
        .ok_or_else(|| DataError::InvalidColumnType {
            column: name.to_string(),
            found: col.data_type().to_string(),
            expected: "Timestamp(Nanosecond)",
        })?;

    match arr.timezone() {
        Some("UTC" | "+00:00" | "Etc/UTC") => Ok(arr),
        other => Err(DataError::InvalidTimezone {
            column: name.to_string(),
            timezone: other.unwrap_or("<none>").to_string(),
        }),
    }
}

enum NumericAccessor<'a> {
    F64(&'a Float64Array),
    I64(&'a Int64Array),
}

impl NumericAccessor<'_> {
    /// Value at `idx`, NaN for nulls.
    #[allow(clippy::cast_precision_loss)]
    fn value(&self, idx: usize) -> f64 {
        match self {
            NumericAccessor::F64(arr) if arr.is_null(idx) => f64::NAN,
            NumericAccessor::I64(arr) if arr.is_null(idx) => f64::NAN,
            NumericAccessor::F64(arr) => arr.value(idx),
            NumericAccessor::I64(arr) => arr.value(idx) as f64,
        }
    }
}

fn numeric_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<NumericAccessor<'a>, DataError> {
    let col = batch
        .column_by_name(name)
        .ok_or_else(|| DataError::MissingColumn(name.to_string()))?;

    if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
        Ok(NumericAccessor::F64(arr))
    } else if let Some(arr) = col.as_any().downcast_ref::<Int64Array>() {
        Ok(NumericAccessor::I64(arr))
    } else {
        Err(DataError::InvalidColumnType {
            column: name.to_string(),
            found: col.data_type().to_string(),
            expected: "Float64 or Int64",
        })
    }
}
