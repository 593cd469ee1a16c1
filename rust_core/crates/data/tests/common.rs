#![allow(dead_code)]

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, TimestampNanosecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use lumen_types::Bar;
use parquet::arrow::arrow_writer::ArrowWriter;

pub const TEST_STEP_NS: i64 = 60_000_000_000;
pub const TEST_BASE_NS: i64 = 1_704_067_200_000_000_000; // 2024-01-01 00:00:00 UTC

/// Raw fixture row, as stored in Parquet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixtureRow {
    pub timestamp_ns: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl FixtureRow {
    pub fn from_bar(bar: &Bar<f64>) -> Self {
        Self {
            timestamp_ns: bar.timestamp_ns,
            open: bar.open.double_value(),
            high: bar.high.double_value(),
            low: bar.low.double_value(),
            close: bar.close.double_value(),
            volume: bar.volume.double_value(),
        }
    }
}

pub fn write_bar_parquet(path: &Path, rows: &[FixtureRow]) -> Result<(), Box<dyn std::error::Error>> {
    write_bar_parquet_with_timezone(path, rows, Some("UTC"))
}

pub fn write_bar_parquet_with_timezone(
    path: &Path,
    rows: &[FixtureRow],
    timezone: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let timestamps: Vec<i64> = rows.iter().map(|r| r.timestamp_ns).collect();
    let ts_array = match timezone {
        Some(tz) => TimestampNanosecondArray::from(timestamps).with_timezone(tz.to_string()),
        None => TimestampNanosecondArray::from(timestamps),
    };

    let fields = vec![
        Field::new(
            "UTC time",
            DataType::Timestamp(TimeUnit::Nanosecond, timezone.map(Into::into)),
            false,
        ),
        Field::new("Open", DataType::Float64, false),
        Field::new("High", DataType::Float64, false),
        Field::new("Low", DataType::Float64, false),
        Field::new("Close", DataType::Float64, false),
        Field::new("Volume", DataType::Float64, false),
    ];

    let columns: Vec<ArrayRef> = vec![
        Arc::new(ts_array),
        float_column(rows.iter().map(|r| r.open)),
        float_column(rows.iter().map(|r| r.high)),
        float_column(rows.iter().map(|r| r.low)),
        float_column(rows.iter().map(|r| r.close)),
        float_column(rows.iter().map(|r| r.volume)),
    ];

    write_custom_parquet(path, fields, columns)
}

pub fn write_custom_parquet(
    path: &Path,
    fields: Vec<Field>,
    columns: Vec<ArrayRef>,
) -> Result<(), Box<dyn std::error::Error>> {
    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close().map(|_| ()).map_err(|e| e.into())
}

pub fn sample_rows() -> Vec<FixtureRow> {
    vec![
        FixtureRow {
            timestamp_ns: TEST_BASE_NS,
            open: 1.1,
            high: 1.2,
            low: 1.0,
            close: 1.15,
            volume: 100.0,
        },
        FixtureRow {
            timestamp_ns: TEST_BASE_NS + TEST_STEP_NS,
            open: 1.15,
            high: 1.25,
            low: 1.05,
            close: 1.2,
            volume: 120.0,
        },
    ]
}

pub fn timestamp_column(rows: &[FixtureRow]) -> ArrayRef {
    Arc::new(
        TimestampNanosecondArray::from(rows.iter().map(|r| r.timestamp_ns).collect::<Vec<_>>())
            .with_timezone("UTC"),
    )
}

pub fn timestamp_field() -> Field {
    Field::new(
        "UTC time",
        DataType::Timestamp(TimeUnit::Nanosecond, Some("UTC".into())),
        false,
    )
}

pub fn float_column(values: impl IntoIterator<Item = f64>) -> ArrayRef {
    Arc::new(Float64Array::from(values.into_iter().collect::<Vec<_>>()))
}

pub fn string_column(values: &[&str]) -> ArrayRef {
    Arc::new(StringArray::from(values.to_vec())) as ArrayRef
}
