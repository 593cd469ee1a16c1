#![allow(dead_code)]

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, TimestampNanosecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use lumen_types::{Bar, BarSeries, NumFactory, NumKind};
use parquet::arrow::arrow_writer::ArrowWriter;

pub const TEST_STEP_NS: i64 = 60_000_000_000;
pub const TEST_BASE_NS: i64 = 1_704_067_200_000_000_000; // 2024-01-01 00:00:00 UTC

/// `(high, low, close)`; open equals close.
pub type Hlc = (f64, f64, f64);

pub fn close_series<K: NumKind>(factory: NumFactory<K>, closes: &[f64]) -> Arc<BarSeries<K>> {
    hlc_series(factory, &closes.iter().map(|&c| (c, c, c)).collect::<Vec<_>>())
}

pub fn hlc_series<K: NumKind>(factory: NumFactory<K>, rows: &[Hlc]) -> Arc<BarSeries<K>> {
    let bars = rows
        .iter()
        .enumerate()
        .map(|(i, &(h, l, c))| Bar::from_f64(factory, TEST_BASE_NS + i as i64 * TEST_STEP_NS, c, h, l, c, 1.0))
        .collect();
    Arc::new(BarSeries::with_bars("test", bars).unwrap())
}

/// Deterministic oscillating market with drift.
pub fn wave_rows(len: usize) -> Vec<Hlc> {
    let mut close = 100.0;
    (0..len)
        .map(|i| {
            let x = i as f64;
            close += (x * 0.37).sin() * 1.5 + 0.05;
            let range = 1.0 + (x * 0.11).cos().abs();
            (close + range * 0.6, close - range * 0.4, close)
        })
        .collect()
}

/// Plain `f64` directional movement system, used as the expected values.
#[derive(Debug, Default)]
pub struct ReferenceDms {
    pub tr: Vec<f64>,
    pub atr: Vec<f64>,
    pub plus_di: Vec<f64>,
    pub minus_di: Vec<f64>,
    pub dx: Vec<f64>,
    pub adx: Vec<f64>,
}

fn wilder(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    for (i, &v) in values.iter().enumerate() {
        if i == 0 {
            out.push(v);
        } else {
            let prev = out[i - 1];
            out.push(prev + (v - prev) / period as f64);
        }
    }
    out
}

pub fn reference_dms(rows: &[Hlc], di_period: usize, adx_period: usize) -> ReferenceDms {
    let mut tr = Vec::with_capacity(rows.len());
    let mut plus_dm = Vec::with_capacity(rows.len());
    let mut minus_dm = Vec::with_capacity(rows.len());

    for (i, &(h, l, _)) in rows.iter().enumerate() {
        if i == 0 {
            tr.push(h - l);
            plus_dm.push(0.0);
            minus_dm.push(0.0);
            continue;
        }
        let (ph, pl, pc) = rows[i - 1];
        tr.push((h - l).max((h - pc).abs()).max((pc - l).abs()));
        let up = h - ph;
        let down = pl - l;
        plus_dm.push(if up > down && up > 0.0 { up } else { 0.0 });
        minus_dm.push(if down > up && down > 0.0 { down } else { 0.0 });
    }

    let atr = wilder(&tr, di_period);
    let plus_avg = wilder(&plus_dm, di_period);
    let minus_avg = wilder(&minus_dm, di_period);
    let plus_di: Vec<f64> = plus_avg.iter().zip(&atr).map(|(m, a)| m / a * 100.0).collect();
    let minus_di: Vec<f64> = minus_avg.iter().zip(&atr).map(|(m, a)| m / a * 100.0).collect();
    let dx: Vec<f64> = plus_di
        .iter()
        .zip(&minus_di)
        .map(|(p, m)| if p + m == 0.0 { 0.0 } else { (p - m).abs() / (p + m) * 100.0 })
        .collect();
    let adx = wilder(&dx, adx_period);

    ReferenceDms {
        tr,
        atr,
        plus_di,
        minus_di,
        dx,
        adx,
    }
}

pub fn write_bar_parquet(path: &Path, rows: &[Hlc]) -> Result<(), Box<dyn std::error::Error>> {
    let timestamps: Vec<i64> = (0..rows.len())
        .map(|i| TEST_BASE_NS + i as i64 * TEST_STEP_NS)
        .collect();
    let fields = vec![
        Field::new(
            "UTC time",
            DataType::Timestamp(TimeUnit::Nanosecond, Some("UTC".into())),
            false,
        ),
        Field::new("Open", DataType::Float64, false),
        Field::new("High", DataType::Float64, false),
        Field::new("Low", DataType::Float64, false),
        Field::new("Close", DataType::Float64, false),
        Field::new("Volume", DataType::Float64, false),
    ];
    let columns: Vec<ArrayRef> = vec![
        Arc::new(TimestampNanosecondArray::from(timestamps).with_timezone("UTC")),
        Arc::new(Float64Array::from(rows.iter().map(|r| r.2).collect::<Vec<_>>())),
        Arc::new(Float64Array::from(rows.iter().map(|r| r.0).collect::<Vec<_>>())),
        Arc::new(Float64Array::from(rows.iter().map(|r| r.1).collect::<Vec<_>>())),
        Arc::new(Float64Array::from(rows.iter().map(|r| r.2).collect::<Vec<_>>())),
        Arc::new(Float64Array::from(vec![1_000.0; rows.len()])),
    ];
    write_custom_parquet(path, fields, columns)
}

/// Writes named nullable `Float64` columns; non-finite values are stored as nulls.
pub fn write_reference_parquet(
    path: &Path,
    columns: &[(&str, &[f64])],
) -> Result<(), Box<dyn std::error::Error>> {
    let fields = columns
        .iter()
        .map(|(name, _)| Field::new(*name, DataType::Float64, true))
        .collect();
    let arrays = columns
        .iter()
        .map(|(_, values)| {
            let values: Vec<Option<f64>> =
                values.iter().map(|v| v.is_finite().then_some(*v)).collect();
            Arc::new(Float64Array::from(values)) as ArrayRef
        })
        .collect();
    write_custom_parquet(path, fields, arrays)
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
