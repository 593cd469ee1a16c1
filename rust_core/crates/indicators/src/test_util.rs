//! Series builders shared by unit tests.

use std::sync::Arc;

use lumen_types::{Bar, BarSeries, NumFactory, NumKind};

/// One bar per close, open = high = low = close, one minute apart.
pub(crate) fn close_series<K: NumKind>(factory: NumFactory<K>, closes: &[f64]) -> Arc<BarSeries<K>> {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Bar::from_f64(factory, i as i64 * 60, c, c, c, c, 1.0))
        .collect();
    Arc::new(BarSeries::with_bars("test", bars).unwrap())
}

/// One bar per `(high, low, close)`, open = close.
pub(crate) fn hlc_series<K: NumKind>(
    factory: NumFactory<K>,
    rows: &[(f64, f64, f64)],
) -> Arc<BarSeries<K>> {
    let bars = rows
        .iter()
        .enumerate()
        .map(|(i, &(h, l, c))| Bar::from_f64(factory, i as i64 * 60, c, h, l, c, 1.0))
        .collect();
    Arc::new(BarSeries::with_bars("test", bars).unwrap())
}
