//! Fixture validation helpers.

use lumen_types::{Bar, Num, NumKind};

use crate::error::DataError;

/// Validates a sequence of bars against the fixture contract.
///
/// # Errors
/// - [`DataError::EmptyData`] when `bars` is empty.
/// - [`DataError::InvalidBar`] for the first bar with a NaN value, negative
///   volume, inconsistent OHLC or a timestamp not after its predecessor.
pub fn validate_bars<K: NumKind>(bars: &[Bar<K>]) -> Result<(), DataError> {
    if bars.is_empty() {
        return Err(DataError::EmptyData);
    }

    for (i, bar) in bars.iter().enumerate() {
        let previous = i.checked_sub(1).map(|p| &bars[p]);
        if let Err(reason) = check_bar(bar, previous) {
            tracing::warn!(index = i, timestamp_ns = bar.timestamp_ns, %reason, "invalid fixture bar");
            return Err(DataError::InvalidBar { index: i, reason });
        }
    }

    Ok(())
}

fn check_bar<K: NumKind>(bar: &Bar<K>, previous: Option<&Bar<K>>) -> Result<(), String> {
    if let Some(previous) = previous {
        if bar.timestamp_ns <= previous.timestamp_ns {
            return Err(format!(
                "non-monotonic timestamp {} <= {}",
                bar.timestamp_ns, previous.timestamp_ns
            ));
        }
    }

    if [bar.open, bar.high, bar.low, bar.close, bar.volume]
        .iter()
        .any(Num::is_nan)
    {
        return Err("NaN or infinite value".to_string());
    }

    if bar.volume.is_negative() {
        return Err(format!("negative volume {}", bar.volume));
    }

    if bar.low.is_greater_than(&bar.open)
        || bar.low.is_greater_than(&bar.close)
        || bar.high.is_less_than(&bar.open)
        || bar.high.is_less_than(&bar.close)
    {
        return Err(format!(
            "invalid OHLC: low={}, high={}, open={}, close={}",
            bar.low, bar.high, bar.open, bar.close
        ));
    }

    Ok(())
}
