//! True Range (TR) indicator

use std::sync::Arc;

use lumen_types::{BarSeries, Num, NumKind};

use crate::error::IndicatorError;
use crate::traits::{Calculator, Indicator};

/// True Range
///
/// TR = max(|High - Low|, |High - Prev_Close|, |Prev_Close - Low|).
/// The previous-close terms are zero at the first bar.
#[derive(Debug, Clone)]
pub struct TrueRange<K> {
    series: Arc<BarSeries<K>>,
}

impl<K: NumKind> TrueRange<K> {
    /// Creates a true range over `series`.
    #[must_use]
    pub fn new(series: &Arc<BarSeries<K>>) -> Self {
        Self {
            series: Arc::clone(series),
        }
    }
}

impl<K: NumKind> Calculator<K> for TrueRange<K> {
    fn series(&self) -> &Arc<BarSeries<K>> {
        &self.series
    }

    fn calculate(&self, _this: &dyn Indicator<K>, index: usize) -> Result<Num<K>, IndicatorError> {
        let bar = self.series.bar(index)?;
        let range = bar.high.minus(bar.low).abs();
        if index == 0 {
            let zero = self.series.factory().zero();
            return Ok(range.max(zero));
        }
        let prev_close = self.series.bar(index - 1)?.close;
        let high_gap = bar.high.minus(prev_close).abs();
        let low_gap = prev_close.minus(bar.low).abs();
        Ok(range.max(high_gap).max(low_gap))
    }

    fn name(&self) -> String {
        "TrueRange".to_string()
    }
}
