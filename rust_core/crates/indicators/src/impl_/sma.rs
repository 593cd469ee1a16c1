//! Simple Moving Average (SMA) indicator

use std::sync::Arc;

use lumen_types::{BarSeries, Num, NumKind};

use crate::error::IndicatorError;
use crate::traits::{Calculator, Indicator, IndicatorRef};

/// Simple Moving Average
///
/// Arithmetic mean of the last `bar_count` values of `source`. Before a full
/// window exists, the mean covers all values so far.
pub struct Sma<K> {
    source: IndicatorRef<K>,
    bar_count: usize,
}

impl<K: NumKind> Sma<K> {
    /// Creates an SMA over `bar_count` values. A zero `bar_count` yields NaN
    /// at every index.
    #[must_use]
    pub fn new(source: IndicatorRef<K>, bar_count: usize) -> Self {
        Self { source, bar_count }
    }
}

impl<K: NumKind> Calculator<K> for Sma<K> {
    fn series(&self) -> &Arc<BarSeries<K>> {
        self.source.series()
    }

    fn calculate(&self, _this: &dyn Indicator<K>, index: usize) -> Result<Num<K>, IndicatorError> {
        let factory = self.source.factory();
        if self.bar_count == 0 {
            return Ok(factory.nan());
        }
        let start = (index + 1).saturating_sub(self.bar_count);
        let mut sum = factory.zero();
        for i in start..=index {
            sum = sum.plus(self.source.value(i)?);
        }
        Ok(sum.divided_by(factory.num_of(index - start + 1)))
    }

    fn name(&self) -> String {
        format!("SMA({}, {})", self.source.name(), self.bar_count)
    }
}
