//! Modified Moving Average (MMA), also known as Wilder smoothing

use std::sync::Arc;

use lumen_types::{BarSeries, Num, NumKind};

use crate::error::IndicatorError;
use crate::traits::{CacheMode, Calculator, Indicator, IndicatorRef};

/// Modified Moving Average
///
/// MMA[0] = source[0];
/// MMA[i] = MMA[i-1] + (source[i] - MMA[i-1]) / bar_count.
///
/// Reads its own previous value, so it is cached in recursive mode.
pub struct Mma<K> {
    source: IndicatorRef<K>,
    bar_count: usize,
    multiplier: Num<K>,
}

impl<K: NumKind> Mma<K> {
    /// Creates an MMA over `bar_count` values. A zero `bar_count` yields NaN
    /// after the first bar.
    #[must_use]
    pub fn new(source: IndicatorRef<K>, bar_count: usize) -> Self {
        let factory = source.factory();
        let multiplier = factory.one().divided_by(factory.num_of(bar_count));
        Self {
            source,
            bar_count,
            multiplier,
        }
    }
}

impl<K: NumKind> Calculator<K> for Mma<K> {
    fn series(&self) -> &Arc<BarSeries<K>> {
        self.source.series()
    }

    fn calculate(&self, this: &dyn Indicator<K>, index: usize) -> Result<Num<K>, IndicatorError> {
        if index == 0 {
            return self.source.value(0);
        }
        let prev = this.value(index - 1)?;
        let current = self.source.value(index)?;
        Ok(current.minus(prev).multiplied_by(self.multiplier).plus(prev))
    }

    fn name(&self) -> String {
        format!("MMA({}, {})", self.source.name(), self.bar_count)
    }

    fn cache_mode(&self) -> CacheMode {
        CacheMode::Recursive
    }
}
