//! Average True Range (ATR) indicator with Wilder smoothing

use std::sync::Arc;

use lumen_types::{BarSeries, CacheConfig, Num, NumKind};

use crate::error::IndicatorError;
use crate::impl_::mma::Mma;
use crate::impl_::true_range::TrueRange;
use crate::traits::{Calculator, CalculatorExt, Indicator, IndicatorRef};

/// Average True Range (Wilder)
///
/// ATR = MMA(TR, bar_count). Seeded with the first true range rather than a
/// simple average, so values exist from the first bar.
pub struct Atr<K> {
    average: IndicatorRef<K>,
    bar_count: usize,
}

impl<K: NumKind> Atr<K> {
    /// Creates an ATR with default cache settings.
    #[must_use]
    pub fn new(series: &Arc<BarSeries<K>>, bar_count: usize) -> Self {
        Self::with_config(series, bar_count, &CacheConfig::default())
    }

    /// Creates an ATR whose inner nodes use `config`.
    #[must_use]
    pub fn with_config(series: &Arc<BarSeries<K>>, bar_count: usize, config: &CacheConfig) -> Self {
        let true_range = TrueRange::new(series).cached_with(config);
        Self {
            average: Mma::new(true_range, bar_count).cached_with(config),
            bar_count,
        }
    }
}

impl<K: NumKind> Calculator<K> for Atr<K> {
    fn series(&self) -> &Arc<BarSeries<K>> {
        self.average.series()
    }

    fn calculate(&self, _this: &dyn Indicator<K>, index: usize) -> Result<Num<K>, IndicatorError> {
        self.average.value(index)
    }

    fn name(&self) -> String {
        format!("ATR({})", self.bar_count)
    }
}
