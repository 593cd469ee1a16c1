//! Bar field accessors

use std::sync::Arc;

use lumen_types::{BarSeries, Num, NumKind};

use crate::error::IndicatorError;
use crate::traits::{Calculator, Indicator};

/// Which bar field a [`PriceIndicator`] reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    /// Open price
    Open,
    /// High price
    High,
    /// Low price
    Low,
    /// Close price
    Close,
    /// Traded volume
    Volume,
    /// Traded amount
    Amount,
    /// (high + low + close) / 3
    Typical,
    /// (high + low) / 2
    Median,
}

impl PriceSource {
    /// Display name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PriceSource::Open => "OpenPrice",
            PriceSource::High => "HighPrice",
            PriceSource::Low => "LowPrice",
            PriceSource::Close => "ClosePrice",
            PriceSource::Volume => "Volume",
            PriceSource::Amount => "Amount",
            PriceSource::Typical => "TypicalPrice",
            PriceSource::Median => "MedianPrice",
        }
    }
}

/// Reads one field of the bar at each index.
#[derive(Debug, Clone)]
pub struct PriceIndicator<K> {
    series: Arc<BarSeries<K>>,
    source: PriceSource,
}

impl<K: NumKind> PriceIndicator<K> {
    /// Creates an accessor for `source`.
    #[must_use]
    pub fn new(series: &Arc<BarSeries<K>>, source: PriceSource) -> Self {
        Self {
            series: Arc::clone(series),
            source,
        }
    }

    /// Close price accessor.
    #[must_use]
    pub fn close(series: &Arc<BarSeries<K>>) -> Self {
        Self::new(series, PriceSource::Close)
    }

    /// Open price accessor.
    #[must_use]
    pub fn open(series: &Arc<BarSeries<K>>) -> Self {
        Self::new(series, PriceSource::Open)
    }

    /// High price accessor.
    #[must_use]
    pub fn high(series: &Arc<BarSeries<K>>) -> Self {
        Self::new(series, PriceSource::High)
    }

    /// Low price accessor.
    #[must_use]
    pub fn low(series: &Arc<BarSeries<K>>) -> Self {
        Self::new(series, PriceSource::Low)
    }

    /// Volume accessor.
    #[must_use]
    pub fn volume(series: &Arc<BarSeries<K>>) -> Self {
        Self::new(series, PriceSource::Volume)
    }

    /// Field read by this accessor.
    #[must_use]
    pub fn source(&self) -> PriceSource {
        self.source
    }
}

impl<K: NumKind> Calculator<K> for PriceIndicator<K> {
    fn series(&self) -> &Arc<BarSeries<K>> {
        &self.series
    }

    fn calculate(&self, _this: &dyn Indicator<K>, index: usize) -> Result<Num<K>, IndicatorError> {
        let bar = self.series.bar(index)?;
        let factory = self.series.factory();
        Ok(match self.source {
            PriceSource::Open => bar.open,
            PriceSource::High => bar.high,
            PriceSource::Low => bar.low,
            PriceSource::Close => bar.close,
            PriceSource::Volume => bar.volume,
            PriceSource::Amount => bar.amount,
            PriceSource::Typical => (bar.high + bar.low + bar.close) / factory.num_of(3),
            PriceSource::Median => (bar.high + bar.low) / factory.num_of(2),
        })
    }

    fn name(&self) -> String {
        self.source.label().to_string()
    }
}
