//! Previous-value indicator

use std::sync::Arc;

use lumen_types::{BarSeries, Num, NumKind};

use crate::error::IndicatorError;
use crate::traits::{Calculator, Indicator, IndicatorRef};

/// Value of `source` `periods` bars earlier; NaN before enough history exists.
pub struct Lag<K> {
    source: IndicatorRef<K>,
    periods: usize,
}

impl<K: NumKind> Lag<K> {
    /// Creates a lag of `periods` bars.
    #[must_use]
    pub fn new(source: IndicatorRef<K>, periods: usize) -> Self {
        Self { source, periods }
    }

    /// One-bar lag.
    #[must_use]
    pub fn previous(source: IndicatorRef<K>) -> Self {
        Self::new(source, 1)
    }
}

impl<K: NumKind> Calculator<K> for Lag<K> {
    fn series(&self) -> &Arc<BarSeries<K>> {
        self.source.series()
    }

    fn calculate(&self, _this: &dyn Indicator<K>, index: usize) -> Result<Num<K>, IndicatorError> {
        match index.checked_sub(self.periods) {
            Some(earlier) => self.source.value(earlier),
            None => Ok(Num::NaN),
        }
    }

    fn name(&self) -> String {
        format!("Lag({}, {})", self.source.name(), self.periods)
    }
}
