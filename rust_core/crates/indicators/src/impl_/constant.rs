//! Constant indicator

use std::sync::Arc;

use lumen_types::{BarSeries, Num, NumKind};

use crate::error::IndicatorError;
use crate::traits::{Calculator, Indicator};

/// Same value at every index of the series.
#[derive(Debug, Clone)]
pub struct Constant<K> {
    series: Arc<BarSeries<K>>,
    value: Num<K>,
}

impl<K: NumKind> Constant<K> {
    /// Creates a constant bound to `series`.
    #[must_use]
    pub fn new(series: &Arc<BarSeries<K>>, value: Num<K>) -> Self {
        Self {
            series: Arc::clone(series),
            value,
        }
    }
}

impl<K: NumKind> Calculator<K> for Constant<K> {
    fn series(&self) -> &Arc<BarSeries<K>> {
        &self.series
    }

    fn calculate(&self, _this: &dyn Indicator<K>, _index: usize) -> Result<Num<K>, IndicatorError> {
        Ok(self.value)
    }

    fn name(&self) -> String {
        format!("Constant({})", self.value)
    }
}
