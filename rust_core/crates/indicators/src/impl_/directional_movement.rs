//! Directional movement (+DM / -DM)

use std::sync::Arc;

use lumen_types::{BarSeries, Num, NumKind};
use serde::{Deserialize, Serialize};

use crate::error::IndicatorError;
use crate::traits::{Calculator, Indicator};

/// Side of the directional movement system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Upward movement (+DM, +DI)
    Plus,
    /// Downward movement (-DM, -DI)
    Minus,
}

impl Direction {
    pub(crate) fn sign(self) -> char {
        match self {
            Direction::Plus => '+',
            Direction::Minus => '-',
        }
    }
}

/// Directional movement
///
/// With up = High - Prev_High and down = Prev_Low - Low:
/// +DM = up if up > down and up > 0, else 0;
/// -DM = down if down > up and down > 0, else 0.
/// Zero at the first bar.
#[derive(Debug, Clone)]
pub struct DirectionalMovement<K> {
    series: Arc<BarSeries<K>>,
    direction: Direction,
}

impl<K: NumKind> DirectionalMovement<K> {
    /// Creates a movement for `direction`.
    #[must_use]
    pub fn new(series: &Arc<BarSeries<K>>, direction: Direction) -> Self {
        Self {
            series: Arc::clone(series),
            direction,
        }
    }

    /// +DM
    #[must_use]
    pub fn plus(series: &Arc<BarSeries<K>>) -> Self {
        Self::new(series, Direction::Plus)
    }

    /// -DM
    #[must_use]
    pub fn minus(series: &Arc<BarSeries<K>>) -> Self {
        Self::new(series, Direction::Minus)
    }
}

impl<K: NumKind> Calculator<K> for DirectionalMovement<K> {
    fn series(&self) -> &Arc<BarSeries<K>> {
        &self.series
    }

    fn calculate(&self, _this: &dyn Indicator<K>, index: usize) -> Result<Num<K>, IndicatorError> {
        let zero = self.series.factory().zero();
        if index == 0 {
            return Ok(zero);
        }
        let bar = self.series.bar(index)?;
        let prev = self.series.bar(index - 1)?;
        let up = bar.high.minus(prev.high);
        let down = prev.low.minus(bar.low);

        let (this_side, other_side) = match self.direction {
            Direction::Plus => (up, down),
            Direction::Minus => (down, up),
        };
        if this_side.is_greater_than(&other_side) && this_side.is_greater_than(&zero) {
            Ok(this_side)
        } else {
            Ok(zero)
        }
    }

    fn name(&self) -> String {
        format!("{}DM", self.direction.sign())
    }
}
