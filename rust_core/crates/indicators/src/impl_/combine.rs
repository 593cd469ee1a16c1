//! Element-wise arithmetic over two indicators

use std::sync::Arc;

use lumen_types::{BarSeries, Num, NumKind};

use crate::error::IndicatorError;
use crate::traits::{Calculator, Indicator, IndicatorRef};

/// Binary operation applied index by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombineOp {
    /// `a + b`
    Plus,
    /// `a - b`
    Minus,
    /// `a * b`
    MultipliedBy,
    /// `a / b`
    DividedBy,
    /// `min(a, b)`
    Min,
    /// `max(a, b)`
    Max,
}

impl CombineOp {
    /// Applies the operation; NaN operands propagate.
    #[must_use]
    pub fn apply<K: NumKind>(self, left: Num<K>, right: Num<K>) -> Num<K> {
        match self {
            CombineOp::Plus => left.plus(right),
            CombineOp::Minus => left.minus(right),
            CombineOp::MultipliedBy => left.multiplied_by(right),
            CombineOp::DividedBy => left.divided_by(right),
            CombineOp::Min => left.min(right),
            CombineOp::Max => left.max(right),
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            CombineOp::Plus => "+",
            CombineOp::Minus => "-",
            CombineOp::MultipliedBy => "*",
            CombineOp::DividedBy => "/",
            CombineOp::Min => "min",
            CombineOp::Max => "max",
        }
    }
}

/// `op(left[i], right[i])` for two indicators over the same series.
pub struct Combine<K> {
    left: IndicatorRef<K>,
    right: IndicatorRef<K>,
    op: CombineOp,
}

impl<K: NumKind> Combine<K> {
    /// Combines `left` and `right` with `op`.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::SeriesMismatch`] unless both indicators are
    /// bound to the same series.
    pub fn new(
        left: IndicatorRef<K>,
        op: CombineOp,
        right: IndicatorRef<K>,
    ) -> Result<Self, IndicatorError> {
        if !Arc::ptr_eq(left.series(), right.series()) {
            return Err(IndicatorError::SeriesMismatch {
                left: left.name().to_string(),
                right: right.name().to_string(),
            });
        }
        Ok(Self { left, right, op })
    }

    /// `left + right`
    ///
    /// # Errors
    ///
    /// Same as [`Combine::new`].
    pub fn plus(left: IndicatorRef<K>, right: IndicatorRef<K>) -> Result<Self, IndicatorError> {
        Self::new(left, CombineOp::Plus, right)
    }

    /// `left - right`
    ///
    /// # Errors
    ///
    /// Same as [`Combine::new`].
    pub fn minus(left: IndicatorRef<K>, right: IndicatorRef<K>) -> Result<Self, IndicatorError> {
        Self::new(left, CombineOp::Minus, right)
    }

    /// `left * right`
    ///
    /// # Errors
    ///
    /// Same as [`Combine::new`].
    pub fn multiplied_by(left: IndicatorRef<K>, right: IndicatorRef<K>) -> Result<Self, IndicatorError> {
        Self::new(left, CombineOp::MultipliedBy, right)
    }

    /// `left / right`
    ///
    /// # Errors
    ///
    /// Same as [`Combine::new`].
    pub fn divided_by(left: IndicatorRef<K>, right: IndicatorRef<K>) -> Result<Self, IndicatorError> {
        Self::new(left, CombineOp::DividedBy, right)
    }
}

impl<K: NumKind> Calculator<K> for Combine<K> {
    fn series(&self) -> &Arc<BarSeries<K>> {
        self.left.series()
    }

    fn calculate(&self, _this: &dyn Indicator<K>, index: usize) -> Result<Num<K>, IndicatorError> {
        let left = self.left.value(index)?;
        let right = self.right.value(index)?;
        Ok(self.op.apply(left, right))
    }

    fn name(&self) -> String {
        format!(
            "({} {} {})",
            self.left.name(),
            self.op.symbol(),
            self.right.name()
        )
    }
}
