//! Directional movement system: +DI / -DI, DX and ADX

use std::sync::Arc;

use lumen_types::{BarSeries, CacheConfig, Num, NumKind};

use crate::error::IndicatorError;
use crate::impl_::atr::Atr;
use crate::impl_::directional_movement::{Direction, DirectionalMovement};
use crate::impl_::mma::Mma;
use crate::traits::{Calculator, CalculatorExt, Indicator, IndicatorRef};

/// Directional indicator
///
/// DI = MMA(DM, bar_count) / ATR(bar_count) * 100
pub struct DirectionalIndicator<K> {
    average_movement: IndicatorRef<K>,
    atr: IndicatorRef<K>,
    direction: Direction,
    bar_count: usize,
}

impl<K: NumKind> DirectionalIndicator<K> {
    /// Creates a DI with its own ATR and default cache settings.
    #[must_use]
    pub fn new(series: &Arc<BarSeries<K>>, direction: Direction, bar_count: usize) -> Self {
        Self::with_config(series, direction, bar_count, &CacheConfig::default())
    }

    /// Creates a DI with its own ATR.
    #[must_use]
    pub fn with_config(
        series: &Arc<BarSeries<K>>,
        direction: Direction,
        bar_count: usize,
        config: &CacheConfig,
    ) -> Self {
        let atr = Atr::with_config(series, bar_count, config).cached_with(config);
        Self::with_atr(series, direction, atr, bar_count, config)
    }

    /// Creates a DI over an existing ATR node, so that +DI and -DI can share it.
    #[must_use]
    pub fn with_atr(
        series: &Arc<BarSeries<K>>,
        direction: Direction,
        atr: IndicatorRef<K>,
        bar_count: usize,
        config: &CacheConfig,
    ) -> Self {
        let movement = DirectionalMovement::new(series, direction).cached_with(config);
        Self {
            average_movement: Mma::new(movement, bar_count).cached_with(config),
            atr,
            direction,
            bar_count,
        }
    }

    /// +DI with default cache settings.
    #[must_use]
    pub fn plus(series: &Arc<BarSeries<K>>, bar_count: usize) -> Self {
        Self::new(series, Direction::Plus, bar_count)
    }

    /// -DI with default cache settings.
    #[must_use]
    pub fn minus(series: &Arc<BarSeries<K>>, bar_count: usize) -> Self {
        Self::new(series, Direction::Minus, bar_count)
    }
}

impl<K: NumKind> Calculator<K> for DirectionalIndicator<K> {
    fn series(&self) -> &Arc<BarSeries<K>> {
        self.atr.series()
    }

    fn calculate(&self, _this: &dyn Indicator<K>, index: usize) -> Result<Num<K>, IndicatorError> {
        let movement = self.average_movement.value(index)?;
        let atr = self.atr.value(index)?;
        Ok(movement
            .divided_by(atr)
            .multiplied_by(self.atr.factory().hundred()))
    }

    fn name(&self) -> String {
        format!("{}DI({})", self.direction.sign(), self.bar_count)
    }
}

/// Directional movement index
///
/// DX = |+DI - -DI| / (+DI + -DI) * 100, zero when both DIs are zero.
pub struct Dx<K> {
    plus: IndicatorRef<K>,
    minus: IndicatorRef<K>,
    bar_count: usize,
}

impl<K: NumKind> Dx<K> {
    /// Creates a DX with default cache settings.
    #[must_use]
    pub fn new(series: &Arc<BarSeries<K>>, bar_count: usize) -> Self {
        Self::with_config(series, bar_count, &CacheConfig::default())
    }

    /// Creates a DX; both directional indicators share one ATR node.
    #[must_use]
    pub fn with_config(series: &Arc<BarSeries<K>>, bar_count: usize, config: &CacheConfig) -> Self {
        let atr = Atr::with_config(series, bar_count, config).cached_with(config);
        let plus = DirectionalIndicator::with_atr(
            series,
            Direction::Plus,
            Arc::clone(&atr),
            bar_count,
            config,
        )
        .cached_with(config);
        let minus =
            DirectionalIndicator::with_atr(series, Direction::Minus, atr, bar_count, config)
                .cached_with(config);
        Self {
            plus,
            minus,
            bar_count,
        }
    }
}

impl<K: NumKind> Calculator<K> for Dx<K> {
    fn series(&self) -> &Arc<BarSeries<K>> {
        self.plus.series()
    }

    fn calculate(&self, _this: &dyn Indicator<K>, index: usize) -> Result<Num<K>, IndicatorError> {
        let plus = self.plus.value(index)?;
        let minus = self.minus.value(index)?;
        let sum = plus.plus(minus);
        let factory = self.plus.factory();
        if sum.is_zero() {
            return Ok(factory.zero());
        }
        Ok(plus
            .minus(minus)
            .abs()
            .divided_by(sum)
            .multiplied_by(factory.hundred()))
    }

    fn name(&self) -> String {
        format!("DX({})", self.bar_count)
    }
}

/// Average directional index
///
/// ADX = MMA(DX(di_bar_count), adx_bar_count)
pub struct Adx<K> {
    average: IndicatorRef<K>,
    di_bar_count: usize,
    adx_bar_count: usize,
}

impl<K: NumKind> Adx<K> {
    /// Creates an ADX with default cache settings.
    #[must_use]
    pub fn new(series: &Arc<BarSeries<K>>, di_bar_count: usize, adx_bar_count: usize) -> Self {
        Self::with_config(series, di_bar_count, adx_bar_count, &CacheConfig::default())
    }

    /// Creates an ADX with the same period for DI and DX smoothing.
    #[must_use]
    pub fn with_period(series: &Arc<BarSeries<K>>, bar_count: usize) -> Self {
        Self::new(series, bar_count, bar_count)
    }

    /// Creates an ADX whose inner nodes use `config`.
    #[must_use]
    pub fn with_config(
        series: &Arc<BarSeries<K>>,
        di_bar_count: usize,
        adx_bar_count: usize,
        config: &CacheConfig,
    ) -> Self {
        let dx = Dx::with_config(series, di_bar_count, config).cached_with(config);
        Self {
            average: Mma::new(dx, adx_bar_count).cached_with(config),
            di_bar_count,
            adx_bar_count,
        }
    }
}

impl<K: NumKind> Calculator<K> for Adx<K> {
    fn series(&self) -> &Arc<BarSeries<K>> {
        self.average.series()
    }

    fn calculate(&self, _this: &dyn Indicator<K>, index: usize) -> Result<Num<K>, IndicatorError> {
        self.average.value(index)
    }

    fn name(&self) -> String {
        format!("ADX({}, {})", self.di_bar_count, self.adx_bar_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::hlc_series;
    use lumen_types::{DECIMAL, DOUBLE};

    const ROWS: [(f64, f64, f64); 6] = [
        (10.0, 8.0, 9.0),
        (12.0, 9.0, 11.0),
        (13.0, 10.0, 12.0),
        (12.5, 9.5, 10.0),
        (11.0, 8.0, 8.5),
        (12.0, 8.5, 11.5),
    ];

    #[test]
    fn test_first_bar_is_zero() {
        let series = hlc_series(DOUBLE, &ROWS);
        let pdi = DirectionalIndicator::plus(&series, 3).cached();
        let dx = Dx::new(&series, 3).cached();
        let adx = Adx::with_period(&series, 3).cached();

        assert!(pdi.value(0).unwrap().is_zero());
        assert!(dx.value(0).unwrap().is_zero());
        assert!(adx.value(0).unwrap().is_zero());
    }

    #[test]
    fn test_flat_market_dx_is_zero() {
        let series = hlc_series(DOUBLE, &[(10.0, 9.0, 9.5); 4]);
        let dx = Dx::new(&series, 2).cached();
        for i in 0..4 {
            assert!(dx.value(i).unwrap().is_zero(), "DX at {i}");
        }
    }

    #[test]
    fn test_di_bounded() {
        let series = hlc_series(DOUBLE, &ROWS);
        let pdi = DirectionalIndicator::plus(&series, 3).cached();
        let mdi = DirectionalIndicator::minus(&series, 3).cached();
        let adx = Adx::with_period(&series, 3).cached();
        let hundred = DOUBLE.hundred();
        for i in 0..ROWS.len() {
            for value in [pdi.value(i).unwrap(), mdi.value(i).unwrap(), adx.value(i).unwrap()] {
                assert!(value.is_positive_or_zero(), "negative at {i}");
                assert!(value.is_less_than_or_equal(&hundred), "above 100 at {i}");
            }
        }
    }

    #[test]
    fn test_double_and_decimal_agree() {
        let double = Adx::with_period(&hlc_series(DOUBLE, &ROWS), 3).cached();
        let decimal = Adx::with_period(&hlc_series(DECIMAL, &ROWS), 3).cached();
        for i in 0..ROWS.len() {
            let a = double.value(i).unwrap().double_value();
            let b = decimal.value(i).unwrap().double_value();
            assert!((a - b).abs() < 1e-9, "index {i}: {a} vs {b}");
        }
    }

    #[test]
    fn test_names() {
        let series = hlc_series(DOUBLE, &ROWS);
        assert_eq!(DirectionalIndicator::minus(&series, 14).cached().name(), "-DI(14)");
        assert_eq!(Dx::new(&series, 14).cached().name(), "DX(14)");
        assert_eq!(Adx::new(&series, 14, 20).cached().name(), "ADX(14, 20)");
    }
}
