//! Indicator registry for dynamic indicator creation.

use std::collections::HashMap;
use std::sync::Arc;

use lumen_types::{BarSeries, CacheConfig, NumKind};

use crate::error::IndicatorError;
use crate::impl_::{
    adx::{Adx, DirectionalIndicator, Dx},
    atr::Atr,
    directional_movement::{Direction, DirectionalMovement},
    mma::Mma,
    price::{PriceIndicator, PriceSource},
    sma::Sma,
    true_range::TrueRange,
};
use crate::traits::{CalculatorExt, IndicatorParams, IndicatorRef, IndicatorSpec};

/// Factory function type for creating indicators from parameters.
pub type IndicatorFactory<K> = Box<
    dyn Fn(&Arc<BarSeries<K>>, &IndicatorParams, &CacheConfig) -> Result<IndicatorRef<K>, IndicatorError>
        + Send
        + Sync,
>;

/// Registry for indicator factories.
///
/// Allows dynamic creation of indicators by name and parameters. Every
/// indicator created through one registry uses the registry's cache settings.
pub struct IndicatorRegistry<K> {
    /// Indicator factories by name.
    factories: HashMap<String, IndicatorFactory<K>>,
    cache: CacheConfig,
}

impl<K: NumKind> IndicatorRegistry<K> {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            cache: CacheConfig::default(),
        }
    }

    /// Sets the cache settings passed to every factory.
    #[must_use]
    pub fn with_cache_config(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Registers an indicator factory, replacing any previous one of that name.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&Arc<BarSeries<K>>, &IndicatorParams, &CacheConfig) -> Result<IndicatorRef<K>, IndicatorError>
            + Send
            + Sync
            + 'static,
    {
        self.factories.insert(name.to_string(), Box::new(factory));
    }

    /// Creates an indicator over `series` from a specification.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::UnknownIndicator`] if the name is not registered
    /// and [`IndicatorError::InvalidParams`] when parameters do not match.
    pub fn create(
        &self,
        series: &Arc<BarSeries<K>>,
        spec: &IndicatorSpec,
    ) -> Result<IndicatorRef<K>, IndicatorError> {
        let factory = self
            .factories
            .get(&spec.name)
            .ok_or_else(|| IndicatorError::UnknownIndicator(spec.name.clone()))?;
        let indicator = factory(series, &spec.params, &self.cache)?;
        tracing::debug!(spec = %spec.name, indicator = indicator.name(), "created indicator");
        Ok(indicator)
    }

    /// Checks if an indicator is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Returns list of registered indicator names.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Creates a registry with all built-in indicators pre-registered.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        for (name, source) in [
            ("OPEN", PriceSource::Open),
            ("HIGH", PriceSource::High),
            ("LOW", PriceSource::Low),
            ("CLOSE", PriceSource::Close),
            ("VOLUME", PriceSource::Volume),
            ("AMOUNT", PriceSource::Amount),
            ("TYPICAL", PriceSource::Typical),
            ("MEDIAN", PriceSource::Median),
        ] {
            registry.register(name, move |series, _params, cache| {
                Ok(PriceIndicator::new(series, source).cached_with(cache))
            });
        }

        registry.register("TR", |series, _params, cache| {
            Ok(TrueRange::new(series).cached_with(cache))
        });
        registry.register("PLUS_DM", |series, _params, cache| {
            Ok(DirectionalMovement::plus(series).cached_with(cache))
        });
        registry.register("MINUS_DM", |series, _params, cache| {
            Ok(DirectionalMovement::minus(series).cached_with(cache))
        });

        // Moving averages of the close
        registry.register("SMA", |series, params, cache| {
            let bar_count = period("SMA", params)?;
            let close = PriceIndicator::close(series).cached_with(cache);
            Ok(Sma::new(close, bar_count).cached_with(cache))
        });
        registry.register("MMA", |series, params, cache| {
            let bar_count = period("MMA", params)?;
            let close = PriceIndicator::close(series).cached_with(cache);
            Ok(Mma::new(close, bar_count).cached_with(cache))
        });

        registry.register("ATR", |series, params, cache| {
            let bar_count = period("ATR", params)?;
            Ok(Atr::with_config(series, bar_count, cache).cached_with(cache))
        });
        registry.register("PLUS_DI", |series, params, cache| {
            let bar_count = period("PLUS_DI", params)?;
            Ok(DirectionalIndicator::with_config(series, Direction::Plus, bar_count, cache)
                .cached_with(cache))
        });
        registry.register("MINUS_DI", |series, params, cache| {
            let bar_count = period("MINUS_DI", params)?;
            Ok(DirectionalIndicator::with_config(series, Direction::Minus, bar_count, cache)
                .cached_with(cache))
        });
        registry.register("DX", |series, params, cache| {
            let bar_count = period("DX", params)?;
            Ok(Dx::with_config(series, bar_count, cache).cached_with(cache))
        });
        registry.register("ADX", |series, params, cache| {
            let (di_period, adx_period) = match params {
                IndicatorParams::Period(p) => (*p, *p),
                IndicatorParams::Adx {
                    di_period,
                    adx_period,
                } => (*di_period, *adx_period),
                IndicatorParams::None => {
                    return Err(IndicatorError::invalid_params(
                        "ADX requires Period or Adx params",
                    ));
                }
            };
            if di_period == 0 || adx_period == 0 {
                return Err(IndicatorError::invalid_params("ADX periods must be positive"));
            }
            Ok(Adx::with_config(series, di_period, adx_period, cache).cached_with(cache))
        });

        registry
    }
}

impl<K: NumKind> Default for IndicatorRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts a positive period.
fn period(name: &str, params: &IndicatorParams) -> Result<usize, IndicatorError> {
    match params {
        IndicatorParams::Period(0) => Err(IndicatorError::invalid_params(format!(
            "{name} period must be positive"
        ))),
        IndicatorParams::Period(p) => Ok(*p),
        _ => Err(IndicatorError::invalid_params(format!(
            "{name} requires Period params"
        ))),
    }
}
