//! Indicator traits and specifications.
//!
//! An [`Indicator`] maps a bar index to a value. Concrete formulas implement
//! [`Calculator`] and are turned into shareable, memoized indicators with
//! [`CalculatorExt::cached`].

use std::sync::Arc;

use lumen_types::{BarSeries, CacheConfig, Num, NumFactory, NumKind};

use crate::cache::CachedIndicator;
use crate::error::IndicatorError;

/// Read-only, index-addressable view of a derived series.
///
/// Every indicator is bound to exactly one [`BarSeries`] and produces values
/// of that series' representation.
pub trait Indicator<K: NumKind>: Send + Sync {
    /// Value at `index`.
    ///
    /// # Errors
    ///
    /// - [`IndicatorError::Series`] if `index` is out of range or not yet available.
    /// - [`IndicatorError::CircularEvaluation`] if the computation re-enters itself.
    fn value(&self, index: usize) -> Result<Num<K>, IndicatorError>;

    /// The series this indicator is bound to.
    fn series(&self) -> &Arc<BarSeries<K>>;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Factory of the bound series.
    fn factory(&self) -> NumFactory<K> {
        self.series().factory()
    }
}

/// Shared handle to an indicator. Dependencies are held through this type so
/// that one node can feed many consumers.
pub type IndicatorRef<K> = Arc<dyn Indicator<K>>;

/// How a [`CachedIndicator`] fills its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Compute only what is asked for.
    #[default]
    Lazy,
    /// The value at `i` depends on the value at `i - 1`; large gaps are
    /// filled iteratively from the highest cached index.
    Recursive,
}

/// A concrete indicator formula.
///
/// `calculate` is only called by [`CachedIndicator`], which guarantees that
/// `index` is inside the series. `this` is the memoized wrapper around the
/// calculator, so recursive formulas can read their own previous values.
pub trait Calculator<K: NumKind>: Send + Sync {
    /// The series the formula reads.
    fn series(&self) -> &Arc<BarSeries<K>>;

    /// Computes the value at `index`.
    ///
    /// # Errors
    ///
    /// Propagates errors from dependencies.
    fn calculate(&self, this: &dyn Indicator<K>, index: usize) -> Result<Num<K>, IndicatorError>;

    /// Display name, computed once when the calculator is wrapped.
    fn name(&self) -> String;

    /// Cache fill strategy.
    fn cache_mode(&self) -> CacheMode {
        CacheMode::Lazy
    }
}

/// Wrapping helpers for every [`Calculator`].
pub trait CalculatorExt<K: NumKind>: Calculator<K> + Sized + 'static {
    /// Wraps the calculator in a memoized indicator with default settings.
    fn cached(self) -> IndicatorRef<K> {
        Arc::new(CachedIndicator::new(self))
    }

    /// Wraps the calculator in a memoized indicator.
    fn cached_with(self, config: &CacheConfig) -> IndicatorRef<K> {
        Arc::new(CachedIndicator::with_config(self, config))
    }
}

impl<K: NumKind, C: Calculator<K> + 'static> CalculatorExt<K> for C {}

/// Specification for an indicator including name and parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct IndicatorSpec {
    /// Registered name (e.g. "ADX", "CLOSE").
    pub name: String,
    /// Parameters for the indicator
    #[serde(default)]
    pub params: IndicatorParams,
}

impl IndicatorSpec {
    /// Creates a new indicator specification.
    #[must_use]
    pub fn new(name: impl Into<String>, params: IndicatorParams) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

/// Parameters for indicator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorParams {
    /// No parameters (price accessors, true range, directional movement).
    None,

    /// Simple period-based parameter (SMA, MMA, ATR, DI, DX).
    Period(
        /// Number of bars in the window.
        usize,
    ),

    /// ADX parameters
    Adx {
        /// Smoothing period of the directional indicators.
        di_period: usize,
        /// Smoothing period of DX.
        adx_period: usize,
    },
}

impl Default for IndicatorParams {
    fn default() -> Self {
        IndicatorParams::Period(14)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_from_json() {
        let spec: IndicatorSpec =
            serde_json::from_str(r#"{"name": "ADX", "params": {"adx": {"di_period": 14, "adx_period": 20}}}"#)
                .unwrap();
        assert_eq!(
            spec,
            IndicatorSpec::new(
                "ADX",
                IndicatorParams::Adx {
                    di_period: 14,
                    adx_period: 20
                }
            )
        );
    }

    #[test]
    fn test_spec_default_params() {
        let spec: IndicatorSpec = serde_json::from_str(r#"{"name": "ATR"}"#).unwrap();
        assert_eq!(spec.params, IndicatorParams::Period(14));

        let spec: IndicatorSpec =
            serde_json::from_str(r#"{"name": "CLOSE", "params": "none"}"#).unwrap();
        assert_eq!(spec.params, IndicatorParams::None);
    }

    #[test]
    fn test_default_cache_mode_is_lazy() {
        assert_eq!(CacheMode::default(), CacheMode::Lazy);
    }
}
