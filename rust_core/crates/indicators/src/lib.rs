//! Lumen Indicators
//!
//! Lazily evaluated, memoized technical indicators over a [`lumen_types::BarSeries`].
//!
//! # Features
//! - [`Indicator`] trait: index-addressable, representation-generic values
//! - [`CachedIndicator`]: at-most-once computation per closed bar, open bar
//!   always recomputed
//! - Indicator DAGs through shared [`IndicatorRef`] handles
//! - Registry for indicator factories
//!
//! # Available Indicators
//! - Price accessors: open, high, low, close, volume, amount, typical, median
//! - Constant, Lag, element-wise arithmetic (Combine)
//! - SMA: Simple Moving Average
//! - MMA: Modified Moving Average (Wilder smoothing)
//! - TR / ATR: True Range and Average True Range
//! - +DM / -DM, +DI / -DI, DX, ADX: Directional movement system

#![deny(clippy::all)]

pub mod cache;
pub mod error;
pub mod impl_;
pub mod registry;
pub mod traits;

#[cfg(test)]
mod test_util;

// Re-export main types
pub use cache::CachedIndicator;
pub use error::IndicatorError;
pub use registry::IndicatorRegistry;
pub use traits::{
    CacheMode, Calculator, CalculatorExt, Indicator, IndicatorParams, IndicatorRef, IndicatorSpec,
};

// Re-export indicator implementations
pub use impl_::{
    adx::{Adx, DirectionalIndicator, Dx},
    atr::Atr,
    combine::{Combine, CombineOp},
    constant::Constant,
    directional_movement::{Direction, DirectionalMovement},
    lag::Lag,
    mma::Mma,
    price::{PriceIndicator, PriceSource},
    sma::Sma,
    true_range::TrueRange,
};
