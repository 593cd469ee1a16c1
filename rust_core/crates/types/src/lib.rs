//! Lumen Types
//!
//! Core data structures for the Lumen indicator engine.
//! This crate provides the pluggable numeric value type, bars, the
//! append-only bar series, and engine configuration.

#![deny(clippy::all)]

pub mod bar;
pub mod config;
pub mod error;
pub mod num;
pub mod series;

// Re-export main types for convenience
pub use bar::Bar;
pub use config::{CacheConfig, EngineConfig, FixtureConfig, NumRepresentation};
pub use error::{ConfigError, NumError, SeriesError};
pub use num::{DECIMAL, DOUBLE, DecimalNum, DoubleNum, Num, NumFactory, NumKind, RawNumber};
pub use series::BarSeries;

/// Re-export of the decimal representation.
pub use rust_decimal::Decimal;
