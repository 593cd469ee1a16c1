//! Indicator implementations
//!
//! Contains all concrete indicator calculators. Wrap them with
//! [`crate::CalculatorExt::cached`] to obtain shareable indicators.

pub mod adx;
pub mod atr;
pub mod combine;
pub mod constant;
pub mod directional_movement;
pub mod lag;
pub mod mma;
pub mod price;
pub mod sma;
pub mod true_range;
