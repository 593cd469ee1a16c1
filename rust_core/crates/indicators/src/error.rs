//! Indicator error types.

use lumen_types::{NumError, SeriesError};
use thiserror::Error;

/// Errors that can occur during indicator evaluation or registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    /// Requested index is outside the series, or not yet available
    #[error(transparent)]
    Series(#[from] SeriesError),

    /// Exact numeric conversion failed (e.g. on NaN)
    #[error(transparent)]
    Num(#[from] NumError),

    /// The calculator re-entered its own indicator for the index being computed
    #[error("circular evaluation of {indicator} at index {index}")]
    CircularEvaluation {
        /// Indicator name.
        indicator: String,
        /// Index under computation.
        index: usize,
    },

    /// Combined indicators are bound to different series
    #[error("cannot combine {left} and {right}: different series")]
    SeriesMismatch {
        /// Left operand name.
        left: String,
        /// Right operand name.
        right: String,
    },

    /// Unknown indicator name requested from registry
    #[error("unknown indicator: {0}")]
    UnknownIndicator(String),

    /// Invalid parameters for the indicator
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

impl IndicatorError {
    /// Creates an `InvalidParams` error with a message.
    #[must_use]
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        IndicatorError::InvalidParams(msg.into())
    }

    /// Returns `true` for out-of-bounds indices.
    #[must_use]
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, IndicatorError::Series(SeriesError::IndexOutOfBounds { .. }))
    }

    /// Returns `true` for indices whose bar has not arrived yet.
    #[must_use]
    pub fn is_not_yet_available(&self) -> bool {
        matches!(self, IndicatorError::Series(SeriesError::NotYetAvailable { .. }))
    }
}
