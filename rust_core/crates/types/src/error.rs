use thiserror::Error;

/// Errors raised by numeric conversions and ordering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumError {
    /// Exact conversion or ordering attempted on the NaN sentinel
    #[error("operation not possible with NaN: {0}")]
    NaNOperation(&'static str),

    /// Literal could not be parsed into the chosen representation
    #[error("cannot parse {input:?} as {representation}")]
    Parse {
        /// Rejected input text.
        input: String,
        /// Representation name (e.g. "double", "decimal").
        representation: &'static str,
    },

    /// Value does not fit the requested primitive
    #[error("{value} is out of range for {target}")]
    OutOfRange {
        /// Rendered value.
        value: String,
        /// Target primitive type.
        target: &'static str,
    },
}

/// Errors raised by bar series access and growth.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    /// Index outside the structural domain of the series
    #[error("index {index} out of bounds for series of length {len}")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of committed bars.
        len: usize,
    },

    /// Index inside the announced horizon whose bar has not arrived yet
    #[error("index {index} not yet available: {len} bars committed of {expected} expected")]
    NotYetAvailable {
        /// Requested index.
        index: usize,
        /// Number of committed bars.
        len: usize,
        /// Announced series length.
        expected: usize,
    },

    /// Bar timestamp does not advance past the last committed bar
    #[error("non-monotonic timestamp at index {index}: {timestamp_ns} <= {previous_ns}")]
    NonMonotonicTimestamp {
        /// Index the bar would have taken.
        index: usize,
        /// Timestamp of the rejected bar.
        timestamp_ns: i64,
        /// Timestamp of the last committed bar.
        previous_ns: i64,
    },

    /// Mutation of the open bar requested on an empty series
    #[error("series {0:?} has no bars")]
    Empty(String),
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SeriesError::IndexOutOfBounds { index: 3, len: 3 };
        assert_eq!(err.to_string(), "index 3 out of bounds for series of length 3");

        let err = NumError::NaNOperation("long_value");
        assert_eq!(err.to_string(), "operation not possible with NaN: long_value");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: ConfigError = io_err.into();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
