//! Error types for axis validation and bounds computation.

use thiserror::Error;

/// Result type for axis operations.
pub type AxisResult<T> = Result<T, InvalidAxisError>;

/// The input sequence cannot describe a coordinate axis.
///
/// Always a caller contract violation: bounds computation is a pure function,
/// so retrying with the same values yields the same error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidAxisError {
    /// Fewer than two values; no cell spacing can be derived.
    #[error("axis too short: {len} value(s), at least 2 required")]
    TooShort { len: usize },

    /// Value at `index` breaks the direction set by the first two values,
    /// or repeats its predecessor.
    #[error("non-monotonic at index {index}")]
    NonMonotonic { index: usize },

    /// NaN or infinite value at `index`.
    #[error("non-finite value at index {index}")]
    NonFinite { index: usize },

    /// The outer edge of the end cell at `index` is beyond the `f64` range.
    #[error("bounds overflow at index {index}")]
    EdgeOverflow { index: usize },

    /// A generated sequence would exceed the supported length.
    #[error("axis too long: {len} values, at most {max} supported")]
    TooLong { len: usize, max: usize },

    /// Step of a generated sequence is zero or not finite.
    #[error("invalid step {step}")]
    InvalidStep { step: f64 },
}

impl InvalidAxisError {
    /// Offending index, when the failure points at a specific value.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::TooShort { .. } | Self::TooLong { .. } | Self::InvalidStep { .. } => None,
            Self::NonMonotonic { index }
            | Self::NonFinite { index }
            | Self::EdgeOverflow { index } => Some(*index),
        }
    }
}
