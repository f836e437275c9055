//! Error Types for Rejected Measurements
//!
//! ## Design Philosophy
//!
//! Rejections are the pipeline's normal output, not exceptional conditions:
//! a noisy serial line produces them continuously. The error types are
//! therefore kept small and cheap:
//!
//! 1. **Copy Semantics**: Errors implement Copy and are returned by value
//!    from the hot path.
//!
//! 2. **No Heap Allocation**: All error data is inline.
//!
//! 3. **Actionable Information**: Each variant carries the numbers that
//!    caused the rejection so a debug log line explains itself.
//!
//! ## Error Categories
//!
//! ### Sample Rejections (`ValidationError`)
//! - `InvalidValue`: Token is not a non-negative decimal integer
//! - `OutOfRange`: Instantaneous reading outside configured bounds
//! - `NotMonotonic`: Cumulative counter did not strictly increase
//! - `Outlier`: Reading deviates too far from the recent median
//!
//! ### Startup Failures (`ConfigError`)
//! - Invalid history capacity, threshold or range bounds
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use teleguard_core::{ValidationError, Outcome};
//!
//! fn describe(outcome: &Outcome) -> &'static str {
//!     match outcome {
//!         Outcome::Rejected { error: ValidationError::Outlier { .. }, .. } => "spike",
//!         Outcome::Rejected { error: ValidationError::NotMonotonic { .. }, .. } => "counter replay",
//!         Outcome::Rejected { .. } => "bad reading",
//!         Outcome::Accepted { .. } => "accepted",
//!         Outcome::Ignored | Outcome::Malformed => "noise",
//!     }
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Reasons a sample is refused by the pipeline
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    /// Value token is not a non-negative decimal integer
    #[error("Invalid value: not a decimal integer")]
    InvalidValue,

    /// Value outside configured bounds
    #[error("Value {value} outside range [{min}, {max}]")]
    OutOfRange {
        /// The rejected reading
        value: u64,
        /// Inclusive lower bound
        min: u64,
        /// Inclusive upper bound
        max: u64,
    },

    /// Cumulative counter did not strictly increase
    #[error("Value {value} does not exceed previous reading {last}")]
    NotMonotonic {
        /// The rejected reading
        value: u64,
        /// Most recently accepted reading
        last: u64,
    },

    /// Relative deviation from the window median above threshold
    #[error("Value {value} deviates {deviation} from median {median} (threshold {threshold})")]
    Outlier {
        /// The rejected reading
        value: u64,
        /// Median of the history window
        median: f64,
        /// Relative deviation `|value - median| / median`
        deviation: f64,
        /// Configured maximum relative deviation
        threshold: f64,
    },
}

impl ValidationError {
    /// Short, stable name for logs and statistics
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidValue => "invalid",
            Self::OutOfRange { .. } => "out_of_range",
            Self::NotMonotonic { .. } => "not_monotonic",
            Self::Outlier { .. } => "outlier",
        }
    }
}

/// Invalid pipeline configuration
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// History capacity outside `1..=max`
    #[error("History capacity {requested} outside [1, {max}]")]
    HistoryCapacity {
        /// Requested capacity
        requested: usize,
        /// Storage reserved per channel
        max: usize,
    },

    /// Outlier threshold must be finite and strictly positive
    #[error("Outlier threshold {0} must be finite and positive")]
    OutlierThreshold(f64),

    /// Range bounds are inverted
    #[error("Range minimum {min} exceeds maximum {max}")]
    EmptyRange {
        /// Configured lower bound
        min: u64,
        /// Configured upper bound
        max: u64,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ValidationError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidValue =>
                defmt::write!(fmt, "Invalid value"),
            Self::OutOfRange { value, min, max } =>
                defmt::write!(fmt, "Value {} outside [{}, {}]", value, min, max),
            Self::NotMonotonic { value, last } =>
                defmt::write!(fmt, "Value {} not above {}", value, last),
            Self::Outlier { value, median, deviation, .. } =>
                defmt::write!(fmt, "Value {} deviates {} from {}", value, deviation, median),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_are_distinct() {
        let kinds = [
            ValidationError::InvalidValue.kind(),
            ValidationError::OutOfRange { value: 0, min: 1, max: 9000 }.kind(),
            ValidationError::NotMonotonic { value: 50, last: 100 }.kind(),
            ValidationError::Outlier { value: 500, median: 100.0, deviation: 4.0, threshold: 0.3 }.kind(),
        ];

        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
