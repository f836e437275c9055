//! Range validator for instantaneous readings
//!
//! Instantaneous power has hard physical bounds: the meter cannot report
//! less than the standby draw nor more than the subscribed power.

use crate::{
    constants::validation::{DEFAULT_RANGE_MIN, DEFAULT_RANGE_MAX},
    errors::{ValidationError, ValidationResult},
    traits::{History, Validator},
};

/// Check that `value` lies in `[min, max]` inclusive
pub fn is_valid_numeric_value(value: u64, min: u64, max: u64) -> bool {
    min <= value && value <= max
}

/// Inclusive bounds check for range-validated channels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeValidator {
    min: u64,
    max: u64,
}

impl Default for RangeValidator {
    fn default() -> Self {
        Self {
            min: DEFAULT_RANGE_MIN,
            max: DEFAULT_RANGE_MAX,
        }
    }
}

impl RangeValidator {
    /// Create validator with custom bounds
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Inclusive lower bound
    pub fn min(&self) -> u64 {
        self.min
    }

    /// Inclusive upper bound
    pub fn max(&self) -> u64 {
        self.max
    }
}

impl Validator for RangeValidator {
    fn validate(&self, value: u64, _history: &History) -> ValidationResult<()> {
        if is_valid_numeric_value(value, self.min, self.max) {
            Ok(())
        } else {
            Err(ValidationError::OutOfRange {
                value,
                min: self.min,
                max: self.max,
            })
        }
    }

    fn name(&self) -> &'static str {
        "range"
    }
}
