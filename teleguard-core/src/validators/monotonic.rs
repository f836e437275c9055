//! Monotonic validator for cumulative counters
//!
//! Energy indexes only grow. A reading equal to or below the last accepted
//! one is a replayed or corrupted frame, never real consumption.

use crate::{
    errors::{ValidationError, ValidationResult},
    traits::{History, Validator},
};

use super::utils;

/// Check that `value` strictly exceeds the last accepted value
///
/// Any value passes against an empty history.
pub fn is_monotonic_increase(value: u64, history: &History) -> bool {
    match utils::last_value(history) {
        Some(last) => value > last,
        None => true,
    }
}

/// Strict-increase check for cumulative channels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonotonicValidator;

impl Validator for MonotonicValidator {
    fn validate(&self, value: u64, history: &History) -> ValidationResult<()> {
        match utils::last_value(history) {
            Some(last) if value <= last => Err(ValidationError::NotMonotonic { value, last }),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "monotonic"
    }
}
