//! Outlier validator over the recent history window
//!
//! Catches single-frame spikes that pass the range or monotonic check: a
//! bit flip turning `4521` into `45210` is still a rising counter.

use crate::{
    constants::validation::{DEFAULT_OUTLIER_THRESHOLD, OUTLIER_MIN_SAMPLES},
    errors::{ValidationError, ValidationResult},
    traits::{History, Validator},
};

use super::utils;

/// Check whether `value` deviates from the window median by more than `threshold`
///
/// Always `false` with fewer than three samples of history.
pub fn is_outlier(value: u64, history: &History, threshold: f64) -> bool {
    if history.len() < OUTLIER_MIN_SAMPLES {
        return false;
    }

    match history.median() {
        Some(median) => utils::relative_deviation(value, median) > threshold,
        None => false,
    }
}

/// Median-based spike rejection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierValidator {
    threshold: f64,
}

impl Default for OutlierValidator {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_OUTLIER_THRESHOLD,
        }
    }
}

impl OutlierValidator {
    /// Create validator with a custom relative threshold
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Maximum relative deviation
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Validator for OutlierValidator {
    fn validate(&self, value: u64, history: &History) -> ValidationResult<()> {
        if history.len() < OUTLIER_MIN_SAMPLES {
            return Ok(());
        }

        let Some(median) = history.median() else {
            return Ok(());
        };

        let deviation = utils::relative_deviation(value, median);
        if deviation > self.threshold {
            return Err(ValidationError::Outlier {
                value,
                median,
                deviation,
                threshold: self.threshold,
            });
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "outlier"
    }
}
