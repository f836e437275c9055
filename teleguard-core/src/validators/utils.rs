//! Common Validation Utilities
//!
//! Pure arithmetic shared by the validators. No allocation, no panics:
//! degenerate inputs (empty history, zero median) have explicit answers.

use crate::traits::History;

/// Relative deviation of `value` from `median`
///
/// `|value - median| / median`, with a defined answer for a zero median:
/// zero deviates by nothing, anything else deviates infinitely. A counter
/// that sat at zero and suddenly reports a value is exactly the jump the
/// outlier check exists to catch.
pub fn relative_deviation(value: u64, median: f64) -> f64 {
    let delta = libm::fabs(value as f64 - median);

    if median == 0.0 {
        return if delta == 0.0 { 0.0 } else { f64::INFINITY };
    }

    delta / median
}

/// Get the last accepted value from history
pub fn last_value(history: &History) -> Option<u64> {
    history.last()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deviation_from_median() {
        assert_eq!(relative_deviation(500, 100.0), 4.0);
        assert_eq!(relative_deviation(70, 100.0), 0.3);
        assert_eq!(relative_deviation(100, 100.0), 0.0);
    }

    #[test]
    fn zero_median_never_divides() {
        assert_eq!(relative_deviation(0, 0.0), 0.0);
        assert!(relative_deviation(1, 0.0).is_infinite());
    }
}
