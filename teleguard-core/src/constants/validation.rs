//! Validation Constants
//!
//! Bounds and thresholds applied to teleinfo measurements before they are
//! allowed to leave the device.

// ===== RANGE CHECK =====

/// Smallest plausible instantaneous apparent power (VA).
///
/// A meter that reports 0 VA on `SINSTS` is either disconnected or
/// mid-reset; residential consumption never truly reaches zero.
pub const DEFAULT_RANGE_MIN: u64 = 1;

/// Largest plausible instantaneous apparent power (VA).
///
/// Residential subscriptions top out at 36 kVA, but a single-phase 9 kVA
/// contract is the common case and anything above it is treated as noise.
pub const DEFAULT_RANGE_MAX: u64 = 9000;

// ===== OUTLIER DETECTION =====

/// Maximum relative deviation from the window median (30%).
pub const DEFAULT_OUTLIER_THRESHOLD: f64 = 0.3;

/// Minimum history length before outlier detection engages.
///
/// With fewer samples the median is not a meaningful reference.
pub const OUTLIER_MIN_SAMPLES: usize = 3;
