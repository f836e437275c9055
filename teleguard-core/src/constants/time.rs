//! Time-Related Constants

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

// ===== EMISSION =====

/// Default minimum interval between two emissions on the same channel (milliseconds).
///
/// Teleinfo meters in standard mode send a full frame group roughly every
/// 1.5 seconds; forwarding one value per channel every 10 seconds keeps the
/// broker quiet without losing the trend.
pub const DEFAULT_MIN_EMISSION_INTERVAL_MS: u64 = 10 * MS_PER_SECOND;
