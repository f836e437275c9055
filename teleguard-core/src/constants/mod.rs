//! Constants for TeleGuard Core
//!
//! Centralized numeric values used across the measurement pipeline. Every
//! default the configuration layer exposes is defined here once, so the
//! pipeline, the reader and the tests agree on them.
//!
//! ## Organization
//!
//! Constants are grouped by domain:
//! - **Validation**: Range bounds and outlier detection parameters
//! - **Time**: Unit conversions and emission intervals
//! - **Buffers**: Frame and history sizing limits
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Use descriptive names that include units
//! 3. Group related constants together

/// Validation bounds and outlier detection parameters.
pub mod validation;

/// Time unit conversions and emission intervals.
pub mod time;

/// Frame and history buffer sizes.
pub mod buffers;

// Re-export commonly used constants for convenience
pub use validation::{
    DEFAULT_RANGE_MIN, DEFAULT_RANGE_MAX,
    DEFAULT_OUTLIER_THRESHOLD, OUTLIER_MIN_SAMPLES,
};

pub use time::{MS_PER_SECOND, DEFAULT_MIN_EMISSION_INTERVAL_MS};

pub use buffers::{
    DEFAULT_HISTORY_CAPACITY, MAX_HISTORY_SIZE,
    MAX_FRAME_LEN, CHANNEL_SLOTS,
};
