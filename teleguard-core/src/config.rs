//! Pipeline configuration
//!
//! Every knob the measurement pipeline exposes, with the defaults from
//! [`crate::constants`]. The configuration is checked once, when the
//! pipeline is built; a pipeline never runs with an invalid one.
//!
//! ```rust
//! use teleguard_core::{Channel, PipelineConfig};
//!
//! let config = PipelineConfig::default()
//!     .with_history_capacity(5)
//!     .with_interval(Channel::InstantaneousPower, 2_000);
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.interval_for(Channel::InstantaneousPower), 2_000);
//! assert_eq!(config.interval_for(Channel::TotalEnergy), 10_000);
//! ```

use crate::{
    channel::Channel,
    constants::{
        buffers::{DEFAULT_HISTORY_CAPACITY, MAX_HISTORY_SIZE},
        time::DEFAULT_MIN_EMISSION_INTERVAL_MS,
        validation::{DEFAULT_OUTLIER_THRESHOLD, DEFAULT_RANGE_MAX, DEFAULT_RANGE_MIN},
    },
    errors::ConfigError,
};

/// Settings for a [`crate::MeasurementPipeline`]
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Accepted samples kept per channel (1..=MAX_HISTORY_SIZE)
    pub history_capacity: usize,
    /// Maximum relative deviation from the window median
    pub outlier_threshold: f64,
    /// Inclusive lower bound for range-validated channels
    pub range_min: u64,
    /// Inclusive upper bound for range-validated channels
    pub range_max: u64,
    /// Minimum emission interval for channels without an override (ms)
    pub min_interval_ms: u64,
    /// Per-channel interval overrides, indexed by channel discriminant
    interval_overrides: [Option<u64>; Channel::ALL.len()],
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            outlier_threshold: DEFAULT_OUTLIER_THRESHOLD,
            range_min: DEFAULT_RANGE_MIN,
            range_max: DEFAULT_RANGE_MAX,
            min_interval_ms: DEFAULT_MIN_EMISSION_INTERVAL_MS,
            interval_overrides: [None; Channel::ALL.len()],
        }
    }
}

impl PipelineConfig {
    /// Set the per-channel history window
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set the maximum relative deviation from the median
    pub fn with_outlier_threshold(mut self, threshold: f64) -> Self {
        self.outlier_threshold = threshold;
        self
    }

    /// Set the inclusive bounds for range-checked channels
    pub fn with_range(mut self, min: u64, max: u64) -> Self {
        self.range_min = min;
        self.range_max = max;
        self
    }

    /// Default minimum interval between emissions (ms)
    pub fn with_min_interval(mut self, interval_ms: u64) -> Self {
        self.min_interval_ms = interval_ms;
        self
    }

    /// Minimum interval between emissions for one channel (ms)
    pub fn with_interval(mut self, channel: Channel, interval_ms: u64) -> Self {
        self.interval_overrides[channel as usize] = Some(interval_ms);
        self
    }

    /// Effective minimum emission interval for `channel` (ms)
    pub fn interval_for(&self, channel: Channel) -> u64 {
        self.interval_overrides[channel as usize].unwrap_or(self.min_interval_ms)
    }

    /// Check the configuration for values the pipeline cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 || self.history_capacity > MAX_HISTORY_SIZE {
            return Err(ConfigError::HistoryCapacity {
                requested: self.history_capacity,
                max: MAX_HISTORY_SIZE,
            });
        }

        if !self.outlier_threshold.is_finite() || self.outlier_threshold <= 0.0 {
            return Err(ConfigError::OutlierThreshold(self.outlier_threshold));
        }

        if self.range_min > self.range_max {
            return Err(ConfigError::EmptyRange {
                min: self.range_min,
                max: self.range_max,
            });
        }

        Ok(())
    }
}
