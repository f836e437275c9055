//! Pipeline statistics
//!
//! Plain counters updated on every processed line. The reader logs a
//! summary periodically; nothing in the pipeline reads them back.

use crate::errors::ValidationError;

/// Counters for every outcome the pipeline produces
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PipelineStats {
    /// Raw lines handed to the pipeline
    pub lines_seen: u64,
    /// Lines that did not decode or split into a frame
    pub malformed: u64,
    /// Frames with a label outside the channel set
    pub ignored: u64,
    /// Value tokens that were not decimal integers
    pub invalid: u64,
    /// Range check failures
    pub out_of_range: u64,
    /// Monotonic check failures
    pub not_monotonic: u64,
    /// Outlier check failures
    pub outliers: u64,
    /// Samples appended to history
    pub accepted: u64,
    /// Accepted samples forwarded to the sink
    pub emitted: u64,
    /// Accepted samples held back by the rate limit
    pub suppressed: u64,
}

impl PipelineStats {
    /// Total samples rejected by any validator
    pub fn rejected(&self) -> u64 {
        self.invalid + self.out_of_range + self.not_monotonic + self.outliers
    }

    pub(crate) fn record_rejection(&mut self, error: &ValidationError) {
        match error {
            ValidationError::InvalidValue => self.invalid += 1,
            ValidationError::OutOfRange { .. } => self.out_of_range += 1,
            ValidationError::NotMonotonic { .. } => self.not_monotonic += 1,
            ValidationError::Outlier { .. } => self.outliers += 1,
        }
    }
}
