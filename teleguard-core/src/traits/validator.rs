//! Core validator trait
//!
//! Keep it simple - a validator sees one typed value and the channel's
//! accepted history, nothing else.

use crate::buffer::HistoryBuffer;
use crate::constants::buffers::MAX_HISTORY_SIZE;
use crate::errors::ValidationResult;

/// Per-channel window of accepted values
pub type History = HistoryBuffer<MAX_HISTORY_SIZE>;

/// Core validator trait - one implementation per check
///
/// Validators are pure: the same value and history always yield the same
/// verdict, and validating never mutates the history. Appending accepted
/// values is the pipeline's job.
pub trait Validator {
    /// Check a candidate value against the channel's accepted history
    fn validate(&self, value: u64, history: &History) -> ValidationResult<()>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}
