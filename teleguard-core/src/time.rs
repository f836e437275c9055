//! Time management for the measurement pipeline
//!
//! Provides clock abstraction so the pipeline never reads a clock itself:
//! - System clock (wall time, used for emission timestamps)
//! - Fixed/stepping clock (deterministic tests and replays)

use core::cell::Cell;

use crate::constants::time::MS_PER_SECOND;

pub use crate::traits::TimeSource;

/// Timestamp in milliseconds since the Unix epoch (or an arbitrary origin for test clocks)
pub type Timestamp = u64;

/// Convert a millisecond timestamp to whole seconds
pub const fn to_unix_seconds(timestamp: Timestamp) -> u64 {
    timestamp / MS_PER_SECOND
}

/// System time source (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone, Default)]
pub struct SystemTime;

#[cfg(feature = "std")]
impl TimeSource for SystemTime {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime as StdSystemTime, UNIX_EPOCH};

        StdSystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

/// Controllable time source for tests and replays
///
/// Reads return the current value and then advance it by `step`, so a
/// replay loop sees time moving forward at a fixed rate per frame.
#[derive(Debug, Clone)]
pub struct FixedTime {
    timestamp: Cell<Timestamp>,
    step: Timestamp,
}

impl FixedTime {
    /// Clock frozen at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self::stepping(timestamp, 0)
    }

    /// Clock starting at `start` and advancing `step` ms after every read
    pub fn stepping(start: Timestamp, step: Timestamp) -> Self {
        Self {
            timestamp: Cell::new(start),
            step,
        }
    }

    /// Jump to `timestamp`
    pub fn set(&self, timestamp: Timestamp) {
        self.timestamp.set(timestamp);
    }

    /// Move forward by `ms`
    pub fn advance(&self, ms: u64) {
        self.timestamp.set(self.timestamp.get() + ms);
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        let current = self.timestamp.get();
        self.timestamp.set(current + self.step);
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_time_advances() {
        let time = FixedTime::new(1000);
        assert_eq!(time.now(), 1000);
        assert_eq!(time.now(), 1000);

        time.advance(500);
        assert_eq!(time.now(), 1500);
    }

    #[test]
    fn stepping_time_moves_on_every_read() {
        let time = FixedTime::stepping(0, 1500);
        assert_eq!(time.now(), 0);
        assert_eq!(time.now(), 1500);
        assert_eq!(time.now(), 3000);
    }

    #[test]
    fn seconds_conversion_truncates() {
        assert_eq!(to_unix_seconds(1_700_000_000_999), 1_700_000_000);
    }

    #[test]
    fn system_time_is_after_2020() {
        assert!(SystemTime.now() > 1_577_836_800_000);
    }
}
