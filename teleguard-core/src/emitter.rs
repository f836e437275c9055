//! Rate-Limited Emission
//!
//! ## Overview
//!
//! A meter repeats every group about every second and a half; the broker only
//! needs one value per channel per interval. The emitter decides, for each
//! accepted sample, whether it is announced or silently kept in history.
//!
//! ```text
//! accepted samples:  ●  ●  ●  ●  ●  ●  ●  ●  ●
//! time (s):          0  2  4  6  8 10 12 14 16
//! emitted:           ●                 ●
//!                    └─ first ever     └─ 10s since last emission
//! ```
//!
//! ## State
//!
//! Each channel owns one [`EmissionState`]: the timestamp of its last
//! emission. It changes only when an emission is produced, never on
//! suppression, and never moves backwards. A wall clock stepping back
//! (NTP correction) reads as zero elapsed time, so the channel stays quiet
//! until the clock catches up with the last emission.

use crate::{
    channel::Channel,
    config::PipelineConfig,
    time::{to_unix_seconds, Timestamp},
};

/// Last emission time of one channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmissionState {
    last_emitted: Option<Timestamp>,
}

impl EmissionState {
    /// Timestamp of the last emission, if any happened
    pub fn last_emitted(&self) -> Option<Timestamp> {
        self.last_emitted
    }

    /// Whether an emission at `now` respects `min_interval_ms`
    pub fn is_due(&self, now: Timestamp, min_interval_ms: u64) -> bool {
        match self.last_emitted {
            Some(last) => now.saturating_sub(last) >= min_interval_ms,
            None => true,
        }
    }

    fn record(&mut self, now: Timestamp) {
        let last = self.last_emitted.unwrap_or(now);
        self.last_emitted = Some(last.max(now));
    }
}

/// One value cleared for delivery to the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emission {
    /// Channel the value belongs to
    pub channel: Channel,
    /// Accepted reading
    pub value: u64,
    /// Emission time (ms)
    pub timestamp: Timestamp,
}

impl Emission {
    /// Topic suffix for this emission
    pub fn topic(&self) -> &'static str {
        self.channel.topic()
    }

    /// Wire payload: value and whole-second timestamp
    pub fn payload(&self) -> Payload {
        Payload {
            value: self.value,
            timestamp: to_unix_seconds(self.timestamp),
        }
    }
}

/// Message body delivered to the sink
///
/// Serializes as `{"value": 342, "timestamp": 1700000000}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Payload {
    /// Accepted reading
    pub value: u64,
    /// Unix seconds
    pub timestamp: u64,
}

/// Per-channel minimum interval gate
#[derive(Debug, Clone)]
pub struct RateLimitedEmitter {
    intervals: [u64; Channel::ALL.len()],
}

impl RateLimitedEmitter {
    /// Build from the per-channel intervals of `config`
    pub fn new(config: &PipelineConfig) -> Self {
        let mut intervals = [0; Channel::ALL.len()];
        for channel in Channel::ALL {
            intervals[channel as usize] = config.interval_for(channel);
        }
        Self { intervals }
    }

    /// Minimum interval applied to `channel` (ms)
    pub fn interval(&self, channel: Channel) -> u64 {
        self.intervals[channel as usize]
    }

    /// Offer an accepted value for emission
    ///
    /// Returns the emission and records `now` in `state` when the channel's
    /// interval has elapsed; returns `None` and leaves `state` untouched
    /// otherwise.
    pub fn offer(
        &self,
        channel: Channel,
        value: u64,
        now: Timestamp,
        state: &mut EmissionState,
    ) -> Option<Emission> {
        if !state.is_due(now, self.interval(channel)) {
            return None;
        }

        state.record(now);
        Some(Emission {
            channel,
            value,
            timestamp: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emitter() -> RateLimitedEmitter {
        RateLimitedEmitter::new(&PipelineConfig::default().with_min_interval(10))
    }

    #[test]
    fn first_offer_always_emits() {
        let mut state = EmissionState::default();
        let emission = emitter().offer(Channel::InstantaneousPower, 342, 0, &mut state);

        assert_eq!(
            emission,
            Some(Emission { channel: Channel::InstantaneousPower, value: 342, timestamp: 0 })
        );
        assert_eq!(state.last_emitted(), Some(0));
    }

    #[test]
    fn suppresses_within_interval() {
        let emitter = emitter();
        let mut state = EmissionState::default();

        assert!(emitter.offer(Channel::InstantaneousPower, 342, 0, &mut state).is_some());
        assert!(emitter.offer(Channel::InstantaneousPower, 350, 5, &mut state).is_none());
        assert_eq!(state.last_emitted(), Some(0));

        // Boundary is inclusive
        assert!(emitter.offer(Channel::InstantaneousPower, 360, 10, &mut state).is_some());
        assert_eq!(state.last_emitted(), Some(10));
    }

    #[test]
    fn clock_going_backwards_never_rewinds_state() {
        let emitter = emitter();
        let mut state = EmissionState::default();

        emitter.offer(Channel::TotalEnergy, 1, 100, &mut state);
        assert!(emitter.offer(Channel::TotalEnergy, 2, 50, &mut state).is_none());
        assert!(emitter.offer(Channel::TotalEnergy, 3, 105, &mut state).is_none());
        assert!(emitter.offer(Channel::TotalEnergy, 4, 110, &mut state).is_some());
        assert_eq!(state.last_emitted(), Some(110));
    }

    #[test]
    fn per_channel_intervals() {
        let config = PipelineConfig::default()
            .with_min_interval(10)
            .with_interval(Channel::TotalInjection, 60);
        let emitter = RateLimitedEmitter::new(&config);

        assert_eq!(emitter.interval(Channel::InstantaneousPower), 10);
        assert_eq!(emitter.interval(Channel::TotalInjection), 60);
    }

    #[test]
    fn payload_uses_unix_seconds() {
        let emission = Emission {
            channel: Channel::TotalEnergy,
            value: 123,
            timestamp: 1_700_000_000_500,
        };

        assert_eq!(emission.topic(), "totalenergy");
        assert_eq!(emission.payload(), Payload { value: 123, timestamp: 1_700_000_000 });
    }
}
