//! Measurement Pipeline
//!
//! ## Overview
//!
//! The pipeline turns raw lines into accept/reject decisions and, for
//! accepted samples, into rate-limited emissions:
//!
//! ```text
//! line ─▶ decode ─▶ split ─▶ channel? ─▶ typed value ─▶ rules ─▶ history ─▶ emitter
//!           │         │         │             │            │                   │
//!       Malformed Malformed  Ignored      Rejected     Rejected        Emission / none
//! ```
//!
//! ## Channel Rules
//!
//! | Mode | First check | Then |
//! |------|-------------|------|
//! | Range | value in `[range_min, range_max]` | outlier check |
//! | Monotonic | value > last accepted | outlier check |
//!
//! The first check short-circuits. Only accepted values enter the history.
//!
//! ## State
//!
//! All mutable state lives in one [`ChannelState`] per channel, stored in a
//! fixed-capacity map owned by the pipeline. A decision reads exactly one
//! channel's state; channels never influence each other.
//!
//! ## Example
//!
//! ```rust
//! use teleguard_core::{Channel, MeasurementPipeline, Outcome, PipelineConfig};
//!
//! let mut pipeline = MeasurementPipeline::new(PipelineConfig::default())?;
//!
//! match pipeline.process_line(b"SINSTS 00342", 0) {
//!     Outcome::Accepted { channel, value, emission } => {
//!         assert_eq!(channel, Channel::InstantaneousPower);
//!         assert_eq!(value, 342);
//!         assert!(emission.is_some());
//!     }
//!     other => panic!("unexpected {:?}", other),
//! }
//! # Ok::<(), teleguard_core::ConfigError>(())
//! ```

use heapless::FnvIndexMap;

use crate::{
    channel::{Channel, ValidationMode},
    config::PipelineConfig,
    constants::buffers::CHANNEL_SLOTS,
    emitter::{Emission, EmissionState, RateLimitedEmitter},
    errors::{ConfigError, ValidationError, ValidationResult},
    frame::{decode_line, parse_frame, parse_value, Frame},
    stats::PipelineStats,
    time::Timestamp,
    traits::{History, Validator},
    validators::{MonotonicValidator, OutlierValidator, RangeValidator},
};

// Macros for optional logging
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

const _: () = assert!(CHANNEL_SLOTS >= Channel::ALL.len());

/// One parsed, typed measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    /// Source channel
    pub channel: Channel,
    /// Typed reading
    pub value: u64,
    /// Arrival time (ms)
    pub timestamp: Timestamp,
}

/// Everything the pipeline remembers about one channel
#[derive(Debug, Clone)]
pub struct ChannelState {
    /// Most recently accepted values, oldest first
    pub history: History,
    /// Last emission time
    pub emission: EmissionState,
}

impl ChannelState {
    fn new(history_capacity: usize) -> Self {
        Self {
            history: History::with_capacity(history_capacity),
            emission: EmissionState::default(),
        }
    }
}

/// Result of processing one line, frame or sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Line did not decode or had fewer than two tokens
    Malformed,
    /// Label is not one of the forwarded channels
    Ignored,
    /// Sample refused by a validator; history unchanged
    Rejected {
        /// Channel of the refused sample
        channel: Channel,
        /// First failing check
        error: ValidationError,
    },
    /// Sample appended to history
    Accepted {
        /// Channel of the accepted sample
        channel: Channel,
        /// Value appended to history
        value: u64,
        /// Present when the rate limit allowed forwarding
        emission: Option<Emission>,
    },
}

impl Outcome {
    /// The emission to deliver, if any
    pub fn emission(&self) -> Option<&Emission> {
        match self {
            Outcome::Accepted { emission, .. } => emission.as_ref(),
            _ => None,
        }
    }

    /// Whether the sample entered the history
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted { .. })
    }
}

/// Validators applied to every channel, selected by validation mode
#[derive(Debug, Clone)]
pub struct ChannelRules {
    range: RangeValidator,
    monotonic: MonotonicValidator,
    outlier: OutlierValidator,
}

impl ChannelRules {
    /// Rules built from the bounds and threshold in `config`
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            range: RangeValidator::new(config.range_min, config.range_max),
            monotonic: MonotonicValidator,
            outlier: OutlierValidator::new(config.outlier_threshold),
        }
    }

    /// Decide whether `value` is acceptable for `channel` given its history
    pub fn check(&self, channel: Channel, value: u64, history: &History) -> ValidationResult<()> {
        match channel.mode() {
            ValidationMode::Range => self.range.validate(value, history)?,
            ValidationMode::Monotonic => self.monotonic.validate(value, history)?,
        }

        self.outlier.validate(value, history)
    }

    /// Name of the validator that raises `error`
    ///
    /// `None` for errors raised before any validator runs.
    pub fn rejected_by(&self, error: &ValidationError) -> Option<&'static str> {
        match error {
            ValidationError::OutOfRange { .. } => Some(self.range.name()),
            ValidationError::NotMonotonic { .. } => Some(self.monotonic.name()),
            ValidationError::Outlier { .. } => Some(self.outlier.name()),
            ValidationError::InvalidValue => None,
        }
    }
}

/// Per-channel validation and rate-limited emission
pub struct MeasurementPipeline {
    rules: ChannelRules,
    emitter: RateLimitedEmitter,
    channels: FnvIndexMap<Channel, ChannelState, CHANNEL_SLOTS>,
    stats: PipelineStats,
}

impl MeasurementPipeline {
    /// Build a pipeline with fresh state for every channel
    pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut channels = FnvIndexMap::new();
        for channel in Channel::ALL {
            // Cannot fail: CHANNEL_SLOTS covers every channel
            let _ = channels.insert(channel, ChannelState::new(config.history_capacity));
        }

        Ok(Self {
            rules: ChannelRules::new(&config),
            emitter: RateLimitedEmitter::new(&config),
            channels,
            stats: PipelineStats::default(),
        })
    }

    /// Process one raw line received at `now`
    pub fn process_line(&mut self, bytes: &[u8], now: Timestamp) -> Outcome {
        self.stats.lines_seen += 1;

        let Some(line) = decode_line(bytes) else {
            self.stats.malformed += 1;
            log_trace!("Dropping undecodable line ({} bytes)", bytes.len());
            return Outcome::Malformed;
        };

        let Some(frame) = parse_frame(&line) else {
            self.stats.malformed += 1;
            log_trace!("Dropping line without frame: {:?}", line.as_str());
            return Outcome::Malformed;
        };

        self.process_frame(&frame, now)
    }

    /// Process one split frame received at `now`
    pub fn process_frame(&mut self, frame: &Frame<'_>, now: Timestamp) -> Outcome {
        let Some(channel) = frame.channel() else {
            self.stats.ignored += 1;
            return Outcome::Ignored;
        };

        let Some(value) = parse_value(frame.value) else {
            let error = ValidationError::InvalidValue;
            self.stats.record_rejection(&error);
            log_debug!("{}: rejected token {:?}: {}", channel, frame.value, error);
            return Outcome::Rejected { channel, error };
        };

        self.process_sample(Sample {
            channel,
            value,
            timestamp: now,
        })
    }

    /// Validate a typed sample, update history and offer it for emission
    pub fn process_sample(&mut self, sample: Sample) -> Outcome {
        let Sample { channel, value, timestamp } = sample;

        let Some(state) = self.channels.get_mut(&channel) else {
            self.stats.ignored += 1;
            return Outcome::Ignored;
        };

        if let Err(error) = self.rules.check(channel, value, &state.history) {
            self.stats.record_rejection(&error);
            log_debug!(
                "{}: {} check rejected {}: {}",
                channel,
                self.rules.rejected_by(&error).unwrap_or("value"),
                value,
                error
            );
            return Outcome::Rejected { channel, error };
        }

        state.history.push(value);
        self.stats.accepted += 1;

        let emission = self.emitter.offer(channel, value, timestamp, &mut state.emission);
        if emission.is_some() {
            self.stats.emitted += 1;
        } else {
            self.stats.suppressed += 1;
        }

        Outcome::Accepted { channel, value, emission }
    }

    /// Accepted history of `channel`, oldest first
    pub fn history(&self, channel: Channel) -> Option<&History> {
        self.channels.get(&channel).map(|state| &state.history)
    }

    /// Full state of `channel`
    pub fn channel_state(&self, channel: Channel) -> Option<&ChannelState> {
        self.channels.get(&channel)
    }

    /// Minimum emission interval applied to `channel` (ms)
    pub fn interval(&self, channel: Channel) -> u64 {
        self.emitter.interval(channel)
    }

    /// Counters since creation
    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }
}
