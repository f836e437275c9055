//! Core validation engine for TeleGuard
//!
//! Turns raw teleinfo lines from an electricity meter into validated,
//! rate-limited measurements. Independent of any transport: the reader
//! binary feeds it lines and hands the emissions to a sink.
//!
//! Key constraints:
//! - No heap allocation (fixed-capacity history and channel map)
//! - Builds without `std` for microcontroller gateways
//! - One decision reads exactly one channel's state
//!
//! ```no_run
//! use teleguard_core::{MeasurementPipeline, Outcome, PipelineConfig};
//!
//! let mut pipeline = MeasurementPipeline::new(PipelineConfig::default()).unwrap();
//!
//! // Feed one meter line received at t = 0 ms
//! match pipeline.process_line(b"EAST 000012345", 0) {
//!     Outcome::Accepted { emission: Some(emission), .. } => {
//!         // Publish emission.topic() / emission.payload()
//!     }
//!     _ => {} // Suppressed, rejected or not a measurement
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod buffer;
pub mod channel;
pub mod config;
pub mod constants;
pub mod emitter;
pub mod errors;
pub mod frame;
pub mod pipeline;
pub mod stats;
pub mod stream;
pub mod time;
pub mod traits;
pub mod validators;

// Public API
pub use channel::{Channel, ValidationMode};
pub use config::PipelineConfig;
pub use emitter::{Emission, EmissionState, Payload, RateLimitedEmitter};
pub use errors::{ConfigError, ValidationError, ValidationResult};
pub use frame::Frame;
pub use pipeline::{ChannelRules, ChannelState, MeasurementPipeline, Outcome, Sample};
pub use stats::PipelineStats;
pub use traits::{History, Stream, TimeSource, Validator};

#[cfg(feature = "std")]
pub use time::SystemTime;
pub use time::{FixedTime, Timestamp};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
