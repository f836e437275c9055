//! Core Traits and Abstractions for TeleGuard
//!
//! The extension points of the core, organized by functional area:
//!
//! - [`validator`] - Sample validation against a channel's history
//! - [`time`] - Time source abstraction
//! - [`stream`] - Pull-based line sources
//!
//! ## Usage Example
//!
//! ```rust
//! use teleguard_core::traits::Validator;
//! use teleguard_core::validators::MonotonicValidator;
//! use teleguard_core::History;
//!
//! let mut history = History::with_capacity(10);
//! history.push(100);
//!
//! let validator = MonotonicValidator;
//! assert!(validator.validate(123, &history).is_ok());
//! assert!(validator.validate(50, &history).is_err());
//! ```

pub mod validator;
pub mod time;
pub mod stream;

pub use validator::{History, Validator};

pub use time::TimeSource;

pub use stream::Stream;
