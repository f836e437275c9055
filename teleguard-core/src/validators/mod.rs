//! Measurement Validators
//!
//! ## Overview
//!
//! Three independent checks decide whether a sample is trustworthy. Each is
//! available both as a plain predicate and as a [`Validator`] implementation
//! that explains its verdict with a [`ValidationError`].
//!
//! | Check | Predicate | Validator | Applies to |
//! |-------|-----------|-----------|------------|
//! | Range | [`is_valid_numeric_value`] | [`RangeValidator`] | instantaneous channels |
//! | Monotonic | [`is_monotonic_increase`] | [`MonotonicValidator`] | cumulative channels |
//! | Outlier | [`is_outlier`] | [`OutlierValidator`] | every channel |
//!
//! ## Validation Layers
//!
//! ### 1. Mode check
//! Range for instantaneous readings, strict increase for counters. A failure
//! here short-circuits: an out-of-order counter is dropped whatever its
//! magnitude.
//!
//! ### 2. Outlier check
//! Relative deviation from the median of the last accepted values. Engages
//! once three samples are known.
//!
//! ## Usage Example
//!
//! ```rust
//! use teleguard_core::validators::{is_outlier, OutlierValidator};
//! use teleguard_core::{History, Validator};
//!
//! let mut history = History::with_capacity(10);
//! for v in [100, 101, 99] {
//!     history.push(v);
//! }
//!
//! assert!(is_outlier(500, &history, 0.3));
//! assert!(OutlierValidator::default().validate(105, &history).is_ok());
//! ```
//!
//! [`Validator`]: crate::traits::Validator
//! [`ValidationError`]: crate::errors::ValidationError

mod range;
mod monotonic;
mod outlier;
mod utils;

pub use range::{is_valid_numeric_value, RangeValidator};
pub use monotonic::{is_monotonic_increase, MonotonicValidator};
pub use outlier::{is_outlier, OutlierValidator};
pub use utils::relative_deviation;
