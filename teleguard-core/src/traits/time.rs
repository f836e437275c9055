//! Time Source Abstraction
//!
//! The pipeline takes timestamps as arguments; the reader loop obtains them
//! from a `TimeSource`. Swapping the source is how tests and replays control
//! time deterministically.
//!
//! ## Common Implementations
//!
//! - `SystemTime`: Wall clock time (may jump due to NTP)
//! - `FixedTime`: Controllable time for testing and replay

use crate::time::Timestamp;

/// Source of time for the system
///
/// ## Example Implementation
///
/// ```rust
/// use teleguard_core::traits::TimeSource;
/// use teleguard_core::time::Timestamp;
///
/// struct MeterClock {
///     // ... horodate decoded from the meter's DATE group
///     last_horodate_ms: Timestamp,
/// }
///
/// impl TimeSource for MeterClock {
///     fn now(&self) -> Timestamp {
///         self.last_horodate_ms
///     }
/// }
/// ```
pub trait TimeSource: Send {
    /// Get current timestamp in milliseconds
    ///
    /// The epoch depends on the implementation:
    /// - Wall clock sources: milliseconds since Unix epoch
    /// - Test sources: arbitrary starting point
    fn now(&self) -> Timestamp;
}
