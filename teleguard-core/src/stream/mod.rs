//! Stream processing for raw frame lines
//!
//! Core stream abstractions shared by every line source:
//! - Core errors (this file)
//! - `memory` - In-memory streams for testing and replay
//!
//! Device and file streams live in `teleguard-connectors`; they implement the
//! same [`Stream`] trait with `StreamError<std::io::Error>`.

use core::fmt;

#[cfg(feature = "stream-memory")]
pub mod memory;

#[cfg(feature = "stream-memory")]
pub use memory::MemoryStream;

/// Conditions a line source reports besides a line
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError<E> {
    /// Device or file failure
    Transport(E),
    /// Capture file fully read (never reported by a serial port)
    EndOfStream,
    /// Bytes without a line terminator exceeded the source's buffer
    Overflow,
}

impl<E: fmt::Display> fmt::Display for StreamError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "line source failed: {}", e),
            Self::EndOfStream => write!(f, "end of input"),
            Self::Overflow => write!(f, "line exceeds source buffer"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug + fmt::Display> std::error::Error for StreamError<E> {}

// Re-export trait for convenience
pub use crate::traits::Stream;
