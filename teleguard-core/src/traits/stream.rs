//! Line Source Trait
//!
//! Line sources follow a pull-based model using the `nb` crate, which maps
//! directly onto a serial port with a read timeout:
//!
//! - **Pull-based**: The reader loop decides when to read
//! - **Non-blocking contract**: A timed-out read is `WouldBlock`, not an error
//! - **Memory-efficient**: No hidden allocations in the trait itself
//!
//! ## Polling Until a Timeout
//!
//! ```rust
//! use teleguard_core::traits::Stream;
//!
//! // Count lines available right now
//! fn ready_lines<S: Stream>(source: &mut S) -> Result<usize, S::Error> {
//!     let mut lines = 0;
//!     loop {
//!         match source.poll_next() {
//!             Ok(_) => lines += 1,
//!             Err(nb::Error::WouldBlock) => return Ok(lines),
//!             Err(nb::Error::Other(e)) => return Err(e),
//!         }
//!     }
//! }
//! ```

/// Source of raw meter lines
///
/// `WouldBlock` means no complete line arrived before the read timeout; the
/// caller polls again. `Other(E)` is a real condition of the source, end of
/// input included, and the loop decides whether to stop.
pub trait Stream {
    /// One raw line, terminator included if the source kept it
    type Item;

    type Error;

    /// Pull the next line
    ///
    /// Must return within the source's read timeout. Once a source has
    /// reported end of input it keeps reporting it.
    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error>;

    /// Bounds on the lines left, `(0, None)` for live sources
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }
}
