//! Memory-based streams for testing and replay
//!
//! Feeds a fixed sequence of raw lines through the same [`Stream`] contract
//! a serial port follows. An empty entry stands for a read that timed out
//! without a complete line, exactly what a serial `readline` returns.

use super::{Stream, StreamError};

/// Memory-based line stream
///
/// ## Example
///
/// ```rust
/// use teleguard_core::stream::{MemoryStream, Stream};
///
/// let lines: [&[u8]; 3] = [b"SINSTS 00342", b"", b"EAST 000001234"];
///
/// let mut stream = MemoryStream::new(&lines);
/// assert_eq!(stream.poll_next(), Ok(&b"SINSTS 00342"[..]));
/// assert_eq!(stream.poll_next(), Err(nb::Error::WouldBlock));
/// assert_eq!(stream.poll_next(), Ok(&b"EAST 000001234"[..]));
/// ```
pub struct MemoryStream<'a> {
    /// Lines to stream
    lines: &'a [&'a [u8]],
    /// Current position
    position: usize,
}

impl<'a> MemoryStream<'a> {
    /// Create new memory stream from a slice of raw lines
    pub fn new(lines: &'a [&'a [u8]]) -> Self {
        Self {
            lines,
            position: 0,
        }
    }

    /// Reset to beginning
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Get current position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Check if stream is exhausted
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.lines.len()
    }
}

impl<'a> Stream for MemoryStream<'a> {
    type Item = &'a [u8];
    type Error = StreamError<()>;

    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error> {
        if self.position >= self.lines.len() {
            return Err(nb::Error::Other(StreamError::EndOfStream));
        }

        let line = self.lines[self.position];
        self.position += 1;

        if line.is_empty() {
            return Err(nb::Error::WouldBlock);
        }
        Ok(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.lines.len() - self.position;
        (0, Some(remaining))
    }
}
