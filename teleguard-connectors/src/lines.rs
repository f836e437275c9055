//! Newline-delimited line source
//!
//! Wraps any [`BufRead`] (a serial port, a capture file) into the core
//! [`Stream`] contract.
//!
//! ## Partial Lines
//!
//! A serial read can time out halfway through a group. The bytes already
//! received stay in the reader's pending buffer and the next poll continues
//! from there, so a timeout never splits a line in two:
//!
//! ```text
//! poll 1: "EAST\t0001" ── timeout ──▶ WouldBlock   pending = "EAST\t0001"
//! poll 2: "23456\t*\n"             ──▶ Ok("EAST\t000123456\t*\n")
//! ```
//!
//! ## End of Input
//!
//! A zero-byte read means the source is closed. A final line without a
//! terminator is still delivered; the poll after it reports `EndOfStream`.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};
use teleguard_core::{constants::buffers::MAX_FRAME_LEN, stream::StreamError, Stream};

use crate::ConnectorError;

/// Longest run of bytes kept without a newline before it is discarded
pub const MAX_PENDING_LEN: usize = MAX_FRAME_LEN * 4;

/// Line stream over a buffered reader
pub struct LineReader<R> {
    reader: R,
    pending: Vec<u8>,
    finished: bool,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Vec::with_capacity(MAX_FRAME_LEN),
            finished: false,
        }
    }

    /// Bytes received since the last complete line
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn take_line(&mut self) -> Vec<u8> {
        std::mem::replace(&mut self.pending, Vec::with_capacity(MAX_FRAME_LEN))
    }
}

impl LineReader<BufReader<File>> {
    /// Open a capture file for replay
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConnectorError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        debug!("Replaying frames from {}", path.display());
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Stream for LineReader<R> {
    type Item = Vec<u8>;
    type Error = StreamError<io::Error>;

    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error> {
        if self.finished {
            return Err(nb::Error::Other(StreamError::EndOfStream));
        }

        match self.reader.read_until(b'\n', &mut self.pending) {
            Ok(0) => {
                self.finished = true;
                if self.pending.is_empty() {
                    Err(nb::Error::Other(StreamError::EndOfStream))
                } else {
                    Ok(self.take_line())
                }
            }
            Ok(_) if self.pending.ends_with(b"\n") => Ok(self.take_line()),
            Ok(_) | Err(_) if self.pending.len() > MAX_PENDING_LEN => {
                warn!("Discarding {} bytes without line terminator", self.pending.len());
                self.pending.clear();
                Err(nb::Error::Other(StreamError::Overflow))
            }
            // read_until stops short of the delimiter only at end of input
            Ok(_) => {
                self.finished = true;
                Ok(self.take_line())
            }
            Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) => {
                Err(nb::Error::WouldBlock)
            }
            Err(e) => Err(nb::Error::Other(StreamError::Transport(e))),
        }
    }
}
