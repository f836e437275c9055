//! Serial meter port
//!
//! The historic and standard teleinfo outputs both run 7 data bits, even
//! parity, 1 stop bit. Standard mode (Linky `SINSTS`/`EAST` groups) runs at
//! 9600 baud, historic mode at 1200.
//!
//! The port is owned by the returned [`SerialSource`] and closed when it is
//! dropped, whatever the exit path.

use std::io::BufReader;
use std::time::Duration;

use log::info;
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};

use crate::{ConnectorError, LineReader};

/// Line stream over an open serial port
pub type SerialSource = LineReader<BufReader<Box<dyn SerialPort>>>;

/// Serial port configuration
#[derive(Debug, Clone)]
pub struct SerialConfig {
    /// Device path
    pub path: String,
    /// Baud rate
    pub baud_rate: u32,
    /// Read timeout
    pub timeout: Duration,
}

impl SerialConfig {
    /// Standard-mode configuration for `path`
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            baud_rate: 9600,
            timeout: Duration::from_millis(1000),
        }
    }

    pub fn baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Set read timeout in milliseconds
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.timeout = Duration::from_millis(ms);
        self
    }

    /// Open the port as a line stream
    pub fn open(&self) -> Result<SerialSource, ConnectorError> {
        if self.baud_rate == 0 {
            return Err(ConnectorError::Config("baud rate must be positive".into()));
        }

        let port = serialport::new(&self.path, self.baud_rate)
            .data_bits(DataBits::Seven)
            .parity(Parity::Even)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(self.timeout)
            .open()
            .map_err(|source| ConnectorError::SerialOpen {
                path: self.path.clone(),
                source,
            })?;

        info!("Opened {} at {} baud (7E1)", self.path, self.baud_rate);
        Ok(LineReader::new(BufReader::new(port)))
    }
}
