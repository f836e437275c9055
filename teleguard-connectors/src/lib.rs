//! Line Sources and Emission Sinks
//!
//! ## Overview
//!
//! Everything in TeleGuard that touches the outside world lives here. The
//! core pipeline only sees raw lines coming in and [`Emission`]s going out;
//! this crate provides both ends.
//!
//! ### Sources
//!
//! | Source | Module | Ends |
//! |--------|--------|------|
//! | Serial meter port (9600 7E1) | [`serial`] | never |
//! | Capture file (replay) | [`lines`] | at end of file |
//!
//! Both are a [`LineReader`] implementing the core `Stream` contract: a read
//! timeout is `WouldBlock`, bytes received before it are kept for the next
//! poll.
//!
//! ### Sinks
//!
//! | Sink | Module | Delivers to |
//! |------|--------|-------------|
//! | [`MqttSink`] | [`mqtt`] | broker, QoS 0, background network thread |
//! | [`DryRunSink`] | [`dry_run`] | log only |
//! | [`MemorySink`] | [`memory`] | in-process list (tests, replay checks) |
//!
//! ## Wire Format
//!
//! Every sink publishes the same message for an emission:
//!
//! ```text
//! topic:   {prefix}/{channel topic}        teleinfo/power
//! message: {"value":<u64>,"timestamp":<s>} {"value":342,"timestamp":1700000000}
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use teleguard_connectors::{MemorySink, Sink};
//! use teleguard_core::{Channel, Emission};
//!
//! let mut sink = MemorySink::new("teleinfo");
//! let emission = Emission { channel: Channel::InstantaneousPower, value: 342, timestamp: 1_700_000_000_000 };
//!
//! sink.publish(&emission)?;
//! assert_eq!(sink.messages()[0].topic, "teleinfo/power");
//! # Ok::<(), teleguard_connectors::ConnectorError>(())
//! ```

pub mod dry_run;
pub mod lines;
pub mod memory;

#[cfg(feature = "mqtt")]
pub mod mqtt;

#[cfg(feature = "serial")]
pub mod serial;

// Re-export common types
pub use dry_run::DryRunSink;
pub use lines::LineReader;
pub use memory::{MemorySink, PublishedMessage};

#[cfg(feature = "mqtt")]
pub use mqtt::{MqttConfig, MqttSink};

#[cfg(feature = "serial")]
pub use serial::{SerialConfig, SerialSource};

use teleguard_core::Emission;
use thiserror::Error;

/// Common connector errors
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[cfg(feature = "serial")]
    #[error("Failed to open serial port {path}: {source}")]
    SerialOpen {
        path: String,
        #[source]
        source: serialport::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "mqtt")]
    #[error("MQTT client error: {0}")]
    Mqtt(#[from] rumqttc::ClientError),

    #[error("Not connected to MQTT broker")]
    NotConnected,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Destination of emissions
pub trait Sink {
    /// Deliver one emission
    ///
    /// Failures are reported, never retried: the next emission of the
    /// channel supersedes this one.
    fn publish(&mut self, emission: &Emission) -> Result<(), ConnectorError>;

    /// Check if connected
    fn is_connected(&self) -> bool;

    /// Get connection statistics
    fn stats(&self) -> ConnectionStats;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn publish(&mut self, emission: &Emission) -> Result<(), ConnectorError> {
        (**self).publish(emission)
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn stats(&self) -> ConnectionStats {
        (**self).stats()
    }
}

/// Connection statistics common to all sinks
#[derive(Debug, Default, Clone)]
pub struct ConnectionStats {
    /// Total messages sent successfully
    pub messages_sent: u64,
    /// Total messages failed to send
    pub messages_failed: u64,
    /// Total bytes sent
    pub bytes_sent: u64,
    /// Number of reconnections
    pub reconnections: u32,
    /// Last error message
    pub last_error: Option<String>,
}

impl ConnectionStats {
    pub(crate) fn record_sent(&mut self, bytes: usize) {
        self.messages_sent += 1;
        self.bytes_sent += bytes as u64;
    }

    pub(crate) fn record_failure(&mut self, error: &ConnectorError) {
        self.messages_failed += 1;
        self.last_error = Some(error.to_string());
    }
}

/// Full topic for `emission` under `prefix`
pub fn topic_for(prefix: &str, emission: &Emission) -> String {
    format!("{}/{}", prefix, emission.topic())
}

/// JSON message body for `emission`
pub fn encode_message(emission: &Emission) -> Result<String, ConnectorError> {
    Ok(serde_json::to_string(&emission.payload())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use teleguard_core::Channel;

    #[test]
    fn test_topic_and_message() {
        let emission = Emission {
            channel: Channel::TotalInjection,
            value: 23_456,
            timestamp: 1_700_000_000_999,
        };

        assert_eq!(topic_for("teleinfo", &emission), "teleinfo/injection");
        assert_eq!(
            encode_message(&emission).unwrap(),
            r#"{"value":23456,"timestamp":1700000000}"#
        );
    }

    #[test]
    fn test_stats_record_failure() {
        let mut stats = ConnectionStats::default();
        stats.record_sent(10);
        stats.record_failure(&ConnectorError::Config("bad".into()));

        assert_eq!(stats.messages_sent, 1);
        assert_eq!(stats.bytes_sent, 10);
        assert_eq!(stats.messages_failed, 1);
        assert_eq!(stats.last_error.as_deref(), Some("Configuration error: bad"));
    }
}
