//! Logging-only sink
//!
//! Encodes every emission exactly like the MQTT sink and logs it instead of
//! sending it. Used with `--dry-run` to check a meter installation without a
//! broker.

use log::info;
use teleguard_core::Emission;

use crate::{encode_message, topic_for, ConnectionStats, ConnectorError, Sink};

/// Sink that logs what it would publish
#[derive(Debug)]
pub struct DryRunSink {
    prefix: String,
    stats: ConnectionStats,
}

impl DryRunSink {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            stats: ConnectionStats::default(),
        }
    }
}

impl Sink for DryRunSink {
    fn publish(&mut self, emission: &Emission) -> Result<(), ConnectorError> {
        let topic = topic_for(&self.prefix, emission);
        let message = encode_message(emission)?;

        info!("[DRY RUN] Would publish to {}: {}", topic, message);
        self.stats.record_sent(message.len());
        Ok(())
    }

    fn is_connected(&self) -> bool {
        true
    }

    fn stats(&self) -> ConnectionStats {
        self.stats.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teleguard_core::Channel;

    #[test]
    fn test_dry_run_counts_without_sending() {
        let mut sink = DryRunSink::new("teleinfo");
        let emission = Emission { channel: Channel::TotalEnergy, value: 123, timestamp: 0 };

        sink.publish(&emission).unwrap();
        sink.publish(&emission).unwrap();

        let stats = sink.stats();
        assert_eq!(stats.messages_sent, 2);
        assert_eq!(stats.messages_failed, 0);
        assert!(sink.is_connected());
    }
}
