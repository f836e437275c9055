//! In-memory sink for tests and replay verification

use teleguard_core::Emission;

use crate::{encode_message, topic_for, ConnectionStats, ConnectorError, Sink};

/// One message as it would have gone on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub topic: String,
    pub message: String,
}

/// Sink that records every published message
#[derive(Debug, Default)]
pub struct MemorySink {
    prefix: String,
    messages: Vec<PublishedMessage>,
    stats: ConnectionStats,
    fail_next: usize,
}

impl MemorySink {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// Make the next `count` publishes fail
    pub fn fail_next(&mut self, count: usize) {
        self.fail_next = count;
    }

    /// Messages published so far, oldest first
    pub fn messages(&self) -> &[PublishedMessage] {
        &self.messages
    }

    /// Topics published so far, oldest first
    pub fn topics(&self) -> Vec<&str> {
        self.messages.iter().map(|m| m.topic.as_str()).collect()
    }
}

impl Sink for MemorySink {
    fn publish(&mut self, emission: &Emission) -> Result<(), ConnectorError> {
        if self.fail_next > 0 {
            self.fail_next -= 1;
            let error = ConnectorError::Io(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "memory sink set to fail",
            ));
            self.stats.record_failure(&error);
            return Err(error);
        }

        let message = PublishedMessage {
            topic: topic_for(&self.prefix, emission),
            message: encode_message(emission)?,
        };
        self.stats.record_sent(message.message.len());
        self.messages.push(message);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.fail_next == 0
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
    fn test_records_in_order() {
        let mut sink = MemorySink::new("home/meter");
        sink.publish(&Emission { channel: Channel::InstantaneousPower, value: 1, timestamp: 0 })
            .unwrap();
        sink.publish(&Emission { channel: Channel::TotalEnergy, value: 2, timestamp: 2_000 })
            .unwrap();

        assert_eq!(sink.topics(), vec!["home/meter/power", "home/meter/totalenergy"]);
        assert_eq!(sink.messages()[1].message, r#"{"value":2,"timestamp":2}"#);
    }

    #[test]
    fn test_failures_are_counted_and_not_recorded() {
        let mut sink = MemorySink::new("teleinfo");
        sink.fail_next(1);
        let emission = Emission { channel: Channel::InstantaneousPower, value: 1, timestamp: 0 };

        assert!(sink.publish(&emission).is_err());
        assert!(sink.publish(&emission).is_ok());

        let stats = sink.stats();
        assert_eq!(stats.messages_failed, 1);
        assert_eq!(stats.messages_sent, 1);
        assert_eq!(sink.messages().len(), 1);
    }
}
