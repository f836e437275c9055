//! MQTT sink for TeleGuard
//!
//! ## Delivery
//!
//! Publishes at QoS 0 (at most once) without retain. A meter value is
//! superseded by the next emission of the same channel a few seconds later,
//! so nothing is queued for redelivery.
//!
//! ## Threading
//!
//! `publish` only enqueues the request (`try_publish`) and never blocks the
//! reader loop. While the broker is unreachable it fails with
//! [`ConnectorError::NotConnected`] instead of queueing stale values. The network event loop runs on a background thread that:
//!
//! ```text
//! ConnAck ok ──▶ connected = true, log
//! error      ──▶ connected = false, log, sleep reconnect_delay, poll again
//! client gone ─▶ thread exits
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use teleguard_connectors::{MqttConfig, MqttSink, Sink};
//!
//! let config = MqttConfig::new("broker.local", 1883)
//!     .client_id("TeleinfoPublisher")
//!     .topic_prefix("teleinfo");
//!
//! let sink = MqttSink::connect(config)?;
//! println!("connected: {}", sink.is_connected());
//! # Ok::<(), teleguard_connectors::ConnectorError>(())
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};
use rumqttc::{Client, ConnectReturnCode, Connection, ConnectionError, Event, MqttOptions, Packet, QoS};
use teleguard_core::Emission;

use crate::{encode_message, topic_for, ConnectionStats, ConnectorError, Sink};

/// MQTT configuration
#[derive(Debug, Clone)]
pub struct MqttConfig {
    /// Broker host name or address
    pub host: String,
    /// Broker port
    pub port: u16,
    /// Client identifier
    pub client_id: String,
    /// Keep-alive interval
    pub keep_alive: Duration,
    /// Prefix prepended to every channel topic
    pub topic_prefix: String,
    /// Pause before polling again after a connection error
    pub reconnect_delay: Duration,
    /// Requests buffered while the broker is unreachable
    pub queue_capacity: usize,
}

impl MqttConfig {
    /// Create new configuration for a broker
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            client_id: "TeleinfoPublisher".into(),
            keep_alive: Duration::from_secs(60),
            topic_prefix: "teleinfo".into(),
            reconnect_delay: Duration::from_secs(5),
            queue_capacity: 16,
        }
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    /// Set keep-alive in seconds
    pub fn keep_alive_secs(mut self, secs: u64) -> Self {
        self.keep_alive = Duration::from_secs(secs);
        self
    }

    pub fn topic_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.topic_prefix = prefix.into();
        self
    }

    pub fn reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    fn validate(&self) -> Result<(), ConnectorError> {
        if self.host.is_empty() {
            return Err(ConnectorError::Config("broker host is empty".into()));
        }
        if self.client_id.is_empty() {
            return Err(ConnectorError::Config("client id is empty".into()));
        }
        if self.keep_alive < Duration::from_secs(1) {
            return Err(ConnectorError::Config("keep-alive must be at least one second".into()));
        }
        if self.queue_capacity == 0 {
            return Err(ConnectorError::Config("queue capacity must be positive".into()));
        }
        Ok(())
    }

    fn options(&self) -> MqttOptions {
        let mut options = MqttOptions::new(&self.client_id, &self.host, self.port);
        options.set_keep_alive(self.keep_alive);
        options.set_clean_session(true);
        options
    }
}

/// Sink publishing emissions to an MQTT broker
pub struct MqttSink {
    client: Client,
    prefix: String,
    connected: Arc<AtomicBool>,
    stats: Arc<Mutex<ConnectionStats>>,
}

impl MqttSink {
    /// Create the client and start the network thread
    ///
    /// Returns as soon as the thread is running; the broker connection is
    /// established (and re-established) in the background.
    pub fn connect(config: MqttConfig) -> Result<Self, ConnectorError> {
        config.validate()?;

        let (client, connection) = Client::new(config.options(), config.queue_capacity);
        let connected = Arc::new(AtomicBool::new(false));
        let stats = Arc::new(Mutex::new(ConnectionStats::default()));

        let worker = EventLoopWorker {
            broker: format!("{}:{}", config.host, config.port),
            reconnect_delay: config.reconnect_delay,
            connected: Arc::clone(&connected),
            stats: Arc::clone(&stats),
        };
        thread::Builder::new()
            .name("mqtt-eventloop".into())
            .spawn(move || worker.run(connection))?;

        info!("Connecting to MQTT broker {}:{} as {}", config.host, config.port, config.client_id);

        Ok(Self {
            client,
            prefix: config.topic_prefix,
            connected,
            stats,
        })
    }
}

impl Sink for MqttSink {
    fn publish(&mut self, emission: &Emission) -> Result<(), ConnectorError> {
        let topic = topic_for(&self.prefix, emission);

        if !self.is_connected() {
            let error = ConnectorError::NotConnected;
            warn!("Not publishing to {}: {}", topic, error);
            lock(&self.stats).record_failure(&error);
            return Err(error);
        }

        let message = encode_message(emission)?;
        let bytes = message.len();

        match self.client.try_publish(topic.as_str(), QoS::AtMostOnce, false, message.as_bytes()) {
            Ok(()) => {
                info!("Published to {}: {}", topic, message);
                lock(&self.stats).record_sent(bytes);
                Ok(())
            }
            Err(e) => {
                let error = ConnectorError::from(e);
                warn!("Failed to publish to {}: {}", topic, error);
                lock(&self.stats).record_failure(&error);
                Err(error)
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    fn stats(&self) -> ConnectionStats {
        lock(&self.stats).clone()
    }
}

impl Drop for MqttSink {
    fn drop(&mut self) {
        // The request queue may be full while the broker is down
        if let Err(e) = self.client.try_disconnect() {
            debug!("MQTT disconnect failed: {}", e);
        }
    }
}

/// Background driver of the rumqttc connection
struct EventLoopWorker {
    broker: String,
    reconnect_delay: Duration,
    connected: Arc<AtomicBool>,
    stats: Arc<Mutex<ConnectionStats>>,
}

impl EventLoopWorker {
    fn run(self, mut connection: Connection) {
        let mut was_connected = false;

        for notification in connection.iter() {
            match notification {
                Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                    if ack.code != ConnectReturnCode::Success {
                        warn!("Failed to connect to MQTT broker {}: {:?}", self.broker, ack.code);
                        continue;
                    }

                    info!("Connected to MQTT broker {}", self.broker);
                    if was_connected {
                        lock(&self.stats).reconnections += 1;
                    }
                    was_connected = true;
                    self.connected.store(true, Ordering::Relaxed);
                }
                Ok(_) => {}
                Err(ConnectionError::RequestsDone) => break,
                Err(e) => {
                    self.connected.store(false, Ordering::Relaxed);
                    warn!("MQTT connection to {} lost: {}", self.broker, e);
                    lock(&self.stats).last_error = Some(e.to_string());
                    thread::sleep(self.reconnect_delay);
                }
            }
        }

        self.connected.store(false, Ordering::Relaxed);
        debug!("MQTT event loop for {} stopped", self.broker);
    }
}

fn lock(stats: &Mutex<ConnectionStats>) -> MutexGuard<'_, ConnectionStats> {
    stats.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
