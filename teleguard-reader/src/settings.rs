//! Reader settings
//!
//! Layered, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. TOML file (`--config`)
//! 3. `TELEGUARD__<SECTION>__<KEY>` environment variables
//! 4. command-line flags
//!
//! ```toml
//! [serial]
//! device = "/dev/ttyUSB0"
//!
//! [mqtt]
//! host = "broker.local"
//! port = 1883
//!
//! [pipeline]
//! min_interval_secs = 10
//! intervals = { totalenergy = 60, injection = 60 }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use teleguard_connectors::{MqttConfig, SerialConfig};
use teleguard_core::{constants, Channel, PipelineConfig};

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "TELEGUARD";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub serial: SerialSettings,
    pub mqtt: MqttSettings,
    pub pipeline: PipelineSettings,
    pub logging: LoggingSettings,
    pub replay: ReplaySettings,
    /// Seconds between statistics log lines, 0 disables them
    pub stats_interval_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            serial: SerialSettings::default(),
            mqtt: MqttSettings::default(),
            pipeline: PipelineSettings::default(),
            logging: LoggingSettings::default(),
            replay: ReplaySettings::default(),
            stats_interval_secs: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SerialSettings {
    pub device: String,
    pub baud_rate: u32,
    pub timeout_ms: u64,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            device: "/dev/ttyUSB0".into(),
            baud_rate: 9600,
            timeout_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MqttSettings {
    pub host: String,
    pub port: u16,
    pub client_id: String,
    pub keep_alive_secs: u64,
    pub topic_prefix: String,
    /// Log messages instead of publishing them
    pub dry_run: bool,
}

impl Default for MqttSettings {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 1666,
            client_id: "TeleinfoPublisher".into(),
            keep_alive_secs: 60,
            topic_prefix: "teleinfo".into(),
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    pub history_capacity: usize,
    pub outlier_threshold: f64,
    pub range_min: u64,
    pub range_max: u64,
    pub min_interval_secs: u64,
    /// Per-channel minimum interval, keyed by topic (`power`, `totalenergy`, `injection`)
    pub intervals: BTreeMap<String, u64>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            history_capacity: constants::buffers::DEFAULT_HISTORY_CAPACITY,
            outlier_threshold: constants::validation::DEFAULT_OUTLIER_THRESHOLD,
            range_min: constants::validation::DEFAULT_RANGE_MIN,
            range_max: constants::validation::DEFAULT_RANGE_MAX,
            min_interval_secs: constants::time::DEFAULT_MIN_EMISSION_INTERVAL_MS
                / constants::time::MS_PER_SECOND,
            intervals: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub file_prefix: String,
    /// Rotated files kept on disk
    pub max_files: usize,
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            file_prefix: "teleinfo".into(),
            max_files: 7,
            level: "info".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReplaySettings {
    /// Capture file read instead of the serial port
    pub file: Option<PathBuf>,
    /// Simulated time between replayed lines
    pub line_interval_ms: u64,
}

impl Default for ReplaySettings {
    fn default() -> Self {
        Self {
            file: None,
            line_interval_ms: 100,
        }
    }
}

impl Settings {
    /// Load defaults, then the optional TOML file, then the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                bail!("config file {} does not exist", path.display());
            }
            builder = builder.add_source(File::from(path));
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Validation and emission rules for the core pipeline
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let pipeline = &self.pipeline;
        let mut config = PipelineConfig::default()
            .with_history_capacity(pipeline.history_capacity)
            .with_outlier_threshold(pipeline.outlier_threshold)
            .with_range(pipeline.range_min, pipeline.range_max)
            .with_min_interval(secs_to_ms(pipeline.min_interval_secs));

        for (topic, secs) in &pipeline.intervals {
            let Some(channel) = Channel::from_topic(topic) else {
                bail!(
                    "unknown channel '{}' in pipeline.intervals (expected one of: {})",
                    topic,
                    Channel::ALL.map(|c| c.topic()).join(", ")
                );
            };
            config = config.with_interval(channel, secs_to_ms(*secs));
        }

        config.validate().context("invalid pipeline settings")?;
        Ok(config)
    }

    pub fn serial_config(&self) -> SerialConfig {
        SerialConfig::new(&self.serial.device)
            .baud_rate(self.serial.baud_rate)
            .timeout_ms(self.serial.timeout_ms)
    }

    pub fn mqtt_config(&self) -> MqttConfig {
        MqttConfig::new(&self.mqtt.host, self.mqtt.port)
            .client_id(&self.mqtt.client_id)
            .keep_alive_secs(self.mqtt.keep_alive_secs)
            .topic_prefix(&self.mqtt.topic_prefix)
    }

    pub fn stats_interval(&self) -> Duration {
        Duration::from_secs(self.stats_interval_secs)
    }
}

fn secs_to_ms(secs: u64) -> u64 {
    secs.saturating_mul(constants::time::MS_PER_SECOND)
}
