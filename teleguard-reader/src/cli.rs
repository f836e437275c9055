use std::path::PathBuf;

use clap::Parser;

use crate::settings::Settings;

#[derive(Parser, Debug, Default)]
#[command(name = "teleguard")]
#[command(about = "Read teleinfo frames from an electricity meter and publish validated values over MQTT")]
pub struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Serial device of the teleinfo interface
    #[arg(short, long)]
    pub device: Option<String>,

    /// Serial baud rate (9600 standard mode, 1200 historic mode)
    #[arg(long)]
    pub baud_rate: Option<u32>,

    /// MQTT broker host
    #[arg(long)]
    pub host: Option<String>,

    /// MQTT broker port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// MQTT client identifier
    #[arg(long)]
    pub client_id: Option<String>,

    /// Prefix of every published topic
    #[arg(long)]
    pub topic_prefix: Option<String>,

    /// Log messages instead of publishing them
    #[arg(long)]
    pub dry_run: bool,

    /// Minimum seconds between two emissions of the same channel
    #[arg(long)]
    pub min_interval: Option<u64>,

    /// Replay a capture file instead of reading the serial port
    #[arg(short, long, conflicts_with = "device")]
    pub replay: Option<PathBuf>,

    /// Directory of the rotating log files
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (e.g. "info", "teleguard=debug")
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Apply flags given on the command line over `settings`
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(device) = &self.device {
            settings.serial.device = device.clone();
        }
        if let Some(baud_rate) = self.baud_rate {
            settings.serial.baud_rate = baud_rate;
        }
        if let Some(host) = &self.host {
            settings.mqtt.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.mqtt.port = port;
        }
        if let Some(client_id) = &self.client_id {
            settings.mqtt.client_id = client_id.clone();
        }
        if let Some(prefix) = &self.topic_prefix {
            settings.mqtt.topic_prefix = prefix.clone();
        }
        if self.dry_run {
            settings.mqtt.dry_run = true;
        }
        if let Some(secs) = self.min_interval {
            settings.pipeline.min_interval_secs = secs;
        }
        if let Some(replay) = &self.replay {
            settings.replay.file = Some(replay.clone());
        }
        if let Some(dir) = &self.log_dir {
            settings.logging.directory = dir.clone();
        }
        if let Some(level) = &self.log_level {
            settings.logging.level = level.clone();
        }
    }

    /// Load layered settings and apply the command line on top
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;
        self.apply(&mut settings);
        Ok(settings)
    }
}
