use anyhow::{Context, Result};
use clap::Parser;
use teleguard_connectors::{DryRunSink, LineReader, MqttSink, Sink};
use teleguard_core::{FixedTime, MeasurementPipeline, SystemTime, TimeSource};
use teleguard_reader::{run, Args, RunOptions, Settings};
use tracing::info;

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = args.settings()?;

    let _log_guard = teleguard_reader::logging::init(&settings.logging)?;
    info!("Starting teleinfo frame reading (v{})", teleguard_core::VERSION);

    let mut pipeline = MeasurementPipeline::new(settings.pipeline_config()?)
        .context("failed to build measurement pipeline")?;
    let mut sink = open_sink(&settings)?;
    let options = RunOptions {
        stats_interval_ms: settings.stats_interval().as_millis() as u64,
    };

    let summary = match &settings.replay.file {
        Some(path) => {
            info!("Replaying {}", path.display());
            let mut source = LineReader::open(path)
                .with_context(|| format!("failed to open capture file {}", path.display()))?;
            let clock = FixedTime::stepping(SystemTime.now(), settings.replay.line_interval_ms);
            run(&mut source, &mut pipeline, &mut sink, &clock, options)?
        }
        None => {
            info!("Connecting to serial port {}...", settings.serial.device);
            let mut source = settings.serial_config().open()?;
            info!("Reading teleinfo frames...");
            run(&mut source, &mut pipeline, &mut sink, &SystemTime, options)?
        }
    };

    info!("Finished: {}", summary);
    Ok(())
}

fn open_sink(settings: &Settings) -> Result<Box<dyn Sink>> {
    if settings.mqtt.dry_run {
        info!("Dry run: messages are logged, not published");
        return Ok(Box::new(DryRunSink::new(&settings.mqtt.topic_prefix)));
    }

    let sink = MqttSink::connect(settings.mqtt_config()).with_context(|| {
        format!(
            "failed to start MQTT client for {}:{}",
            settings.mqtt.host, settings.mqtt.port
        )
    })?;
    Ok(Box::new(sink))
}
