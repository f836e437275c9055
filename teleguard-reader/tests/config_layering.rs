//! Defaults, TOML file and command line precedence

use std::io::Write;

use clap::Parser;
use teleguard_core::Channel;
use teleguard_reader::{Args, Settings};

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_file_overrides_defaults() {
    let file = config_file(
        r#"
        stats_interval_secs = 60

        [serial]
        device = "/dev/ttyAMA0"

        [mqtt]
        host = "broker.local"
        port = 1883

        [pipeline]
        outlier_threshold = 0.5
        intervals = { injection = 60 }
        "#,
    );

    let settings = Settings::load(Some(file.path())).unwrap();

    assert_eq!(settings.serial.device, "/dev/ttyAMA0");
    assert_eq!(settings.serial.baud_rate, 9600);
    assert_eq!(settings.mqtt.host, "broker.local");
    assert_eq!(settings.mqtt.port, 1883);
    assert_eq!(settings.mqtt.client_id, "TeleinfoPublisher");
    assert_eq!(settings.stats_interval_secs, 60);

    let pipeline = settings.pipeline_config().unwrap();
    assert_eq!(pipeline.outlier_threshold, 0.5);
    assert_eq!(pipeline.interval_for(Channel::TotalInjection), 60_000);
    assert_eq!(pipeline.interval_for(Channel::TotalEnergy), 10_000);
}

#[test]
fn test_command_line_overrides_file() {
    let file = config_file(
        r#"
        [mqtt]
        host = "broker.local"
        port = 1883
        topic_prefix = "house"
        "#,
    );
    let path = file.path().to_str().unwrap();

    let args = Args::parse_from(["teleguard", "--config", path, "--port", "8883", "--dry-run"]);
    let settings = args.settings().unwrap();

    assert_eq!(settings.mqtt.host, "broker.local");
    assert_eq!(settings.mqtt.port, 8883);
    assert_eq!(settings.mqtt.topic_prefix, "house");
    assert!(settings.mqtt.dry_run);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Settings::load(Some(dir.path().join("teleguard.toml").as_path()));

    assert!(result.is_err());
}

#[test]
fn test_invalid_value_is_an_error() {
    let file = config_file("[mqtt]\nport = \"not a port\"\n");

    assert!(Settings::load(Some(file.path())).is_err());
}
