//! Log output: console plus a daily-rotating file
//!
//! Library crates log through the `log` facade; the subscriber bridges those
//! records so connector and pipeline messages land in the same outputs.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::settings::LoggingSettings;

/// Install the global subscriber
///
/// The returned guard flushes the file writer when dropped and must live
/// until the process exits.
pub fn init(settings: &LoggingSettings) -> Result<WorkerGuard> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(settings.file_prefix.as_str())
        .filename_suffix("log")
        .max_log_files(settings.max_files)
        .build(&settings.directory)
        .with_context(|| {
            format!("failed to open log directory {}", settings.directory.display())
        })?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter(&settings.level)?)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(file_writer),
        )
        .try_init()
        .context("failed to install log subscriber")?;

    Ok(guard)
}

/// `RUST_LOG` if set, the configured level otherwise
fn filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level '{}'", level)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts_directives() {
        assert!(EnvFilter::try_new("info").is_ok());
        assert!(EnvFilter::try_new("teleguard=debug,rumqttc=warn").is_ok());
    }

    #[test]
    fn test_unwritable_log_directory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let settings = LoggingSettings {
            directory: file.path().join("logs"),
            ..LoggingSettings::default()
        };

        // A regular file cannot hold a log directory
        assert!(init(&settings).is_err());
    }
}
