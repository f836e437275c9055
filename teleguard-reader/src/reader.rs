//! Reader loop
//!
//! Pulls lines from a source, runs them through the pipeline and hands
//! emissions to a sink, one line at a time:
//!
//! ```text
//! source.poll_next ──▶ pipeline.process_line ──▶ sink.publish
//!   WouldBlock: poll again      Rejected: dropped      Err: logged, dropped
//!   EndOfStream: return         Accepted: maybe emit
//! ```
//!
//! A failing sink never stops the loop. A failing source does: the serial
//! port is gone and the process exits for its supervisor to restart it.

use std::fmt;

use anyhow::{anyhow, Result};
use teleguard_connectors::{ConnectionStats, Sink};
use teleguard_core::{
    stream::StreamError, Emission, MeasurementPipeline, PipelineStats, Stream,
    TimeSource, Timestamp,
};
use tracing::{debug, info, warn};

/// Counters reported when the loop ends
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub pipeline: PipelineStats,
    pub sink: ConnectionStats,
    /// Polls that returned no complete line
    pub timeouts: u64,
    /// Runaway lines discarded by the source
    pub overflows: u64,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.pipeline;
        write!(
            f,
            "lines={} accepted={} emitted={} suppressed={} rejected={} (invalid={} range={} monotonic={} outlier={}) ignored={} malformed={} published={} failed={}",
            p.lines_seen,
            p.accepted,
            p.emitted,
            p.suppressed,
            p.rejected(),
            p.invalid,
            p.out_of_range,
            p.not_monotonic,
            p.outliers,
            p.ignored,
            p.malformed,
            self.sink.messages_sent,
            self.sink.messages_failed,
        )
    }
}

/// Loop options
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Milliseconds between statistics log lines, 0 disables them
    pub stats_interval_ms: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            stats_interval_ms: 300_000,
        }
    }
}

/// Run until the source ends or fails
pub fn run<S, E, K, T>(
    source: &mut S,
    pipeline: &mut MeasurementPipeline,
    sink: &mut K,
    clock: &T,
    options: RunOptions,
) -> Result<RunSummary>
where
    S: Stream<Error = StreamError<E>>,
    S::Item: AsRef<[u8]>,
    E: fmt::Debug,
    K: Sink + ?Sized,
    T: TimeSource,
{
    let mut summary = RunSummary::default();
    let mut last_stats: Option<Timestamp> = None;

    loop {
        let line = match source.poll_next() {
            Ok(line) => line,
            Err(nb::Error::WouldBlock) => {
                summary.timeouts += 1;
                continue;
            }
            Err(nb::Error::Other(StreamError::EndOfStream)) => {
                info!("End of input reached");
                break;
            }
            Err(nb::Error::Other(StreamError::Overflow)) => {
                summary.overflows += 1;
                continue;
            }
            Err(nb::Error::Other(StreamError::Transport(e))) => {
                return Err(anyhow!("reading teleinfo frames failed: {:?}", e));
            }
        };

        let now = clock.now();
        let outcome = pipeline.process_line(line.as_ref(), now);

        if let Some(emission) = outcome.emission() {
            deliver(sink, emission);
        }

        if options.stats_interval_ms > 0 {
            let start = *last_stats.get_or_insert(now);
            if now.saturating_sub(start) >= options.stats_interval_ms {
                summary.pipeline = *pipeline.stats();
                summary.sink = sink.stats();
                info!("Statistics: {}", summary);
                last_stats = Some(now);
            }
        }
    }

    summary.pipeline = *pipeline.stats();
    summary.sink = sink.stats();
    Ok(summary)
}

fn deliver<K: Sink + ?Sized>(sink: &mut K, emission: &Emission) {
    info!("{}: {}", emission.channel.description(), emission.value);

    if let Err(e) = sink.publish(emission) {
        warn!(channel = %emission.channel, "Dropping emission: {}", e);
    } else {
        debug!(channel = %emission.channel, value = emission.value, "Emission delivered");
    }
}
