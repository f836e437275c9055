//! Shared helpers for pipeline integration tests

#![allow(dead_code)]

use teleguard_core::{Channel, MeasurementPipeline, Outcome, PipelineConfig, Timestamp};

/// Format a meter line the way the meter pads its groups
pub fn meter_line(channel: Channel, value: u64) -> String {
    match channel {
        Channel::InstantaneousPower => format!("{} {:05}", channel.label(), value),
        _ => format!("{}\t{:09}\t>", channel.label(), value),
    }
}

/// Pipeline with the default rules and a 10 s emission interval
pub fn default_pipeline() -> MeasurementPipeline {
    MeasurementPipeline::new(PipelineConfig::default()).expect("default config is valid")
}

/// Feed `lines` one every `step` ms starting at `start`
pub fn feed(
    pipeline: &mut MeasurementPipeline,
    lines: &[String],
    start: Timestamp,
    step: Timestamp,
) -> Vec<Outcome> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| pipeline.process_line(line.as_bytes(), start + step * i as u64))
        .collect()
}

/// Values of every emission in `outcomes`, in order
pub fn emitted_values(outcomes: &[Outcome]) -> Vec<(Channel, u64)> {
    outcomes
        .iter()
        .filter_map(|outcome| outcome.emission())
        .map(|emission| (emission.channel, emission.value))
        .collect()
}

pub fn history(pipeline: &MeasurementPipeline, channel: Channel) -> Vec<u64> {
    pipeline
        .history(channel)
        .map(|history| history.iter().collect())
        .unwrap_or_default()
}
