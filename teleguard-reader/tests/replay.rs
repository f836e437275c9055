//! End-to-end replay of a meter capture through the reader loop

use std::io::Write;

use teleguard_connectors::{LineReader, MemorySink};
use teleguard_core::{FixedTime, MeasurementPipeline, PipelineConfig};
use teleguard_reader::{run, RunOptions};

/// Two frames, the second with a corrupted power group
const CAPTURE: &str = "\
\x02ADSC\t041876543210\t;\r
VTIC\t02\tJ\r
EAST\t000123456\t*\r
EASF02\t000023456\t4\r
SINSTS\t00342\tO\r
\x03\x02ADSC\t041876543210\t;\r
EAST\t000123461\t/\r
EASF02\t000023456\t4\r
SINSTS\t00#42\tO\r
SINSTS\t00345\tR\r
\x03";

fn capture_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_replay_publishes_expected_messages() {
    let capture = capture_file(CAPTURE);
    let mut source = LineReader::open(capture.path()).unwrap();
    let mut pipeline = MeasurementPipeline::new(PipelineConfig::default()).unwrap();
    let mut sink = MemorySink::new("teleinfo");
    let clock = FixedTime::stepping(1_700_000_000_000, 2_500);

    let summary = run(&mut source, &mut pipeline, &mut sink, &clock, RunOptions::default()).unwrap();

    let published: Vec<(&str, &str)> = sink
        .messages()
        .iter()
        .map(|m| (m.topic.as_str(), m.message.as_str()))
        .collect();
    assert_eq!(
        published,
        vec![
            ("teleinfo/totalenergy", r#"{"value":123456,"timestamp":1700000005}"#),
            ("teleinfo/injection", r#"{"value":23456,"timestamp":1700000007}"#),
            ("teleinfo/power", r#"{"value":342,"timestamp":1700000010}"#),
            ("teleinfo/totalenergy", r#"{"value":123461,"timestamp":1700000015}"#),
            ("teleinfo/power", r#"{"value":345,"timestamp":1700000022}"#),
        ]
    );

    let stats = summary.pipeline;
    assert_eq!(stats.lines_seen, 11);
    assert_eq!(stats.ignored, 3);
    assert_eq!(stats.malformed, 1);
    // Repeated injection counter is not an increase
    assert_eq!(stats.not_monotonic, 1);
    assert_eq!(stats.invalid, 1);
    assert_eq!(stats.accepted, 5);
    assert_eq!(summary.sink.messages_sent, 5);
}

#[test]
fn test_replay_with_rate_limit_disabled() {
    let capture = capture_file("SINSTS 00342\nSINSTS 00345\nSINSTS 00350\n");
    let mut source = LineReader::open(capture.path()).unwrap();
    let mut pipeline =
        MeasurementPipeline::new(PipelineConfig::default().with_min_interval(0)).unwrap();
    let mut sink = MemorySink::new("home");

    run(&mut source, &mut pipeline, &mut sink, &FixedTime::new(0), RunOptions::default()).unwrap();

    assert_eq!(sink.topics(), vec!["home/power"; 3]);
}
