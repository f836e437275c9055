//! Capture files read through the line source

use std::io::Write;

use teleguard_connectors::{ConnectorError, LineReader};
use teleguard_core::{stream::StreamError, Stream};

fn drain<S>(stream: &mut S) -> Vec<Vec<u8>>
where
    S: Stream<Item = Vec<u8>, Error = StreamError<std::io::Error>>,
{
    let mut lines = Vec::new();
    loop {
        match stream.poll_next() {
            Ok(line) => lines.push(line),
            Err(nb::Error::WouldBlock) => continue,
            Err(nb::Error::Other(StreamError::EndOfStream)) => return lines,
            Err(nb::Error::Other(e)) => panic!("unexpected stream error: {:?}", e),
        }
    }
}

#[test]
fn test_replay_capture_file() {
    let mut capture = tempfile::NamedTempFile::new().unwrap();
    capture
        .write_all(b"\x02ADSC\t041876543210\t;\r\nEAST\t000123456\t*\r\nSINSTS\t00342\tO\r\n\x03")
        .unwrap();
    capture.flush().unwrap();

    let mut reader = LineReader::open(capture.path()).unwrap();
    let lines = drain(&mut reader);

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], b"EAST\t000123456\t*\r\n");
    // Trailing ETX without newline is still delivered
    assert_eq!(lines[3], b"\x03");
}

#[test]
fn test_missing_capture_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = LineReader::open(dir.path().join("missing.txt"));

    assert!(matches!(result, Err(ConnectorError::Io(_))));
}
