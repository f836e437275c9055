//! Frame Parser for Teleinfo Lines
//!
//! ## Overview
//!
//! A frame is one line of meter output: a label, a value token and, in real
//! teleinfo traffic, a checksum character and sometimes a horodate. Parsing
//! happens in three steps, each one allowed to drop the line:
//!
//! ```text
//! bytes ──decode_line──▶ FrameLine ──parse_frame──▶ Frame ──parse_value──▶ u64
//!        (first two tokens)          (label, token)          (typed value)
//! ```
//!
//! 1. **Decode**: non-ASCII bytes are discarded, not treated as errors.
//!    Serial noise on a 7E1 line regularly produces high-bit garbage. Every
//!    ASCII byte is kept, control characters included, so a label carrying
//!    a stray STX never matches a channel. Only the first two tokens are
//!    kept, joined by one space; the length bound applies to them alone.
//! 2. **Split**: tokens are separated by runs of ASCII whitespace, vertical
//!    tab or the separators `0x1C`..=`0x1F`. Fewer than two tokens means
//!    there is no frame. The value token loses its leading zeros
//!    (`"00342"` → `"342"`, `"0000"` → `"0"`).
//! 3. **Type**: the token becomes a `u64`, or the sample is invalid.
//!
//! Nothing here knows about ranges, counters or outliers.

use heapless::String;

use crate::channel::Channel;
use crate::constants::buffers::MAX_FRAME_LEN;

/// Label and value token of a decoded line, bounded by [`MAX_FRAME_LEN`]
pub type FrameLine = String<MAX_FRAME_LEN>;

/// One split frame: label and normalized value token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    /// First token, verbatim
    pub label: &'a str,
    /// Second token with leading zeros stripped, `"0"` if nothing remains
    pub value: &'a str,
}

impl<'a> Frame<'a> {
    /// Channel this frame belongs to, if any
    pub fn channel(&self) -> Option<Channel> {
        Channel::from_label(self.label)
    }

    /// Typed value of the token
    pub fn parsed_value(&self) -> Option<u64> {
        parse_value(self.value)
    }
}

/// Token separator
pub fn is_separator(byte: u8) -> bool {
    byte.is_ascii_whitespace() || matches!(byte, 0x0b | 0x1c..=0x1f)
}

/// Decode raw bytes permissively into a bounded line
///
/// Drops non-ASCII bytes and keeps the first two tokens, joined by a single
/// space. Trailing tokens (checksum, horodate, noise) never count against
/// the bound. Returns `None` if the kept tokens do not fit in a
/// [`FrameLine`].
pub fn decode_line(bytes: &[u8]) -> Option<FrameLine> {
    let mut line = FrameLine::new();
    let mut tokens = 0;
    let mut in_token = false;

    for &byte in bytes.iter().filter(|b| b.is_ascii()) {
        if is_separator(byte) {
            if in_token && tokens == 2 {
                break;
            }
            in_token = false;
            continue;
        }

        if !in_token {
            if tokens > 0 {
                line.push(' ').ok()?;
            }
            tokens += 1;
            in_token = true;
        }
        line.push(byte as char).ok()?;
    }

    Some(line)
}

/// Split a decoded line into label and normalized value token
///
/// Returns `None` when the line has fewer than two tokens.
pub fn parse_frame(line: &str) -> Option<Frame<'_>> {
    let mut tokens = line
        .split(|c: char| c.is_ascii() && is_separator(c as u8))
        .filter(|token| !token.is_empty());
    let label = tokens.next()?;
    let raw_value = tokens.next()?;

    Some(Frame {
        label,
        value: normalize_value(raw_value),
    })
}

/// Strip leading zeros, keeping a single `"0"` for all-zero tokens
pub fn normalize_value(token: &str) -> &str {
    let stripped = token.trim_start_matches('0');
    if stripped.is_empty() {
        "0"
    } else {
        stripped
    }
}

/// Parse a value token as a non-negative decimal integer
///
/// `Some` iff the token is non-empty, made only of ASCII digits, and fits
/// in a `u64`. Signs, decimal points and whitespace are rejected.
///
/// All-digit tokens above `u64::MAX` are invalid too, so the pipeline
/// rejects them before any validator runs.
pub fn parse_value(token: &str) -> Option<u64> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[test]
    fn splits_label_and_value() {
        let frame = parse_frame("SINSTS 00342").unwrap();
        assert_eq!(frame.label, "SINSTS");
        assert_eq!(frame.value, "342");
        assert_eq!(frame.channel(), Some(Channel::InstantaneousPower));
        assert_eq!(frame.parsed_value(), Some(342));
    }

    #[test]
    fn single_token_is_not_a_frame() {
        assert!(parse_frame("SINSTS").is_none());
        assert!(parse_frame("").is_none());
        assert!(parse_frame("   \t ").is_none());
    }

    #[test]
    fn extra_tokens_are_ignored() {
        // Real teleinfo groups end with a checksum character
        let frame = parse_frame("EAST\t000001234\t>").unwrap();
        assert_eq!(frame.label, "EAST");
        assert_eq!(frame.value, "1234");
    }

    #[test]
    fn all_zero_token_normalizes_to_zero() {
        assert_eq!(normalize_value("00000"), "0");
        assert_eq!(normalize_value("0"), "0");
        assert_eq!(normalize_value("0100"), "100");
        assert_eq!(parse_frame("SINSTS 00000").unwrap().value, "0");
    }

    #[test]
    fn typed_parse_rejects_non_digits() {
        assert_eq!(parse_value("342"), Some(342));
        assert_eq!(parse_value("0"), Some(0));
        assert_eq!(parse_value("-5"), None);
        assert_eq!(parse_value("+5"), None);
        assert_eq!(parse_value("3.5"), None);
        assert_eq!(parse_value("12a"), None);
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("99999999999999999999999"), None);
    }

    #[test]
    fn decode_drops_non_ascii_bytes() {
        let line = decode_line(b"SIN\xffSTS 00\x80342\r\n").unwrap();
        assert_eq!(line.as_str(), "SINSTS 00342");
        assert_eq!(parse_frame(&line).unwrap(), Frame { label: "SINSTS", value: "342" });
    }

    #[test]
    fn decode_keeps_control_characters() {
        // A stray STX stays part of the label
        let line = decode_line(b"\x02SINSTS 00342\x03").unwrap();
        assert_eq!(line.as_str(), "\x02SINSTS 00342\x03");
        assert_eq!(parse_frame(&line).unwrap().channel(), None);
    }

    #[test]
    fn information_separators_split_tokens() {
        let line = decode_line(b"SINSTS\x1f00342").unwrap();
        assert_eq!(line.as_str(), "SINSTS 00342");
        assert_eq!(parse_frame(&line).unwrap(), Frame { label: "SINSTS", value: "342" });

        let frame = parse_frame("EAST\x0b0100\x1c*").unwrap();
        assert_eq!(frame, Frame { label: "EAST", value: "100" });
    }

    #[test]
    fn decode_keeps_only_label_and_value() {
        let line = decode_line(b"  EAST\t\t000123456\t*\r\n").unwrap();
        assert_eq!(line.as_str(), "EAST 000123456");
    }

    #[test]
    fn trailing_tokens_do_not_count_against_bound() {
        let mut raw: Vec<u8> = b"SINSTS 00342 ".to_vec();
        raw.extend(core::iter::repeat(b'x').take(200));

        let line = decode_line(&raw).unwrap();
        assert_eq!(parse_frame(&line).unwrap().parsed_value(), Some(342));
    }

    #[test]
    fn overlong_token_is_rejected() {
        let long = [b'A'; MAX_FRAME_LEN + 1];
        assert!(decode_line(&long).is_none());
        assert!(decode_line(&long[..MAX_FRAME_LEN]).is_some());
    }
}
