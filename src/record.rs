//! LDraw line records.
//!
//! A [`Record`] is one line of an LDraw model file, kept byte-for-byte as it
//! was read (minus the line terminator). Lines are not required to be UTF-8;
//! older models often carry Latin-1 text in comments and file names. The only
//! structure interpreted here is the leading "line type" token and the
//! whitespace-delimited columns used for sorting.

use std::borrow::Cow;
use std::fmt;

/// Line ending required by the LDraw file format, regardless of platform.
pub const LINE_ENDING: &str = "\r\n";

/// Meta command inserted between batches to mark a build step.
pub const STEP_LINE: &str = "0 STEP";

/// Line types that never take part in step ordering: comments/meta commands
/// (0), lines (2), triangles (3), quads (4) and optional lines (5).
pub const IGNORED_LINE_TYPES: [i64; 5] = [0, 2, 3, 4, 5];

/// A single line of an LDraw model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    bytes: Vec<u8>,
}

impl Record {
    /// Create a record from a line of text.
    ///
    /// A trailing carriage return (from CRLF input) is dropped; everything
    /// else is preserved.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        Self::from_bytes(s.as_bytes())
    }

    /// Create a record from the raw bytes of a line.
    pub fn from_bytes(line: &[u8]) -> Self {
        Self {
            bytes: line.strip_suffix(b"\r").unwrap_or(line).to_vec(),
        }
    }

    /// The step marker record.
    pub fn step_marker() -> Self {
        Self::from_str(STEP_LINE)
    }

    /// The raw line bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The line as text, with invalid UTF-8 replaced.
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// True if the line contains nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.bytes.iter().all(u8::is_ascii_whitespace)
    }

    /// Whitespace-delimited tokens of the line.
    pub fn tokens(&self) -> impl Iterator<Item = &[u8]> {
        self.bytes
            .split(u8::is_ascii_whitespace)
            .filter(|token| !token.is_empty())
    }

    /// Token at `index`, counting from the first non-blank token.
    pub fn token(&self, index: usize) -> Option<&[u8]> {
        self.tokens().nth(index)
    }

    /// The leading integer of the line, or `None` when the first token does
    /// not start with a number.
    pub fn line_type(&self) -> Option<i64> {
        self.token(0).and_then(parse_leading_int)
    }

    /// True for the `0 STEP` meta command.
    pub fn is_step_marker(&self) -> bool {
        let mut tokens = self.tokens();
        tokens.next() == Some(b"0".as_slice())
            && tokens.next() == Some(b"STEP".as_slice())
            && tokens.next().is_none()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str_lossy())
    }
}

impl From<&str> for Record {
    fn from(s: &str) -> Self {
        Record::from_str(s)
    }
}

/// Parse the leading base-10 integer of `s`.
///
/// Accepts leading whitespace and a sign, then reads the longest run of
/// ASCII digits; trailing bytes are ignored (`"-24.5"` is -24, `"8x"` is 8).
/// Returns `None` if no digit follows the sign. Values outside the `i64`
/// range saturate.
pub fn parse_leading_int(s: &[u8]) -> Option<i64> {
    let start = s
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(s.len());
    let s = &s[start..];
    let (negative, digits) = match s.first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for &b in digits {
        if !b.is_ascii_digit() {
            break;
        }
        seen_digit = true;
        let d = i64::from(b - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(d)
        } else {
            value.saturating_mul(10).saturating_add(d)
        };
    }

    seen_digit.then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_strips_carriage_return() {
        let r = Record::from_str("1 4 0 -8 0 1 0 0 0 1 0 0 0 1 3001.dat\r");
        assert!(r.as_bytes().ends_with(b"3001.dat"));
    }

    #[test]
    fn test_from_str_preserves_inner_whitespace() {
        let r = Record::from_str("  1  4\t0 -8 0");
        assert_eq!(r.as_bytes(), b"  1  4\t0 -8 0");
    }

    #[test]
    fn test_from_bytes_keeps_latin1() {
        let r = Record::from_bytes(b"1 4 0 0 0 1 0 0 0 1 0 0 0 1 st\xfcck.dat\r");
        assert_eq!(r.as_bytes(), b"1 4 0 0 0 1 0 0 0 1 0 0 0 1 st\xfcck.dat");
        assert_eq!(r.line_type(), Some(1));
        assert_eq!(r.token(14), Some(b"st\xfcck.dat".as_slice()));
        assert!(r.to_string().ends_with("st\u{fffd}ck.dat"));
    }

    #[test]
    fn test_line_type() {
        assert_eq!(Record::from_str("1 4 0 0 0").line_type(), Some(1));
        assert_eq!(Record::from_str("0 // comment").line_type(), Some(0));
        assert_eq!(Record::from_str("   3 16 0 0 0").line_type(), Some(3));
        assert_eq!(Record::from_str("FILE model.ldr").line_type(), None);
        assert_eq!(Record::from_str("").line_type(), None);
        assert_eq!(Record::from_bytes(b"0 Author: J\xf6rg").line_type(), Some(0));
    }

    #[test]
    fn test_token_index_skips_leading_blanks() {
        let r = Record::from_str("  1 4 10 -20 30 1 0 0 0 1 0 0 0 1 3001.dat");
        assert_eq!(r.token(2), Some(b"10".as_slice()));
        assert_eq!(r.token(3), Some(b"-20".as_slice()));
        assert_eq!(r.token(4), Some(b"30".as_slice()));
        assert_eq!(r.token(99), None);
    }

    #[test]
    fn test_is_blank() {
        assert!(Record::from_str("").is_blank());
        assert!(Record::from_str(" \t ").is_blank());
        assert!(!Record::from_str("0").is_blank());
    }

    #[test]
    fn test_step_marker() {
        let marker = Record::step_marker();
        assert_eq!(marker.as_bytes(), STEP_LINE.as_bytes());
        assert!(marker.is_step_marker());
        assert!(Record::from_str("0  STEP").is_step_marker());
        assert!(!Record::from_str("0 STEPS").is_step_marker());
        assert!(!Record::from_str("1 4 0 0 0").is_step_marker());
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int(b"42"), Some(42));
        assert_eq!(parse_leading_int(b"-24.5"), Some(-24));
        assert_eq!(parse_leading_int(b"+7"), Some(7));
        assert_eq!(parse_leading_int(b"8x"), Some(8));
        assert_eq!(parse_leading_int(b"  12"), Some(12));
        assert_eq!(parse_leading_int(b"abc"), None);
        assert_eq!(parse_leading_int(b"-"), None);
        assert_eq!(parse_leading_int(b""), None);
        assert_eq!(parse_leading_int(b".5"), None);
        assert_eq!(parse_leading_int(b"\xf6"), None);
    }

    #[test]
    fn test_parse_leading_int_saturates() {
        assert_eq!(parse_leading_int(b"99999999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_leading_int(b"-99999999999999999999999"), Some(i64::MIN));
    }
}
