//! Fixed-offset line access and decimal field parsing.
//!
//! Lines are matched by literal bytes at fixed positions. Reading past the
//! end of a line yields the terminator, so `line.at(6) == TERMINATOR` means
//! "nothing after the keyword".

use super::line_buffer::STRING_TERMINATION_CHARACTER as TERMINATOR;
use super::ConsoleError;

/// Completed, normalized command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandLine<'a> {
    bytes: &'a [u8],
}

impl<'a> CommandLine<'a> {
    /// Wrap a completed line. Anything after an embedded terminator is
    /// invisible, as it would be to a NUL-terminated reader.
    pub fn new(bytes: &'a [u8]) -> Self {
        let end = bytes
            .iter()
            .position(|&b| b == TERMINATOR)
            .unwrap_or(bytes.len());
        Self { bytes: &bytes[..end] }
    }

    /// Byte at `idx`, or the terminator past the end.
    pub fn at(&self, idx: usize) -> u8 {
        self.bytes.get(idx).copied().unwrap_or(TERMINATOR)
    }

    /// True if `literal` appears exactly at `offset`.
    pub fn matches_at(&self, offset: usize, literal: &[u8]) -> bool {
        self.bytes
            .get(offset..offset + literal.len())
            .is_some_and(|s| s == literal)
    }

    /// True if nothing follows `offset`.
    pub fn ends_at(&self, offset: usize) -> bool {
        self.at(offset) == TERMINATOR
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Parse a 1-3 digit unsigned field from three fixed positions.
///
/// The width is set by the first terminator. A terminator in the first
/// position is an error, not zero. Values above 255 saturate at 255.
/// Bytes other than `0`..`9` inside the field are rejected.
pub fn parse_u8_field(digit1: u8, digit2: u8, digit3: u8) -> Result<u8, ConsoleError> {
    let width = if digit1 == TERMINATOR {
        return Err(ConsoleError::InvalidUint8);
    } else if digit2 == TERMINATOR {
        1
    } else if digit3 == TERMINATOR {
        2
    } else {
        3
    };

    let mut value: u16 = 0;
    for &d in &[digit1, digit2, digit3][..width] {
        if !d.is_ascii_digit() {
            return Err(ConsoleError::InvalidUint8);
        }
        value = value * 10 + u16::from(d - b'0');
    }

    Ok(value.min(u16::from(u8::MAX)) as u8)
}

/// Parse the field starting at `offset` of `line`.
pub fn parse_u8_at(line: &CommandLine<'_>, offset: usize) -> Result<u8, ConsoleError> {
    parse_u8_field(line.at(offset), line.at(offset + 1), line.at(offset + 2))
}
