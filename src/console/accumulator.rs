//! Input accumulation state machine.
//!
//! Normalizes the byte stream while it arrives so the dispatcher only ever
//! sees uppercase, space-free, comment-free candidate lines:
//!
//! - `a`..`z` are folded to uppercase
//! - spaces are dropped
//! - everything from `(` to `)` is dropped
//! - `\n` or `\r` completes the line
//!
//! The comment flag survives line completion. Only `)` clears it, so an
//! unclosed `(` keeps swallowing input on the following lines too.

use super::line_buffer::LineBuffer;
use crate::config::USER_INPUT_BUFFER_SIZE;

/// Result of feeding one byte.
#[derive(Debug, PartialEq, Eq)]
pub enum Feed<'a> {
    /// Byte consumed, line still open.
    Continue,
    /// Line complete and within capacity.
    LineReady(&'a [u8]),
    /// Line complete but longer than the buffer. Holds the truncated bytes.
    Overflow(&'a [u8]),
}

/// Input state bits kept between polls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFlags(u8);

impl InputFlags {
    /// Skipping characters between `(` and `)`.
    pub const INSIDE_COMMENT: u8 = 0x01;

    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn contains(self, bit: u8) -> bool {
        self.0 & bit != 0
    }

    pub fn insert(&mut self, bit: u8) {
        self.0 |= bit;
    }

    pub fn remove(&mut self, bit: u8) {
        self.0 &= !bit;
    }
}

/// Line accumulator
pub struct LineAccumulator<const N: usize = USER_INPUT_BUFFER_SIZE> {
    line: LineBuffer<N>,
    /// Storable bytes that arrived while the buffer was full
    dropped: usize,
    flags: InputFlags,
}

impl<const N: usize> LineAccumulator<N> {
    pub const fn new() -> Self {
        Self {
            line: LineBuffer::new(),
            dropped: 0,
            flags: InputFlags::empty(),
        }
    }

    /// Process one received byte.
    pub fn feed(&mut self, byte: u8) -> Feed<'_> {
        if byte == b'\n' || byte == b'\r' {
            let received = self.line.len() + self.dropped;
            self.dropped = 0;
            let line = self.line.complete();

            return if received >= N {
                Feed::Overflow(line)
            } else {
                Feed::LineReady(line)
            };
        }

        if self.flags.contains(InputFlags::INSIDE_COMMENT) {
            if byte == b')' {
                self.flags.remove(InputFlags::INSIDE_COMMENT);
            }
        } else if self.line.has_room() {
            match byte {
                b'(' => self.flags.insert(InputFlags::INSIDE_COMMENT),
                b' ' => {}
                b'a'..=b'z' => {
                    self.line.push(byte.to_ascii_uppercase());
                }
                _ => {
                    self.line.push(byte);
                }
            }
        } else if byte != b' ' && byte != b'(' {
            self.dropped = self.dropped.saturating_add(1);
        }

        Feed::Continue
    }

    /// True while input is being discarded as a comment.
    pub fn in_comment(&self) -> bool {
        self.flags.contains(InputFlags::INSIDE_COMMENT)
    }

    /// Normalized bytes of the line being accumulated.
    pub fn pending(&self) -> &[u8] {
        self.line.as_bytes()
    }

    /// Storable bytes received for the current line, dropped ones included.
    pub fn received(&self) -> usize {
        self.line.len() + self.dropped
    }

    /// Buffer capacity, terminator included.
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for LineAccumulator<N> {
    fn default() -> Self {
        Self::new()
    }
}
