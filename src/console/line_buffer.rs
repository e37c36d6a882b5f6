//! Line buffer for console input

use crate::config::USER_INPUT_BUFFER_SIZE;

/// Byte marking the logical end of a stored line.
pub const STRING_TERMINATION_CHARACTER: u8 = 0x00;

/// Fixed-capacity line storage.
///
/// The last slot is reserved for the terminator, so at most `N - 1` data
/// bytes are stored and the cursor never leaves `[0, N)`.
pub struct LineBuffer<const N: usize = USER_INPUT_BUFFER_SIZE> {
    buf: [u8; N],
    cursor: usize,
}

impl<const N: usize> LineBuffer<N> {
    /// Create empty buffer
    pub const fn new() -> Self {
        assert!(N >= 2, "Line buffer needs room for data and terminator");

        Self {
            buf: [STRING_TERMINATION_CHARACTER; N],
            cursor: 0,
        }
    }

    /// True if one more data byte still leaves room for the terminator.
    pub fn has_room(&self) -> bool {
        self.cursor < N - 1
    }

    /// Store a byte and advance. Returns `false` (and stores nothing) when
    /// the buffer is full.
    pub fn push(&mut self, c: u8) -> bool {
        if !self.has_room() {
            return false;
        }
        self.buf[self.cursor] = c;
        self.cursor += 1;
        true
    }

    /// Write the terminator at the cursor, rewind for the next line and
    /// return the completed line (terminator excluded).
    pub fn complete(&mut self) -> &[u8] {
        let len = self.cursor;
        self.buf[len] = STRING_TERMINATION_CHARACTER;
        self.cursor = 0;
        &self.buf[..len]
    }

    /// Number of data bytes stored.
    pub fn len(&self) -> usize {
        self.cursor
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Bytes stored so far (no terminator).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.cursor]
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
