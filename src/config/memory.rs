//! RAM-backed debug store.
//!
//! Values live as long as the process. Used by the host simulator and tests.

use super::{markers, DebugStore, KEY_ON_DELAY_MS_DEFAULT};

/// Debug store kept in RAM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryStore {
    assist_limited: u8,
    regen_limited: u8,
    loop_rate_exceeded: u8,
    key_on_delay_ms: u8,
    /// Number of setter calls since creation
    writes: u32,
}

impl MemoryStore {
    /// Create a store holding factory defaults.
    pub const fn new() -> Self {
        Self {
            assist_limited: markers::ASSIST_NEVER_LIMITED,
            regen_limited: markers::REGEN_NEVER_LIMITED,
            loop_rate_exceeded: markers::LOOP_RATE_NEVER_EXCEEDED,
            key_on_delay_ms: KEY_ON_DELAY_MS_DEFAULT,
            writes: 0,
        }
    }

    /// Number of writes performed through the [`DebugStore`] setters.
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugStore for MemoryStore {
    fn assist_limited(&self) -> u8 {
        self.assist_limited
    }

    fn set_assist_limited(&mut self, value: u8) {
        self.assist_limited = value;
        self.writes += 1;
    }

    fn regen_limited(&self) -> u8 {
        self.regen_limited
    }

    fn set_regen_limited(&mut self, value: u8) {
        self.regen_limited = value;
        self.writes += 1;
    }

    fn loop_rate_exceeded(&self) -> u8 {
        self.loop_rate_exceeded
    }

    fn set_loop_rate_exceeded(&mut self, value: u8) {
        self.loop_rate_exceeded = value;
        self.writes += 1;
    }

    fn key_on_delay_ms(&self) -> u8 {
        self.key_on_delay_ms
    }

    fn set_key_on_delay_ms(&mut self, value: u8) {
        self.key_on_delay_ms = value;
        self.writes += 1;
    }
}
