//! Module: config
//!
//! Purpose: Console constants and the persistent debug store.
//!
//! Architecture:
//! - Constants: buffer sizes and timings shared by console and binary
//! - `DebugStore`: get/set accessors for the values the console reads/writes
//! - `MemoryStore`: RAM backend (host simulator, tests)
//! - `nvs::NvsStore`: ESP-IDF NVS backend (target only)
//!
//! The console never owns the stored representation. It only moves the
//! marker bytes defined in [`markers`] through the trait.

pub mod memory;

#[cfg(target_os = "espidf")]
pub mod nvs;

pub use memory::MemoryStore;

/// Capacity of the console line buffer, terminator included.
pub const USER_INPUT_BUFFER_SIZE: usize = 20;

/// Time given to the UART to flush the reboot notice before restarting.
pub const REBOOT_FLUSH_DELAY_MS: u32 = 50;

/// Key-on delay restored on a fresh or corrupted store.
pub const KEY_ON_DELAY_MS_DEFAULT: u8 = 0;

/// Marker bytes stored for the debug flags.
///
/// Each flag has exactly two legal values. Anything else is treated as
/// corrupted and repaired by [`verify_data_valid`].
pub mod markers {
    /// Assist was limited since the debug values were last cleared.
    pub const ASSIST_LIMITED: u8 = 0xA5;
    /// Assist was never limited.
    pub const ASSIST_NEVER_LIMITED: u8 = 0x5A;

    /// Regen was limited since the debug values were last cleared.
    pub const REGEN_LIMITED: u8 = 0xC3;
    /// Regen was never limited.
    pub const REGEN_NEVER_LIMITED: u8 = 0x3C;

    /// The main loop overran its period at least once.
    pub const LOOP_RATE_EXCEEDED: u8 = 0x96;
    /// The main loop always met its period.
    pub const LOOP_RATE_NEVER_EXCEEDED: u8 = 0x69;
}

/// Storage backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// Backend could not be opened or initialized
    InitFailed,
    /// Read or write to the backend failed
    IoError,
}

impl core::fmt::Display for StoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InitFailed => f.write_str("store init failed"),
            Self::IoError => f.write_str("store I/O error"),
        }
    }
}

/// Persistent values the console reads and writes.
///
/// Setters are infallible from the console's point of view: a backend that
/// fails to persist keeps serving its cached value and reports the failure
/// through its own logging.
pub trait DebugStore {
    /// Raw assist marker byte.
    fn assist_limited(&self) -> u8;
    fn set_assist_limited(&mut self, value: u8);

    /// Raw regen marker byte.
    fn regen_limited(&self) -> u8;
    fn set_regen_limited(&mut self, value: u8);

    /// Raw loop-rate marker byte.
    fn loop_rate_exceeded(&self) -> u8;
    fn set_loop_rate_exceeded(&mut self, value: u8);

    /// Extra delay before responding to a key-on event, in milliseconds.
    fn key_on_delay_ms(&self) -> u8;
    fn set_key_on_delay_ms(&mut self, value: u8);

    /// Restore the three debug markers to their "never happened" values.
    fn reset_debug_values(&mut self) {
        self.set_assist_limited(markers::ASSIST_NEVER_LIMITED);
        self.set_regen_limited(markers::REGEN_NEVER_LIMITED);
        self.set_loop_rate_exceeded(markers::LOOP_RATE_NEVER_EXCEEDED);
    }
}

/// Repair marker bytes holding anything but one of their two legal values.
///
/// Called once at boot. Returns `true` if at least one value was rewritten.
pub fn verify_data_valid(store: &mut dyn DebugStore) -> bool {
    use markers::*;

    let mut repaired = false;

    let assist = store.assist_limited();
    if assist != ASSIST_LIMITED && assist != ASSIST_NEVER_LIMITED {
        store.set_assist_limited(ASSIST_NEVER_LIMITED);
        repaired = true;
    }

    let regen = store.regen_limited();
    if regen != REGEN_LIMITED && regen != REGEN_NEVER_LIMITED {
        store.set_regen_limited(REGEN_NEVER_LIMITED);
        repaired = true;
    }

    let loop_rate = store.loop_rate_exceeded();
    if loop_rate != LOOP_RATE_EXCEEDED && loop_rate != LOOP_RATE_NEVER_EXCEEDED {
        store.set_loop_rate_exceeded(LOOP_RATE_NEVER_EXCEEDED);
        repaired = true;
    }

    repaired
}
