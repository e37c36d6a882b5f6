//! NVS-backed debug store for the ESP-IDF target.
//!
//! Values are cached in RAM at open time and written through on every set.
//! A failed write keeps the cached value and is reported on the background
//! log stream; the console never sees storage errors.
//!
//! # Layout
//!
//! Namespace `libcm_dbg`, one `u8` key per value, plus a schema version so a
//! later firmware can migrate the layout.

use esp_idf_svc::nvs::{EspDefaultNvsPartition, EspNvs, NvsDefault};

use super::{markers, DebugStore, StoreError, KEY_ON_DELAY_MS_DEFAULT};
use crate::hal::esp::EspSystem;
use crate::hal::System;
use crate::log_globals::BG_LOG_STREAM;

/// Current NVS schema version
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// NVS namespace for console-managed values
pub const NVS_NAMESPACE: &str = "libcm_dbg";

const VERSION_KEY: &str = "schema_ver";
const ASSIST_KEY: &str = "assist";
const REGEN_KEY: &str = "regen";
const LOOP_RATE_KEY: &str = "loop_rate";
const KEY_ON_DELAY_KEY: &str = "keyon_ms";

/// Debug store persisted in the default NVS partition
pub struct NvsStore {
    nvs: EspNvs<NvsDefault>,
    assist_limited: u8,
    regen_limited: u8,
    loop_rate_exceeded: u8,
    key_on_delay_ms: u8,
}

impl NvsStore {
    /// Open the namespace and load every value, falling back to defaults
    /// for keys that were never written.
    pub fn open(partition: EspDefaultNvsPartition) -> Result<Self, StoreError> {
        let mut nvs = EspNvs::new(partition, NVS_NAMESPACE, true)
            .map_err(|_| StoreError::InitFailed)?;

        let stored_version = nvs
            .get_u32(VERSION_KEY)
            .map_err(|_| StoreError::IoError)?
            .unwrap_or(0);
        if stored_version != CURRENT_SCHEMA_VERSION {
            nvs.set_u32(VERSION_KEY, CURRENT_SCHEMA_VERSION)
                .map_err(|_| StoreError::IoError)?;
        }

        let load = |nvs: &EspNvs<NvsDefault>, key: &str, default: u8| -> Result<u8, StoreError> {
            Ok(nvs.get_u8(key).map_err(|_| StoreError::IoError)?.unwrap_or(default))
        };

        Ok(Self {
            assist_limited: load(&nvs, ASSIST_KEY, markers::ASSIST_NEVER_LIMITED)?,
            regen_limited: load(&nvs, REGEN_KEY, markers::REGEN_NEVER_LIMITED)?,
            loop_rate_exceeded: load(&nvs, LOOP_RATE_KEY, markers::LOOP_RATE_NEVER_EXCEEDED)?,
            key_on_delay_ms: load(&nvs, KEY_ON_DELAY_KEY, KEY_ON_DELAY_MS_DEFAULT)?,
            nvs,
        })
    }

    fn persist(&mut self, key: &str, value: u8) {
        if self.nvs.set_u8(key, value).is_err() {
            let now = EspSystem.uptime_us();
            crate::con_error!(BG_LOG_STREAM, now, "nvs write {}={} failed", key, value);
        }
    }
}

impl DebugStore for NvsStore {
    fn assist_limited(&self) -> u8 {
        self.assist_limited
    }

    fn set_assist_limited(&mut self, value: u8) {
        self.assist_limited = value;
        self.persist(ASSIST_KEY, value);
    }

    fn regen_limited(&self) -> u8 {
        self.regen_limited
    }

    fn set_regen_limited(&mut self, value: u8) {
        self.regen_limited = value;
        self.persist(REGEN_KEY, value);
    }

    fn loop_rate_exceeded(&self) -> u8 {
        self.loop_rate_exceeded
    }

    fn set_loop_rate_exceeded(&mut self, value: u8) {
        self.loop_rate_exceeded = value;
        self.persist(LOOP_RATE_KEY, value);
    }

    fn key_on_delay_ms(&self) -> u8 {
        self.key_on_delay_ms
    }

    fn set_key_on_delay_ms(&mut self, value: u8) {
        self.key_on_delay_ms = value;
        self.persist(KEY_ON_DELAY_KEY, value);
    }
}
