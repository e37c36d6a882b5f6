//! Log sink: formats queued entries onto a text writer.
//!
//! On target the writer is a TX-only UART1 (see `hal::esp::init_log_uart`),
//! on host it is stderr. The drain is best-effort and may block.
//!
//! Format: `[timestamp_us] LEVEL: message\n`

use core::fmt::Write;

use crate::logging::{LogEntry, LogStream};

/// Interval between dropped-message reports.
pub const DROPPED_REPORT_INTERVAL_US: i64 = 10_000_000;

/// Write a single entry.
pub fn write_log_entry(out: &mut dyn Write, entry: &LogEntry) -> core::fmt::Result {
    writeln!(
        out,
        "[{:10}] {}: {}",
        entry.timestamp_us,
        entry.level.as_str(),
        entry.message()
    )
}

/// Drain sink with periodic dropped-message reporting
pub struct LogDrain {
    last_dropped_report: i64,
}

impl LogDrain {
    pub const fn new() -> Self {
        Self { last_dropped_report: 0 }
    }

    /// Drain every stream in order of priority.
    ///
    /// Returns the number of entries written.
    pub fn drain<const N: usize>(
        &mut self,
        streams: &[&LogStream<N>],
        now_us: i64,
        out: &mut dyn Write,
    ) -> usize {
        let mut written = 0;

        for stream in streams {
            while let Some(entry) = stream.drain() {
                let _ = write_log_entry(out, &entry);
                written += 1;
            }
        }

        if now_us - self.last_dropped_report > DROPPED_REPORT_INTERVAL_US {
            let dropped: u32 = streams.iter().map(|s| s.dropped()).sum();
            if dropped > 0 {
                let _ = writeln!(out, "[WARN] Dropped: {} log entries", dropped);
                for stream in streams {
                    stream.reset_dropped();
                }
            }
            self.last_dropped_report = now_us;
        }

        written
    }
}

impl Default for LogDrain {
    fn default() -> Self {
        Self::new()
    }
}
