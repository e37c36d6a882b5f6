//! Main console struct integrating accumulator and dispatcher

use core::fmt::Write;

use super::{dispatch, find_command, CommandLine, Context, ConsoleError, Feed, LineAccumulator};
use crate::config::{DebugStore, USER_INPUT_BUFFER_SIZE};
use crate::hal::{SerialPort, SerialWriter, System};
use crate::logging::LogStream;
use crate::{con_debug, con_info, con_warn};

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Console state machine
///
/// Owns the accumulator, so the line buffer and comment flag live exactly
/// as long as the console and persist between polls.
pub struct Console<'l, const N: usize = USER_INPUT_BUFFER_SIZE> {
    input: LineAccumulator<N>,
    log: &'l LogStream,
    /// Lines completed since boot
    lines: u32,
}

impl<'l, const N: usize> Console<'l, N> {
    /// Create new console logging to `log`
    pub const fn new(log: &'l LogStream) -> Self {
        Self {
            input: LineAccumulator::new(),
            log,
            lines: 0,
        }
    }

    /// Drain every byte the port currently holds.
    ///
    /// Returns the number of lines completed. Never blocks; `$BOOT` does
    /// not return.
    pub fn poll(
        &mut self,
        port: &mut dyn SerialPort,
        store: &mut dyn DebugStore,
        system: &mut dyn System,
    ) -> usize {
        let mut completed = 0;

        while port.available() {
            let byte = port.read();
            if self.process_byte(byte, port, store, system).is_some() {
                completed += 1;
            }
        }

        completed
    }

    /// Process a single input byte
    ///
    /// Returns Some(result) if a line completed, None if more input needed.
    pub fn process_byte(
        &mut self,
        byte: u8,
        port: &mut dyn SerialPort,
        store: &mut dyn DebugStore,
        system: &mut dyn System,
    ) -> Option<Result<(), ConsoleError>> {
        let now = system.uptime_us();

        let (line, overflowed) = match self.input.feed(byte) {
            Feed::Continue => return None,
            Feed::LineReady(line) => (CommandLine::new(line), false),
            Feed::Overflow(line) => (CommandLine::new(line), true),
        };
        self.lines = self.lines.wrapping_add(1);

        port.write(b"\necho: ");
        port.write(line.as_bytes());

        let result = if overflowed {
            con_warn!(self.log, now, "line {} overflow, {} byte buffer", self.lines, N);
            Err(ConsoleError::TooManyCharacters)
        } else {
            match find_command(&line) {
                Some(command) => con_info!(self.log, now, "dispatch {}", command.keyword),
                None => con_debug!(self.log, now, "no command in line {}", self.lines),
            }

            let mut out = SerialWriter::new(port);
            let mut ctx = Context {
                out: &mut out,
                store,
                system,
            };
            dispatch(&line, &mut ctx)
        };

        if let Err(e) = result {
            let mut out = SerialWriter::new(port);
            let _ = write!(out, "\n{}", e.message());
            con_debug!(self.log, now, "rejected: {}", e);
        }

        Some(result)
    }

    /// True while an unclosed `(` is swallowing input.
    pub fn in_comment(&self) -> bool {
        self.input.in_comment()
    }

    /// Normalized bytes of the line still being typed.
    pub fn pending(&self) -> &[u8] {
        self.input.pending()
    }

    /// Lines completed since creation.
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Print welcome banner
    pub fn print_banner(&self, port: &mut dyn SerialPort) {
        let mut out = SerialWriter::new(port);
        let _ = write!(out, "\r\n{}", VERSION);
        let _ = write!(out, "\r\nType '$HELP' for commands.\r\n");
    }
}
