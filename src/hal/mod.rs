//! Hardware Abstraction Layer for the LiBCM console.
//!
//! Thin traits around the serial transport and the system services.
//! Business logic stays in `console`, HAL is just I/O.

#[cfg(target_os = "espidf")]
pub mod esp;

/// Character-at-a-time serial transport.
pub trait SerialPort {
    /// True if at least one received byte is waiting. Never blocks.
    fn available(&mut self) -> bool;

    /// Read the next received byte. Only called after `available()`
    /// returned true.
    fn read(&mut self) -> u8;

    /// Queue bytes for transmission. Best effort, no backpressure.
    fn write(&mut self, bytes: &[u8]);
}

/// System services the console needs.
pub trait System {
    /// Microseconds since boot.
    fn uptime_us(&self) -> i64;

    /// Busy or cooperative wait.
    fn delay_ms(&mut self, ms: u32);

    /// Restart the device. Never returns.
    fn restart(&mut self) -> !;
}

/// Adapts a [`SerialPort`] to `core::fmt::Write`.
pub struct SerialWriter<'a> {
    port: &'a mut dyn SerialPort,
}

impl<'a> SerialWriter<'a> {
    pub fn new(port: &'a mut dyn SerialPort) -> Self {
        Self { port }
    }
}

impl core::fmt::Write for SerialWriter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.port.write(s.as_bytes());
        Ok(())
    }
}
