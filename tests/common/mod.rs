//! Shared fakes for console integration tests

#![allow(dead_code)]

use std::collections::VecDeque;

use libcm_console::hal::{SerialPort, System};

/// Serial port backed by in-memory queues
pub struct FakePort {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

impl FakePort {
    pub fn new() -> Self {
        Self { input: VecDeque::new(), output: Vec::new() }
    }

    /// Queue bytes as if they had just arrived on the wire.
    pub fn deliver(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }

    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    pub fn take_output(&mut self) -> String {
        let s = self.output();
        self.output.clear();
        s
    }

    pub fn pending_input(&self) -> usize {
        self.input.len()
    }
}

impl SerialPort for FakePort {
    fn available(&mut self) -> bool {
        !self.input.is_empty()
    }

    fn read(&mut self) -> u8 {
        self.input.pop_front().unwrap_or(0)
    }

    fn write(&mut self, bytes: &[u8]) {
        self.output.extend_from_slice(bytes);
    }
}

/// System whose restart panics, so tests can observe it with should_panic
pub struct FakeSystem {
    pub now_us: i64,
    pub delays_ms: Vec<u32>,
}

impl FakeSystem {
    pub fn new() -> Self {
        Self { now_us: 0, delays_ms: Vec::new() }
    }
}

impl System for FakeSystem {
    fn uptime_us(&self) -> i64 {
        self.now_us
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
    }

    fn restart(&mut self) -> ! {
        panic!("restart requested after {:?} ms delay", self.delays_ms);
    }
}

/// Text sink for direct dispatcher tests
pub struct TestOutput {
    pub text: String,
}

impl TestOutput {
    pub fn new() -> Self {
        Self { text: String::new() }
    }

    pub fn contains(&self, s: &str) -> bool {
        self.text.contains(s)
    }
}

impl core::fmt::Write for TestOutput {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.text.push_str(s);
        Ok(())
    }
}
