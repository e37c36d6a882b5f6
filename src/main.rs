//! LiBCM console - Main entry point
//!
//! On the ESP-IDF target:
//! 1. Open console UART0 and log UART1
//! 2. Open NVS and repair corrupted debug markers
//! 3. Poll the console forever, draining logs between polls
//!
//! On a host build the same console runs against stdin/stdout with a RAM
//! store, which is handy for trying commands without hardware.

use libcm_console::config::verify_data_valid;
use libcm_console::log_drain::LogDrain;
use libcm_console::{con_info, con_warn, Console, BG_LOG_STREAM, CONSOLE_LOG_STREAM};

/// Pause between console polls.
const POLL_PERIOD_MS: u32 = 10;

#[cfg(target_os = "espidf")]
fn main() {
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;
    use libcm_console::config::nvs::NvsStore;
    use libcm_console::config::MemoryStore;
    use libcm_console::hal::esp::{init_console_uart, init_log_uart, EspSystem, UartLogWriter, UartPort};
    use libcm_console::hal::System;

    esp_idf_svc::sys::link_patches();

    let Ok(peripherals) = Peripherals::take() else {
        return;
    };
    let pins = peripherals.pins;

    let Ok(console_uart) = init_console_uart(peripherals.uart0, pins.gpio43, pins.gpio44) else {
        return;
    };
    let mut port = UartPort::new(console_uart);
    let mut log_uart = init_log_uart(peripherals.uart1, pins.gpio6).ok();

    let mut system = EspSystem;

    // Without NVS the console still works, settings just don't survive a reboot
    let mut nvs_store = EspDefaultNvsPartition::take()
        .ok()
        .and_then(|partition| NvsStore::open(partition).ok());
    let mut ram_store = MemoryStore::new();
    let store: &mut dyn libcm_console::DebugStore = match nvs_store.as_mut() {
        Some(s) => s,
        None => {
            con_warn!(BG_LOG_STREAM, system.uptime_us(), "NVS unavailable, using RAM store");
            &mut ram_store
        }
    };

    if verify_data_valid(store) {
        con_warn!(BG_LOG_STREAM, system.uptime_us(), "debug markers repaired");
    }

    let mut console: Console<'_> = Console::new(&CONSOLE_LOG_STREAM);
    console.print_banner(&mut port);
    con_info!(BG_LOG_STREAM, system.uptime_us(), "console ready");

    let mut drain = LogDrain::new();
    loop {
        console.poll(&mut port, store, &mut system);

        if let Some(uart) = log_uart.as_mut() {
            let mut out = UartLogWriter { uart };
            drain.drain(&[&CONSOLE_LOG_STREAM, &BG_LOG_STREAM], system.uptime_us(), &mut out);
        }

        system.delay_ms(POLL_PERIOD_MS);
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    use host::{HostSystem, StdinPort};
    use libcm_console::hal::System;
    use libcm_console::MemoryStore;

    let mut port = StdinPort::spawn();
    let mut system = HostSystem::new();
    let mut store = MemoryStore::new();

    if verify_data_valid(&mut store) {
        con_warn!(BG_LOG_STREAM, system.uptime_us(), "debug markers repaired");
    }

    let mut console: Console<'_> = Console::new(&CONSOLE_LOG_STREAM);
    console.print_banner(&mut port);
    con_info!(BG_LOG_STREAM, system.uptime_us(), "console ready (host simulator)");

    let mut drain = LogDrain::new();
    let mut stderr = host::StderrWriter;
    while port.is_open() {
        console.poll(&mut port, &mut store, &mut system);
        port.flush();
        drain.drain(&[&CONSOLE_LOG_STREAM, &BG_LOG_STREAM], system.uptime_us(), &mut stderr);
        system.delay_ms(POLL_PERIOD_MS);
    }
}

#[cfg(not(target_os = "espidf"))]
mod host {
    use std::io::{Read, Write};
    use std::sync::mpsc::{self, Receiver, TryRecvError};
    use std::time::{Duration, Instant};

    use libcm_console::hal::{SerialPort, System};

    /// Serial port fed by a background stdin reader.
    pub struct StdinPort {
        rx: Receiver<u8>,
        lookahead: Option<u8>,
        open: bool,
        stdout: std::io::Stdout,
    }

    impl StdinPort {
        pub fn spawn() -> Self {
            let (tx, rx) = mpsc::channel();
            std::thread::spawn(move || {
                for byte in std::io::stdin().lock().bytes() {
                    let Ok(byte) = byte else { break };
                    if tx.send(byte).is_err() {
                        break;
                    }
                }
            });

            Self {
                rx,
                lookahead: None,
                open: true,
                stdout: std::io::stdout(),
            }
        }

        /// False once stdin reached EOF and every byte was consumed.
        pub fn is_open(&self) -> bool {
            self.open || self.lookahead.is_some()
        }

        pub fn flush(&mut self) {
            let _ = self.stdout.flush();
        }
    }

    impl SerialPort for StdinPort {
        fn available(&mut self) -> bool {
            if self.lookahead.is_none() {
                match self.rx.try_recv() {
                    Ok(byte) => self.lookahead = Some(byte),
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => self.open = false,
                }
            }
            self.lookahead.is_some()
        }

        fn read(&mut self) -> u8 {
            self.lookahead.take().unwrap_or(0)
        }

        fn write(&mut self, bytes: &[u8]) {
            let _ = self.stdout.write_all(bytes);
        }
    }

    /// Host clock; restart exits the process.
    pub struct HostSystem {
        boot: Instant,
    }

    impl HostSystem {
        pub fn new() -> Self {
            Self { boot: Instant::now() }
        }
    }

    impl System for HostSystem {
        fn uptime_us(&self) -> i64 {
            self.boot.elapsed().as_micros() as i64
        }

        fn delay_ms(&mut self, ms: u32) {
            std::thread::sleep(Duration::from_millis(u64::from(ms)));
        }

        fn restart(&mut self) -> ! {
            let _ = std::io::stdout().flush();
            eprintln!("\n[host] restart requested, exiting");
            std::process::exit(0)
        }
    }

    /// Log sink on stderr.
    pub struct StderrWriter;

    impl core::fmt::Write for StderrWriter {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            std::io::stderr().write_all(s.as_bytes()).map_err(|_| core::fmt::Error)
        }
    }
}
