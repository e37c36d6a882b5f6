//! ESP-IDF implementations of the HAL traits.
//!
//! - UART0: user console (USB-serial bridge)
//! - UART1 TX: log sink

use esp_idf_svc::hal::delay::{FreeRtos, NON_BLOCK};
use esp_idf_svc::hal::gpio;
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::uart::{self, UartDriver, UartTxDriver};
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::sys::EspError;

use super::{SerialPort, System};

/// Console baud rate.
pub const CONSOLE_BAUD: u32 = 115_200;

/// Non-blocking console UART with a one-byte lookahead.
pub struct UartPort<'d> {
    uart: UartDriver<'d>,
    lookahead: Option<u8>,
}

impl<'d> UartPort<'d> {
    pub fn new(uart: UartDriver<'d>) -> Self {
        Self { uart, lookahead: None }
    }
}

impl SerialPort for UartPort<'_> {
    fn available(&mut self) -> bool {
        if self.lookahead.is_none() {
            let mut byte = [0u8; 1];
            if let Ok(1) = self.uart.read(&mut byte, NON_BLOCK) {
                self.lookahead = Some(byte[0]);
            }
        }
        self.lookahead.is_some()
    }

    fn read(&mut self) -> u8 {
        self.lookahead.take().unwrap_or(0)
    }

    fn write(&mut self, bytes: &[u8]) {
        let _ = self.uart.write(bytes);
    }
}

/// ESP-IDF system services.
pub struct EspSystem;

impl System for EspSystem {
    fn uptime_us(&self) -> i64 {
        // SAFETY: esp_timer_get_time is always safe to call
        unsafe { esp_idf_svc::sys::esp_timer_get_time() }
    }

    fn delay_ms(&mut self, ms: u32) {
        FreeRtos::delay_ms(ms);
    }

    fn restart(&mut self) -> ! {
        esp_idf_svc::hal::reset::restart()
    }
}

/// Open the console UART.
pub fn init_console_uart<'d>(
    uart: impl Peripheral<P = impl uart::Uart> + 'd,
    tx_pin: impl Peripheral<P = impl gpio::OutputPin> + 'd,
    rx_pin: impl Peripheral<P = impl gpio::InputPin> + 'd,
) -> Result<UartDriver<'d>, EspError> {
    let config = uart::config::Config::default().baudrate(Hertz(CONSOLE_BAUD));

    UartDriver::new(
        uart,
        tx_pin,
        rx_pin,
        Option::<gpio::AnyIOPin>::None, // CTS
        Option::<gpio::AnyIOPin>::None, // RTS
        &config,
    )
}

/// Open a TX-only UART for log output.
pub fn init_log_uart<'d>(
    uart: impl Peripheral<P = impl uart::Uart> + 'd,
    tx_pin: impl Peripheral<P = impl gpio::OutputPin> + 'd,
) -> Result<UartTxDriver<'d>, EspError> {
    let config = uart::config::Config::default().baudrate(Hertz(CONSOLE_BAUD));

    UartTxDriver::new(
        uart,
        tx_pin,
        Option::<gpio::AnyIOPin>::None, // CTS
        Option::<gpio::AnyIOPin>::None, // RTS
        &config,
    )
}

/// `core::fmt::Write` over a TX-only UART, for the log drain.
pub struct UartLogWriter<'a, 'd> {
    pub uart: &'a mut UartTxDriver<'d>,
}

impl core::fmt::Write for UartLogWriter<'_, '_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let _ = self.uart.write(s.as_bytes());
        Ok(())
    }
}
