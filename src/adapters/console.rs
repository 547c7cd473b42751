//! Console adapter — the debug UART behind [`CommandSource`] and
//! [`ReportSink`].

use crate::app::ports::{CommandSource, ReportSink};
use crate::drivers::uart::UartConsole;

pub struct ConsoleAdapter {
    uart: UartConsole,
}

impl ConsoleAdapter {
    pub fn new(uart: UartConsole) -> Self {
        Self { uart }
    }

    /// Direct driver access (host simulation hooks).
    pub fn uart_mut(&mut self) -> &mut UartConsole {
        &mut self.uart
    }
}

impl CommandSource for ConsoleAdapter {
    fn try_read_byte(&mut self) -> Option<u8> {
        self.uart.read_byte()
    }
}

impl ReportSink for ConsoleAdapter {
    fn write_str(&mut self, s: &str) {
        self.uart.write_bytes(s.as_bytes());
    }
}
