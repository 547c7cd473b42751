//! Debug console UART.
//!
//! On ESP-IDF: UART0 through the IDF UART driver, installed by
//! [`hw_init::init_console`](super::hw_init::init_console).  Reads never
//! block (zero tick timeout).
//! On host/test: an in-memory RX queue and TX buffer.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(not(target_os = "espidf"))]
use std::collections::VecDeque;

pub struct UartConsole {
    #[cfg(target_os = "espidf")]
    port: uart_port_t,
    #[cfg(not(target_os = "espidf"))]
    rx: VecDeque<u8>,
    #[cfg(not(target_os = "espidf"))]
    tx: Vec<u8>,
}

impl UartConsole {
    #[cfg(target_os = "espidf")]
    pub(crate) fn from_port(port: uart_port_t) -> Self {
        Self { port }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn simulated() -> Self {
        Self {
            rx: VecDeque::new(),
            tx: Vec::new(),
        }
    }

    #[cfg(target_os = "espidf")]
    pub fn read_byte(&mut self) -> Option<u8> {
        let mut byte = 0u8;
        // SAFETY: the driver is installed before construction; the buffer is
        // one byte and outlives the call.
        let n = unsafe { uart_read_bytes(self.port, (&raw mut byte).cast(), 1, 0) };
        (n == 1).then_some(byte)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    #[cfg(target_os = "espidf")]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        // SAFETY: the driver copies `bytes` into its TX FIFO before returning.
        let n = unsafe { uart_write_bytes(self.port, bytes.as_ptr().cast(), bytes.len()) };
        if n < 0 {
            log::warn!("console write failed ({})", n);
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.tx.extend_from_slice(bytes);
    }

    /// Queue bytes as if typed on the terminal.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_push_rx(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }

    /// Drain everything written so far.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_take_tx(&mut self) -> String {
        String::from_utf8_lossy(&std::mem::take(&mut self.tx)).into_owned()
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn sim_rx_pending(&self) -> usize {
        self.rx.len()
    }
}
