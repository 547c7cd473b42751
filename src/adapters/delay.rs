//! Blocking delay used for the scan delay.
//!
//! - **`target_os = "espidf"`** — `esp_idf_hal::delay::FreeRtos`, which
//!   yields to the scheduler for the whole sleep.
//! - **`not(target_os = "espidf")`** — [`StdDelay`] over
//!   `std::thread::sleep` for host simulation.

use embedded_hal::delay::DelayNs;

/// `DelayNs` over the host thread sleep.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
