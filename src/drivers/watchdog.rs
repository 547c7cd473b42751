//! Task watchdog for the sampling loop.
//!
//! While sampling is paused the loop spins without sleeping, so the main
//! task feeds the TWDT once per pass instead of relying on idle-task
//! checks (those are left unsubscribed).  A stalled loop resets the chip
//! after [`TIMEOUT_MS`].
//!
//! Scan delays have no upper bound under the wrapping digit policy, so
//! [`WatchdogDelay`] serves long sleeps in [`FEED_SLICE_MS`] pieces and
//! feeds between them.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use embedded_hal::delay::DelayNs;

use crate::app::ports::Heartbeat;

/// Reset the chip if the loop has not fed the watchdog for this long.
pub const TIMEOUT_MS: u32 = 15_000;

/// Longest unfed stretch of a single sleep.
pub const FEED_SLICE_MS: u32 = TIMEOUT_MS / 3;

pub struct Watchdog {
    #[cfg(target_os = "espidf")]
    subscribed: bool,
    feeds: u64,
}

impl Default for Watchdog {
    fn default() -> Self {
        Self::new()
    }
}

impl Watchdog {
    /// Reconfigure the TWDT and subscribe the calling task.
    pub fn new() -> Self {
        #[cfg(target_os = "espidf")]
        {
            let cfg = esp_task_wdt_config_t {
                timeout_ms: TIMEOUT_MS,
                idle_core_mask: 0,
                trigger_panic: true,
            };
            // SAFETY: called once from main() before the loop.
            if let Err(e) = esp!(unsafe { esp_task_wdt_reconfigure(&cfg) }) {
                log::warn!("Watchdog: reconfigure returned {} (may not be initialised yet)", e);
            }
            // SAFETY: a null handle subscribes the current task.
            let subscribed = esp!(unsafe { esp_task_wdt_add(core::ptr::null_mut()) }).is_ok();
            if subscribed {
                log::info!("Watchdog: subscribed ({} ms timeout)", TIMEOUT_MS);
            } else {
                log::warn!("Watchdog: failed to subscribe, loop runs unguarded");
            }
            Self { subscribed, feeds: 0 }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            log::info!("Watchdog(sim): no-op");
            Self { feeds: 0 }
        }
    }

    pub fn feed(&mut self) {
        self.feeds = self.feeds.wrapping_add(1);
        #[cfg(target_os = "espidf")]
        if self.subscribed {
            // SAFETY: the task was subscribed in new().
            unsafe {
                esp_task_wdt_reset();
            }
        }
    }

    /// Times [`feed`](Self::feed) has been called.
    pub fn feeds(&self) -> u64 {
        self.feeds
    }
}

/// A [`DelayNs`] that keeps the watchdog fed through long sleeps.
pub struct WatchdogDelay<D> {
    inner: D,
    watchdog: Watchdog,
}

impl<D: DelayNs> WatchdogDelay<D> {
    pub fn new(inner: D, watchdog: Watchdog) -> Self {
        Self { inner, watchdog }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub fn watchdog(&self) -> &Watchdog {
        &self.watchdog
    }
}

impl<D: DelayNs> DelayNs for WatchdogDelay<D> {
    // A u32 of nanoseconds is under 4.3 s, shorter than one slice.
    fn delay_ns(&mut self, ns: u32) {
        self.inner.delay_ns(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.delay_ms(us / 1000);
        self.inner.delay_us(us % 1000);
    }

    fn delay_ms(&mut self, mut ms: u32) {
        while ms > FEED_SLICE_MS {
            self.inner.delay_ms(FEED_SLICE_MS);
            self.watchdog.feed();
            ms -= FEED_SLICE_MS;
        }
        self.inner.delay_ms(ms);
    }
}

impl<D> Heartbeat for WatchdogDelay<D> {
    fn beat(&mut self) {
        self.watchdog.feed();
    }
}
