//! ADC scan firmware — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  ConsoleAdapter        AdcSensorAdapter   LogEventSink    │
//! │  (CommandSource +      (VoltageSensor)    (EventSink)     │
//! │   ReportSink)          WatchdogDelay<FreeRtos>            │
//! │                        (DelayNs + Heartbeat)              │
//! │                                                          │
//! │  ───────────────── Port Trait Boundary ─────────────────  │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │       SamplingController (pure logic)              │  │
//! │  │  poll byte · run/stop · sample · report · sleep    │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info};

use adcscan::adapters::console::ConsoleAdapter;
use adcscan::adapters::hardware::AdcSensorAdapter;
use adcscan::adapters::log_sink::LogEventSink;
use adcscan::app::banner;
use adcscan::app::ports::ReportSink;
use adcscan::app::service::SamplingController;
use adcscan::config::ScanConfig;
use adcscan::drivers::hw_init;
use adcscan::drivers::watchdog::{Watchdog, WatchdogDelay};
use adcscan::error::FatalInitError;
use esp_idf_hal::delay::FreeRtos;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    info!("adcscan v{}", env!("CARGO_PKG_VERSION"));

    let config = ScanConfig::default();
    config.validate()?;

    // ── 2. Board + console ────────────────────────────────────
    if let Err(e) = hw_init::init_board(&config.adc) {
        halt(e, None);
    }
    let mut console = match hw_init::init_console(&config.console) {
        Ok(uart) => ConsoleAdapter::new(uart),
        Err(e) => halt(e, None),
    };
    banner::announce_startup(&mut console);

    // ── 3. ADC channel ────────────────────────────────────────
    let mut sensor = match hw_init::init_adc(&config.adc) {
        Ok(adc) => AdcSensorAdapter::new(adc),
        Err(e) => halt(e, Some(&mut console)),
    };
    banner::announce_channel_ready(&mut console, config.channel);

    // ── 4. Sampling loop ──────────────────────────────────────
    let mut delay = WatchdogDelay::new(FreeRtos, Watchdog::new());
    let mut sink = LogEventSink::new();
    let mut controller = SamplingController::new(&config);
    controller.start(&mut sink);

    controller.run(&mut console, &mut sensor, &mut delay, &mut sink)
}

/// Unrecoverable bring-up failure: report and stop forward progress.
/// The task watchdog is not yet subscribed, so the chip stays parked
/// until reset.
fn halt(err: FatalInitError, console: Option<&mut ConsoleAdapter>) -> ! {
    error!("{}; halting", err);
    if let Some(console) = console {
        let mut line: heapless::String<96> = heapless::String::new();
        let _ = core::fmt::write(&mut line, format_args!("{}", err));
        console.write_line(&line);
    }
    loop {
        FreeRtos::delay_ms(1000);
    }
}
