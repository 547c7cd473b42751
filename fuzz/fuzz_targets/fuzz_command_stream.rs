//! Fuzz target: `SamplingController::step`
//!
//! Feeds arbitrary console input through the sampling loop under both
//! digit policies and checks that it never panics, reads at most one
//! command per pass, and only sleeps while running.
//!
//! cargo fuzz run fuzz_command_stream

#![no_main]

use std::collections::VecDeque;

use adcscan::app::events::AppEvent;
use adcscan::app::ports::{CommandSource, EventSink, ReportSink, VoltageSensor};
use adcscan::app::service::{SamplingController, Step};
use adcscan::config::{DelayDigitPolicy, ScanConfig};
use adcscan::error::SensorError;
use embedded_hal::delay::DelayNs;
use libfuzzer_sys::fuzz_target;

struct Console {
    rx: VecDeque<u8>,
    tx: String,
}

impl CommandSource for Console {
    fn try_read_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }
}

impl ReportSink for Console {
    fn write_str(&mut self, s: &str) {
        self.tx.push_str(s);
    }
}

struct Fixed(i32);

impl VoltageSensor for Fixed {
    fn read_microvolts(&mut self) -> Result<i32, SensorError> {
        Ok(self.0)
    }
}

struct NoSleep(u32);

impl DelayNs for NoSleep {
    fn delay_ns(&mut self, _ns: u32) {
        self.0 += 1;
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let Some((&seed, input)) = data.split_first() else {
        return;
    };
    let policy = if seed & 1 == 0 {
        DelayDigitPolicy::Validate
    } else {
        DelayDigitPolicy::Wrapping
    };
    let cfg = ScanConfig {
        digit_policy: policy,
        ..ScanConfig::default()
    };
    let mut ctl = SamplingController::new(&cfg);
    let mut console = Console {
        rx: input.iter().copied().collect(),
        tx: String::new(),
    };
    let mut sensor = Fixed(i32::from(seed) * 10_000);

    // Each pass consumes one or two bytes, so this drains the input.
    for _ in 0..=input.len() {
        let before = console.rx.len();
        let mut delay = NoSleep(0);
        let step = ctl.step(&mut console, &mut sensor, &mut delay, &mut Discard);
        assert!(before - console.rx.len() <= 2);
        match step {
            Step::Idle => assert_eq!(delay.0, 0),
            _ => assert!(ctl.is_running()),
        }
    }
    assert!(console.rx.is_empty());
    if policy == DelayDigitPolicy::Validate {
        assert!(ctl.scan_delay_ms() <= 9000);
    }
});
