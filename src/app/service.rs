//! Sampling loop controller — the hexagonal core.
//!
//! [`SamplingController`] owns the run/stop state and the scan delay.  Each
//! iteration it polls the console for one byte without blocking, then, if
//! running, samples the ADC, prints the result, and sleeps for the scan
//! delay.  All I/O flows through port traits injected at call sites.
//!
//! ```text
//!  CommandSource ──▶ ┌──────────────────────┐ ──▶ ReportSink
//!                    │  SamplingController   │
//!  VoltageSensor ──▶ │  RunState · delay     │ ──▶ EventSink
//!                    └──────────────────────┘
//!                               │
//!                               ▼
//!                            DelayNs
//! ```

use embedded_hal::delay::DelayNs;

use crate::config::{DelayDigitPolicy, MICRO_TO_MILLI, ScanConfig};
use crate::fsm::{RunState, SamplerState, Transition};

use super::commands::{self, Decoded};
use super::events::{AppEvent, Reading};
use super::ports::{CommandSource, EventSink, Heartbeat, ReportSink, VoltageSensor};

/// Capacity of one formatted report line (without terminator).
pub const LINE_CAP: usize = 48;

/// What one call to [`SamplingController::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Stopped: no sample, no sleep.
    Idle,
    /// A line was printed, then the loop slept `delay_ms`.
    Sampled { delay_ms: u32 },
    /// The read failed; nothing was printed, but the loop still slept.
    SampleFailed { delay_ms: u32 },
}

pub struct SamplingController {
    state: SamplerState,
    channel: u8,
    policy: DelayDigitPolicy,
    samples_taken: u64,
}

impl SamplingController {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            state: SamplerState::new(
                RunState::from_enabled(config.start_sampling),
                config.initial_scan_delay_ms,
            ),
            channel: config.channel,
            policy: config.digit_policy,
            samples_taken: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started {
            state: self.state.run,
            scan_delay_ms: self.state.scan_delay_ms,
        });
    }

    /// Run the loop forever, beating the heartbeat at the top of every pass.
    ///
    /// The delay also carries the heartbeat, so a sleep longer than the
    /// watchdog timeout can keep signalling from inside the sleep.
    pub fn run(
        &mut self,
        console: &mut (impl CommandSource + ReportSink),
        sensor: &mut impl VoltageSensor,
        delay: &mut (impl DelayNs + Heartbeat),
        sink: &mut impl EventSink,
    ) -> ! {
        loop {
            delay.beat();
            self.step(console, sensor, delay, sink);
        }
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// One loop pass: poll → (sample → report → sleep) if running.
    ///
    /// `console` satisfies **both** [`CommandSource`] and [`ReportSink`]
    /// since a single UART carries both directions; this avoids a double
    /// mutable borrow.
    pub fn step(
        &mut self,
        console: &mut (impl CommandSource + ReportSink),
        sensor: &mut impl VoltageSensor,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> Step {
        self.poll_input(console, sink);

        if !self.state.run.is_running() {
            return Step::Idle;
        }

        let delay_ms = self.state.scan_delay_ms;
        let step = match sensor.read_microvolts() {
            Ok(microvolts) => {
                let reading = Reading {
                    channel: self.channel,
                    microvolts,
                    millivolts: microvolts_to_millivolts(microvolts),
                };
                console.write_line(&format_reading(reading.channel, reading.millivolts));
                self.samples_taken += 1;
                sink.emit(&AppEvent::Sampled(reading));
                Step::Sampled { delay_ms }
            }
            Err(e) => {
                sink.emit(&AppEvent::SampleFailed(e));
                Step::SampleFailed { delay_ms }
            }
        };

        delay.delay_ms(delay_ms);
        step
    }

    /// Non-blocking poll for one command byte.  Returns `true` if a byte
    /// was consumed.
    pub fn poll_input(&mut self, input: &mut impl CommandSource, sink: &mut impl EventSink) -> bool {
        let Some(byte) = input.try_read_byte() else {
            return false;
        };

        match commands::decode(byte, input) {
            Decoded::Command(cmd) => match self.state.apply(cmd, self.policy) {
                Transition::StateChanged { from, to } => {
                    sink.emit(&AppEvent::StateChanged { from, to });
                }
                Transition::DelayChanged { from_ms, to_ms } => {
                    sink.emit(&AppEvent::ScanDelayChanged { from_ms, to_ms });
                }
                Transition::DelayRejected(arg) => {
                    sink.emit(&AppEvent::DelayDigitRejected(arg));
                }
            },
            Decoded::MissingArgument => sink.emit(&AppEvent::DelayArgumentMissing),
            Decoded::Ignored(other) => sink.emit(&AppEvent::ByteIgnored(other)),
        }
        true
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> RunState {
        self.state.run
    }

    pub fn is_running(&self) -> bool {
        self.state.run.is_running()
    }

    pub fn scan_delay_ms(&self) -> u32 {
        self.state.scan_delay_ms
    }

    /// Lines reported since startup.
    pub fn samples_taken(&self) -> u64 {
        self.samples_taken
    }
}

/// Integer division, truncating toward zero.
pub fn microvolts_to_millivolts(microvolts: i32) -> i32 {
    microvolts / MICRO_TO_MILLI
}

/// `Channel <n> input: <mv>mV` with the value right-aligned in four columns.
pub fn format_reading(channel: u8, millivolts: i32) -> heapless::String<LINE_CAP> {
    let mut line = heapless::String::new();
    // Longest possible line is 32 bytes.
    let _ = core::fmt::write(
        &mut line,
        format_args!("Channel {} input: {:4}mV", channel, millivolts),
    );
    line
}
