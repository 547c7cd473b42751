//! Outbound application events.
//!
//! The [`SamplingController`](super::service::SamplingController) emits
//! these through the [`EventSink`](super::ports::EventSink) port.  They are
//! diagnostics only; the console report lines go through
//! [`ReportSink`](super::ports::ReportSink).

use crate::error::SensorError;
use crate::fsm::RunState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The loop is about to start.
    Started { state: RunState, scan_delay_ms: u32 },

    /// Sampling was paused or resumed.
    StateChanged { from: RunState, to: RunState },

    /// A set-delay command took effect.
    ScanDelayChanged { from_ms: u32, to_ms: u32 },

    /// The byte after a set-delay command was not a digit.
    DelayDigitRejected(u8),

    /// A set-delay command arrived with no argument byte waiting.
    DelayArgumentMissing,

    /// A byte that is not a command was dropped.
    ByteIgnored(u8),

    /// One sample was taken and reported.
    Sampled(Reading),

    /// The ADC read failed; nothing was reported for this iteration.
    SampleFailed(SensorError),
}

/// One converted sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    pub channel: u8,
    pub microvolts: i32,
    pub millivolts: i32,
}
