//! Two-state run/stop machine and the scan-delay it carries.
//!
//! ```text
//!            '1'
//!   ┌─────────────────┐
//!   ▼                 │
//! RUNNING ───'1'───▶ STOPPED
//!   │ ▲               │ ▲
//!   └─┘ '2' d         └─┘ '2' d     (delay = d * 1000 ms, state kept)
//! ```
//!
//! Every other byte is a self-loop with no effect.  There is no terminal
//! state.

use crate::app::commands::Command;
use crate::config::DelayDigitPolicy;

/// Whether the loop is currently sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    Stopped,
    Running,
}

impl RunState {
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled { Self::Running } else { Self::Stopped }
    }

    pub fn is_running(self) -> bool {
        self == Self::Running
    }

    /// The other state.
    pub fn toggled(self) -> Self {
        match self {
            Self::Running => Self::Stopped,
            Self::Stopped => Self::Running,
        }
    }
}

/// Result of applying one [`Command`] to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    StateChanged { from: RunState, to: RunState },
    DelayChanged { from_ms: u32, to_ms: u32 },
    /// The byte after `'2'` was refused by the digit policy.
    DelayRejected(u8),
}

/// Mutable state owned by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerState {
    pub run: RunState,
    pub scan_delay_ms: u32,
}

impl SamplerState {
    pub fn new(run: RunState, scan_delay_ms: u32) -> Self {
        Self { run, scan_delay_ms }
    }

    pub fn apply(&mut self, cmd: Command, policy: DelayDigitPolicy) -> Transition {
        match cmd {
            Command::ToggleSampling => {
                let from = self.run;
                self.run = from.toggled();
                Transition::StateChanged { from, to: self.run }
            }
            Command::SetScanDelay(byte) => match scan_delay_from_byte(byte, policy) {
                Some(ms) => {
                    let from_ms = self.scan_delay_ms;
                    self.scan_delay_ms = ms;
                    Transition::DelayChanged { from_ms, to_ms: ms }
                }
                None => Transition::DelayRejected(byte),
            },
        }
    }
}

/// Convert the byte following a set-delay command into milliseconds.
///
/// The byte is a count of whole seconds in ASCII.  Under
/// [`DelayDigitPolicy::Wrapping`] non-digits go through the same arithmetic
/// modulo 2^32, so `'/'` becomes `u32::MAX - 999`.
pub fn scan_delay_from_byte(byte: u8, policy: DelayDigitPolicy) -> Option<u32> {
    match policy {
        DelayDigitPolicy::Validate => byte
            .is_ascii_digit()
            .then(|| u32::from(byte - b'0') * 1000),
        DelayDigitPolicy::Wrapping => {
            Some(u32::from(byte).wrapping_sub(u32::from(b'0')).wrapping_mul(1000))
        }
    }
}
