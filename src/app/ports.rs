//! Port traits — the hexagonal boundary between the sampling loop and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SamplingController (domain)
//! ```
//!
//! The console adapter implements [`CommandSource`] and [`ReportSink`], the
//! ADC adapter implements [`VoltageSensor`], and the log adapter implements
//! [`EventSink`].  Sleeping goes through `embedded_hal::delay::DelayNs`;
//! the delay used by the forever loop also implements [`Heartbeat`].

use crate::error::SensorError;

// ───────────────────────────────────────────────────────────────
// Console input (driven adapter: UART → domain)
// ───────────────────────────────────────────────────────────────

pub trait CommandSource {
    /// Return one received byte if one is waiting.  Never blocks.
    fn try_read_byte(&mut self) -> Option<u8>;
}

// ───────────────────────────────────────────────────────────────
// Console output (driven adapter: domain → UART)
// ───────────────────────────────────────────────────────────────

pub trait ReportSink {
    /// Write text verbatim.
    fn write_str(&mut self, s: &str);

    /// Write `line` followed by a CR LF terminator.
    fn write_line(&mut self, line: &str) {
        self.write_str(line);
        self.write_str("\r\n");
    }
}

// ───────────────────────────────────────────────────────────────
// Voltage sensor (driven adapter: ADC → domain)
// ───────────────────────────────────────────────────────────────

pub trait VoltageSensor {
    /// Convert the configured channel once and return the input voltage.
    fn read_microvolts(&mut self) -> Result<i32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The controller emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Liveness (driven adapter: domain → task watchdog)
// ───────────────────────────────────────────────────────────────

/// Proof of progress, signalled at the top of every loop pass.
pub trait Heartbeat {
    fn beat(&mut self);
}
