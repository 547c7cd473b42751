//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing controller events through the
//! `log` facade (ESP-IDF logger on target).  Per-sample events go to
//! `debug` since the reading itself is already on the console.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { state, scan_delay_ms } => {
                info!("START | state={:?} delay={}ms", state, scan_delay_ms);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::ScanDelayChanged { from_ms, to_ms } => {
                info!("DELAY | {}ms -> {}ms", from_ms, to_ms);
            }
            AppEvent::DelayDigitRejected(b) => {
                warn!("DELAY | rejected argument 0x{:02x}", b);
            }
            AppEvent::DelayArgumentMissing => {
                debug!("DELAY | no argument byte");
            }
            AppEvent::ByteIgnored(b) => {
                debug!("INPUT | ignored 0x{:02x}", b);
            }
            AppEvent::Sampled(r) => {
                debug!("SAMPLE | ch={} {}uV {}mV", r.channel, r.microvolts, r.millivolts);
            }
            AppEvent::SampleFailed(e) => {
                warn!("SAMPLE | failed: {}", e);
            }
        }
    }
}
