//! Hardware adapter — the ADC channel behind [`VoltageSensor`].
//!
//! Counts reads and failures so the loop's health can be logged without
//! the domain knowing about the driver.

use crate::app::ports::VoltageSensor;
use crate::drivers::adc::AdcChannel;
use crate::error::SensorError;

pub struct AdcSensorAdapter {
    adc: AdcChannel,
    reads: u32,
    failures: u32,
}

impl AdcSensorAdapter {
    pub fn new(adc: AdcChannel) -> Self {
        Self {
            adc,
            reads: 0,
            failures: 0,
        }
    }

    pub fn reads(&self) -> u32 {
        self.reads
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Direct driver access (host simulation hooks).
    pub fn adc_mut(&mut self) -> &mut AdcChannel {
        &mut self.adc
    }
}

impl VoltageSensor for AdcSensorAdapter {
    fn read_microvolts(&mut self) -> Result<i32, SensorError> {
        self.reads = self.reads.wrapping_add(1);
        self.adc.read_microvolts().inspect_err(|_| {
            self.failures = self.failures.wrapping_add(1);
        })
    }
}
