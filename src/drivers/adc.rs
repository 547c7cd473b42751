//! Single-channel ADC driver.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: owns the ADC1 oneshot unit and a curve-fitting calibration
//! handle, both created by [`hw_init::init_adc`](super::hw_init::init_adc).
//! On host/test: returns an injected voltage or an injected error.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::error::SensorError;

pub struct AdcChannel {
    /// Conversions averaged per read (1 = no averaging).
    samples_per_read: u8,
    #[cfg(target_os = "espidf")]
    unit: adc_oneshot_unit_handle_t,
    #[cfg(target_os = "espidf")]
    cali: adc_cali_handle_t,
    #[cfg(target_os = "espidf")]
    channel: adc_channel_t,
    #[cfg(not(target_os = "espidf"))]
    sim_microvolts: i32,
    #[cfg(not(target_os = "espidf"))]
    sim_error: Option<SensorError>,
}

impl AdcChannel {
    #[cfg(target_os = "espidf")]
    pub(crate) fn from_handles(
        unit: adc_oneshot_unit_handle_t,
        cali: adc_cali_handle_t,
        channel: adc_channel_t,
        samples_per_read: u8,
    ) -> Self {
        Self {
            samples_per_read: samples_per_read.max(1),
            unit,
            cali,
            channel,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn simulated(samples_per_read: u8) -> Self {
        Self {
            samples_per_read: samples_per_read.max(1),
            sim_microvolts: 0,
            sim_error: None,
        }
    }

    pub fn samples_per_read(&self) -> u8 {
        self.samples_per_read
    }

    /// Convert the channel and return the input voltage in microvolts.
    #[cfg(target_os = "espidf")]
    pub fn read_microvolts(&mut self) -> Result<i32, SensorError> {
        let mut sum_mv: i64 = 0;
        for _ in 0..self.samples_per_read {
            let mut raw: i32 = 0;
            // SAFETY: `unit` was created by adc_oneshot_new_unit and is only
            // used from the main loop.
            esp!(unsafe { adc_oneshot_read(self.unit, self.channel, &mut raw) })
                .map_err(|e| SensorError::ReadFailed(e.code()))?;

            let mut mv: i32 = 0;
            // SAFETY: `cali` was created for this unit/channel/attenuation.
            esp!(unsafe { adc_cali_raw_to_voltage(self.cali, raw, &mut mv) })
                .map_err(|e| SensorError::CalibrationFailed(e.code()))?;
            sum_mv += i64::from(mv);
        }
        let avg_mv = sum_mv / i64::from(self.samples_per_read);
        Ok((avg_mv * 1000) as i32)
    }

    /// Return the injected voltage (or error).
    #[cfg(not(target_os = "espidf"))]
    pub fn read_microvolts(&mut self) -> Result<i32, SensorError> {
        match self.sim_error {
            Some(e) => Err(e),
            None => Ok(self.sim_microvolts),
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_microvolts(&mut self, microvolts: i32) {
        self.sim_microvolts = microvolts;
    }

    /// Make every following read fail with `error` (`None` clears it).
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_error(&mut self, error: Option<SensorError>) {
        self.sim_error = error;
    }
}
