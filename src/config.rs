//! Scan configuration parameters
//!
//! Everything the sampling loop and the ADC bring-up need, built once in
//! `main` and handed to constructors by value.  There is no runtime
//! persistence; the defaults below are the shipped behaviour.

use serde::{Deserialize, Serialize};

use crate::pins;

/// Microvolts per millivolt.
pub const MICRO_TO_MILLI: i32 = 1000;

/// Minimum ADC acquisition time in nanoseconds.
pub const ACQUISITION_TIME_NS: u32 = 1000;

/// Default pause between samples in milliseconds.
pub const ADC_SCAN_DELAY_MS: u32 = 200;

/// Console baud rate.
pub const CONSOLE_BAUD: u32 = 115_200;

/// Positive input reference for single-ended conversions.
///
/// The S3 SAR ADC has no selectable reference; the full-scale range is set
/// by input attenuation instead.  `Vdda` selects 12 dB (about 0..3.1 V),
/// `Internal` selects 0 dB, which measures directly against the ~1.1 V
/// internal reference (about 0..0.95 V).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoltageReference {
    /// Analog supply rail.
    Vdda,
    /// On-chip bandgap reference.
    Internal,
}

/// Negative input for single-ended conversions.  Single-ended inputs on
/// the S3 are always measured against analog ground, so this is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NegativeInput {
    /// Analog ground.
    Vssa,
}

/// How the byte following a set-delay command is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelayDigitPolicy {
    /// Only `'0'..='9'` is accepted; any other byte leaves the delay alone.
    Validate,
    /// Any byte is accepted: `(byte - '0') * 1000` in wrapping `u32` arithmetic.
    Wrapping,
}

/// ADC unit and channel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdcConfig {
    /// Conversion resolution in bits.
    pub resolution_bits: u8,
    /// Free-running conversions instead of one conversion per read.
    pub continuous_scanning: bool,
    /// Samples averaged per read (1 = averaging disabled).
    pub average_count: u8,
    /// Per-channel averaging switch.
    pub enable_averaging: bool,
    /// Minimum sample-and-hold acquisition time.  Checked for non-zero
    /// only: the ESP-IDF oneshot driver has no acquisition-time setting and
    /// samples with its fixed internal timing.
    pub min_acquisition_ns: u32,
    pub vref: VoltageReference,
    /// Carried for completeness; not written to hardware (see
    /// [`NegativeInput`]).
    pub vneg: NegativeInput,
    /// GPIO wired to the channel 0 input.
    pub input_gpio: i32,
}

impl Default for AdcConfig {
    fn default() -> Self {
        Self {
            resolution_bits: 12,
            continuous_scanning: false,
            average_count: 1,
            enable_averaging: false,
            min_acquisition_ns: ACQUISITION_TIME_NS,
            vref: VoltageReference::Vdda,
            vneg: NegativeInput::Vssa,
            input_gpio: pins::ADC_CH0_GPIO,
        }
    }
}

/// Debug console UART settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub baud: u32,
    pub tx_gpio: i32,
    pub rx_gpio: i32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            baud: CONSOLE_BAUD,
            tx_gpio: pins::CONSOLE_TX_GPIO,
            rx_gpio: pins::CONSOLE_RX_GPIO,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    pub adc: AdcConfig,
    pub console: ConsoleConfig,
    /// Logical channel number printed in each report line.
    pub channel: u8,
    /// Scan delay before any set-delay command arrives.
    pub initial_scan_delay_ms: u32,
    /// Whether the loop starts in the running state.
    pub start_sampling: bool,
    pub digit_policy: DelayDigitPolicy,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            adc: AdcConfig::default(),
            console: ConsoleConfig::default(),
            channel: 0,
            initial_scan_delay_ms: ADC_SCAN_DELAY_MS,
            start_sampling: true,
            digit_policy: DelayDigitPolicy::Validate,
        }
    }
}

impl ScanConfig {
    /// Range-check values that would otherwise fail deep inside a driver.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.adc.resolution_bits == 0 || self.adc.resolution_bits > 16 {
            return Err(ConfigError::ValidationFailed(
                "adc.resolution_bits must be 1..=16",
            ));
        }
        if self.adc.average_count == 0 {
            return Err(ConfigError::ValidationFailed(
                "adc.average_count must be at least 1",
            ));
        }
        if self.adc.enable_averaging && self.adc.average_count == 1 {
            return Err(ConfigError::ValidationFailed(
                "adc.enable_averaging needs average_count > 1",
            ));
        }
        if self.adc.min_acquisition_ns == 0 {
            return Err(ConfigError::ValidationFailed(
                "adc.min_acquisition_ns must be non-zero",
            ));
        }
        if self.console.baud == 0 {
            return Err(ConfigError::ValidationFailed("console.baud must be non-zero"));
        }
        Ok(())
    }
}

/// Errors from [`ScanConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed range validation.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
