//! Unified error types for the ADC scan firmware.
//!
//! A single `Error` enum that every subsystem converts into, plus the one
//! fatal kind the bring-up path can produce.  All variants are `Copy` so
//! they can be passed through events and logged without allocation.

use core::fmt;

use crate::config::ConfigError;

// ---------------------------------------------------------------------------
// ESP-IDF error codes
// ---------------------------------------------------------------------------

/// `ESP_FAIL`.
pub const ERR_FAIL: i32 = -1;
/// `ESP_ERR_INVALID_ARG`.
pub const ERR_INVALID_ARG: i32 = 0x102;
/// `ESP_ERR_INVALID_STATE`.
pub const ERR_INVALID_STATE: i32 = 0x103;
/// `ESP_ERR_NOT_SUPPORTED`.
pub const ERR_NOT_SUPPORTED: i32 = 0x106;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Bring-up failed; the program must halt.
    FatalInit(FatalInitError),
    /// A voltage sample could not be taken.
    Sensor(SensorError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FatalInit(e) => write!(f, "fatal: {e}"),
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Fatal bring-up errors
// ---------------------------------------------------------------------------

/// Which bring-up step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStage {
    /// Board-level pin and clock preparation.
    Board,
    /// Debug console UART driver.
    Console,
    /// ADC unit acquisition.
    AdcUnit,
    /// Single-ended channel setup on the ADC unit.
    AdcChannel,
    /// Resolution / reference / conversion update.
    AdcConfigure,
}

impl fmt::Display for InitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Board => write!(f, "Board initialization"),
            Self::Console => write!(f, "Console initialization"),
            Self::AdcUnit => write!(f, "ADC initialization"),
            Self::AdcChannel => write!(f, "ADC single ended channel initialization"),
            Self::AdcConfigure => write!(f, "ADC configuration update"),
        }
    }
}

/// Unrecoverable failure during bring-up.  `code` is the `esp_err_t`
/// returned by the failing driver call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FatalInitError {
    pub stage: InitStage,
    pub code: i32,
}

impl FatalInitError {
    pub const fn new(stage: InitStage, code: i32) -> Self {
        Self { stage, code }
    }
}

impl fmt::Display for FatalInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed. Error: {}", self.stage, self.code)
    }
}

impl std::error::Error for FatalInitError {}

impl From<FatalInitError> for Error {
    fn from(e: FatalInitError) -> Self {
        Self::FatalInit(e)
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The oneshot conversion returned an error code.
    ReadFailed(i32),
    /// Raw-to-voltage conversion failed.
    CalibrationFailed(i32),
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed(rc) => write!(f, "ADC read failed (rc={rc})"),
            Self::CalibrationFailed(rc) => write!(f, "ADC voltage conversion failed (rc={rc})"),
        }
    }
}

impl std::error::Error for SensorError {}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
