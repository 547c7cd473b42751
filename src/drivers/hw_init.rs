//! One-shot hardware bring-up.
//!
//! Board preparation, the debug console UART, and the ADC channel, in
//! that order.  Every step returns [`FatalInitError`] tagged with the
//! failing stage; `main` decides what a failure means (it halts).
//!
//! The configuration checks shared by both targets live in
//! [`check_adc_config`] so host tests see the same rejections as the
//! board.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::config::{AdcConfig, ConsoleConfig, VoltageReference};
use crate::error::{ERR_INVALID_ARG, ERR_NOT_SUPPORTED, FatalInitError, InitStage};

use super::adc::AdcChannel;
use super::uart::UartConsole;

/// Resolution the S3's SAR ADC converts at.
pub const SUPPORTED_RESOLUTION_BITS: u8 = 12;

/// Highest GPIO number on the ESP32-S3.
const MAX_GPIO: i32 = 48;

/// ADC1 channel for a GPIO.  ADC1_CH0..CH9 are bonded to GPIO 1..=10.
pub fn adc1_channel_for_gpio(gpio: i32) -> Option<u32> {
    (1..=10).contains(&gpio).then(|| (gpio - 1) as u32)
}

/// Reject configurations the oneshot driver cannot honour.
pub fn check_adc_config(cfg: &AdcConfig) -> Result<(), FatalInitError> {
    let configure_err = |code| Err(FatalInitError::new(InitStage::AdcConfigure, code));
    if cfg.resolution_bits != SUPPORTED_RESOLUTION_BITS {
        return configure_err(ERR_NOT_SUPPORTED);
    }
    if cfg.continuous_scanning {
        return configure_err(ERR_NOT_SUPPORTED);
    }
    if cfg.average_count == 0 || cfg.min_acquisition_ns == 0 {
        return configure_err(ERR_INVALID_ARG);
    }
    Ok(())
}

/// Input attenuation standing in for the reference selection.  The S3
/// converts against a fixed ~1.1 V reference; 12 dB stretches the range to
/// roughly the supply rail.  `min_acquisition_ns` and `vneg` have no
/// hardware counterpart and are not applied.
pub fn attenuation_db(vref: VoltageReference) -> u8 {
    match vref {
        VoltageReference::Vdda => 12,
        VoltageReference::Internal => 0,
    }
}

fn samples_per_read(cfg: &AdcConfig) -> u8 {
    if cfg.enable_averaging { cfg.average_count } else { 1 }
}

// ── Board ─────────────────────────────────────────────────────

/// Put the analog input pin into its reset state (no pulls, no output).
#[cfg(target_os = "espidf")]
pub fn init_board(adc: &AdcConfig) -> Result<(), FatalInitError> {
    // SAFETY: called once from main() before the loop; single-threaded.
    esp!(unsafe { gpio_reset_pin(adc.input_gpio) })
        .map_err(|e| FatalInitError::new(InitStage::Board, e.code()))?;
    info!("hw_init: GPIO {} reset for analog input", adc.input_gpio);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_board(adc: &AdcConfig) -> Result<(), FatalInitError> {
    if !(0..=MAX_GPIO).contains(&adc.input_gpio) {
        return Err(FatalInitError::new(InitStage::Board, ERR_INVALID_ARG));
    }
    log::info!("hw_init(sim): board init skipped");
    Ok(())
}

// ── Console ───────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
const UART_PIN_NO_CHANGE: i32 = -1;

/// Install the UART driver on the console port (8N1, no flow control).
#[cfg(target_os = "espidf")]
pub fn init_console(cfg: &ConsoleConfig) -> Result<UartConsole, FatalInitError> {
    use crate::pins::{CONSOLE_RX_BUF_LEN, CONSOLE_UART_PORT};

    let fail = |e: EspError| FatalInitError::new(InitStage::Console, e.code());
    if cfg.baud == 0 || !(0..=MAX_GPIO).contains(&cfg.tx_gpio) || !(0..=MAX_GPIO).contains(&cfg.rx_gpio) {
        return Err(FatalInitError::new(InitStage::Console, ERR_INVALID_ARG));
    }

    let uart_cfg = uart_config_t {
        baud_rate: cfg.baud as i32,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };

    // SAFETY: called once from main() before the loop; single-threaded.
    unsafe {
        esp!(uart_param_config(CONSOLE_UART_PORT, &uart_cfg)).map_err(fail)?;
        esp!(uart_set_pin(
            CONSOLE_UART_PORT,
            cfg.tx_gpio,
            cfg.rx_gpio,
            UART_PIN_NO_CHANGE,
            UART_PIN_NO_CHANGE,
        ))
        .map_err(fail)?;
        esp!(uart_driver_install(
            CONSOLE_UART_PORT,
            CONSOLE_RX_BUF_LEN,
            0,
            0,
            core::ptr::null_mut(),
            0,
        ))
        .map_err(fail)?;
    }

    info!("hw_init: console UART{} at {} baud", CONSOLE_UART_PORT, cfg.baud);
    Ok(UartConsole::from_port(CONSOLE_UART_PORT))
}

#[cfg(not(target_os = "espidf"))]
pub fn init_console(cfg: &ConsoleConfig) -> Result<UartConsole, FatalInitError> {
    if cfg.baud == 0 || !(0..=MAX_GPIO).contains(&cfg.tx_gpio) || !(0..=MAX_GPIO).contains(&cfg.rx_gpio) {
        return Err(FatalInitError::new(InitStage::Console, ERR_INVALID_ARG));
    }
    log::info!("hw_init(sim): console at {} baud", cfg.baud);
    Ok(UartConsole::simulated())
}

// ── ADC ───────────────────────────────────────────────────────

/// Acquire ADC1, set up the single-ended channel, then apply resolution
/// and reference and create the raw-to-voltage calibration.
#[cfg(target_os = "espidf")]
pub fn init_adc(cfg: &AdcConfig) -> Result<AdcChannel, FatalInitError> {
    // Unit
    let unit_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    let mut unit: adc_oneshot_unit_handle_t = core::ptr::null_mut();
    // SAFETY: called once from main() before the loop; `unit` outlives the call.
    esp!(unsafe { adc_oneshot_new_unit(&unit_cfg, &mut unit) })
        .map_err(|e| FatalInitError::new(InitStage::AdcUnit, e.code()))?;

    // Channel
    let channel = adc1_channel_for_gpio(cfg.input_gpio)
        .ok_or(FatalInitError::new(InitStage::AdcChannel, ERR_INVALID_ARG))?;
    let default_chan = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_DEFAULT,
    };
    // SAFETY: `unit` is the handle created above.
    esp!(unsafe { adc_oneshot_config_channel(unit, channel, &default_chan) })
        .map_err(|e| FatalInitError::new(InitStage::AdcChannel, e.code()))?;

    // Configure
    check_adc_config(cfg)?;
    let atten = match attenuation_db(cfg.vref) {
        0 => adc_atten_t_ADC_ATTEN_DB_0,
        _ => adc_atten_t_ADC_ATTEN_DB_12,
    };
    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    let configure_err = |e: EspError| FatalInitError::new(InitStage::AdcConfigure, e.code());
    // SAFETY: as above.
    esp!(unsafe { adc_oneshot_config_channel(unit, channel, &chan_cfg) }).map_err(configure_err)?;

    let cali_cfg = adc_cali_curve_fitting_config_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        chan: channel,
        atten,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    let mut cali: adc_cali_handle_t = core::ptr::null_mut();
    // SAFETY: `cali` outlives the call; the scheme matches the channel config.
    esp!(unsafe { adc_cali_create_scheme_curve_fitting(&cali_cfg, &mut cali) }).map_err(configure_err)?;

    info!(
        "hw_init: ADC1 CH{} on GPIO {} ({}-bit, {} sample(s)/read)",
        channel,
        cfg.input_gpio,
        cfg.resolution_bits,
        samples_per_read(cfg)
    );
    Ok(AdcChannel::from_handles(unit, cali, channel, samples_per_read(cfg)))
}

#[cfg(not(target_os = "espidf"))]
pub fn init_adc(cfg: &AdcConfig) -> Result<AdcChannel, FatalInitError> {
    if adc1_channel_for_gpio(cfg.input_gpio).is_none() {
        return Err(FatalInitError::new(InitStage::AdcChannel, ERR_INVALID_ARG));
    }
    check_adc_config(cfg)?;
    log::info!("hw_init(sim): ADC channel on GPIO {}", cfg.input_gpio);
    Ok(AdcChannel::simulated(samples_per_read(cfg)))
}
