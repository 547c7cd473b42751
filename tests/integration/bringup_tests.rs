//! Bring-up and end-to-end loop tests against the host-simulated drivers.

use adcscan::adapters::console::ConsoleAdapter;
use adcscan::adapters::delay::StdDelay;
use adcscan::adapters::hardware::AdcSensorAdapter;
use adcscan::app::banner::{self, CLEAR_SCREEN};
use adcscan::app::service::{SamplingController, Step};
use adcscan::config::{AdcConfig, ConsoleConfig, ScanConfig};
use adcscan::drivers::hw_init;
use adcscan::drivers::watchdog::{Watchdog, WatchdogDelay};
use adcscan::error::{ERR_INVALID_ARG, ERR_NOT_SUPPORTED, FatalInitError, InitStage, SensorError};

use crate::mock_hw::{MockDelay, RecordingSink};

fn bring_up(config: &ScanConfig) -> (ConsoleAdapter, AdcSensorAdapter) {
    hw_init::init_board(&config.adc).unwrap();
    let mut console = ConsoleAdapter::new(hw_init::init_console(&config.console).unwrap());
    banner::announce_startup(&mut console);
    let sensor = AdcSensorAdapter::new(hw_init::init_adc(&config.adc).unwrap());
    banner::announce_channel_ready(&mut console, config.channel);
    (console, sensor)
}

#[test]
fn banner_precedes_first_reading() {
    let config = ScanConfig::default();
    let (mut console, mut sensor) = bring_up(&config);
    sensor.adc_mut().sim_set_microvolts(1_650_000);

    let mut ctl = SamplingController::new(&config);
    let mut delay = MockDelay::new();
    let mut sink = RecordingSink::new();
    ctl.start(&mut sink);
    ctl.step(&mut console, &mut sensor, &mut delay, &mut sink);

    let out = console.uart_mut().sim_take_tx();
    assert!(out.starts_with(CLEAR_SCREEN));
    assert!(out.contains("ESP32-S3: ADC scan using HAL\r\n"));
    assert!(out.contains("Provide input voltage at the channel 0 input pin.\r\n"));
    assert!(out.ends_with("Channel 0 input: 1650mV\r\n"));
}

#[test]
fn commands_arrive_over_the_uart() {
    let config = ScanConfig::default();
    let (mut console, mut sensor) = bring_up(&config);
    console.uart_mut().sim_take_tx();
    sensor.adc_mut().sim_set_microvolts(2_000_000);

    let mut ctl = SamplingController::new(&config);
    let mut delay = MockDelay::new();
    let mut sink = RecordingSink::new();

    console.uart_mut().sim_push_rx(b"241");
    assert_eq!(
        ctl.step(&mut console, &mut sensor, &mut delay, &mut sink),
        Step::Sampled { delay_ms: 4000 }
    );
    assert_eq!(console.uart_mut().sim_rx_pending(), 1);
    assert_eq!(ctl.step(&mut console, &mut sensor, &mut delay, &mut sink), Step::Idle);

    assert_eq!(console.uart_mut().sim_take_tx(), "Channel 0 input: 2000mV\r\n");
    assert_eq!(delay.sleeps_ms, vec![4000]);
    assert_eq!(sensor.reads(), 1);
}

#[test]
fn host_delay_serves_zero_second_scan() {
    let config = ScanConfig::default();
    let (mut console, mut sensor) = bring_up(&config);
    console.uart_mut().sim_take_tx();
    sensor.adc_mut().sim_set_microvolts(750_000);

    let mut ctl = SamplingController::new(&config);
    let mut delay = WatchdogDelay::new(StdDelay, Watchdog::new());
    let mut sink = RecordingSink::new();

    console.uart_mut().sim_push_rx(b"20");
    for _ in 0..3 {
        assert_eq!(
            ctl.step(&mut console, &mut sensor, &mut delay, &mut sink),
            Step::Sampled { delay_ms: 0 }
        );
    }
    assert_eq!(console.uart_mut().sim_take_tx(), "Channel 0 input:  750mV\r\n".repeat(3));
    assert_eq!(delay.watchdog().feeds(), 0);
}

#[test]
fn driver_failure_counted_by_adapter() {
    let config = ScanConfig::default();
    let (mut console, mut sensor) = bring_up(&config);
    console.uart_mut().sim_take_tx();
    sensor.adc_mut().sim_set_error(Some(SensorError::CalibrationFailed(ERR_INVALID_ARG)));

    let mut ctl = SamplingController::new(&config);
    let mut delay = MockDelay::new();
    let mut sink = RecordingSink::new();
    assert_eq!(
        ctl.step(&mut console, &mut sensor, &mut delay, &mut sink),
        Step::SampleFailed { delay_ms: 200 }
    );
    assert_eq!(sensor.failures(), 1);
    assert!(console.uart_mut().sim_take_tx().is_empty());
}

#[test]
fn unsupported_resolution_is_fatal_at_configure() {
    let cfg = AdcConfig {
        resolution_bits: 10,
        ..AdcConfig::default()
    };
    let err = hw_init::init_adc(&cfg).err().unwrap();
    assert_eq!(err, FatalInitError::new(InitStage::AdcConfigure, ERR_NOT_SUPPORTED));
    assert_eq!(err.to_string(), "ADC configuration update failed. Error: 262");
}

#[test]
fn non_adc_pin_is_fatal_at_channel_setup() {
    let cfg = AdcConfig {
        input_gpio: 20,
        ..AdcConfig::default()
    };
    let err = hw_init::init_adc(&cfg).err().unwrap();
    assert_eq!(err.stage, InitStage::AdcChannel);
}

#[test]
fn zero_baud_is_fatal_at_console() {
    let cfg = ConsoleConfig {
        baud: 0,
        ..ConsoleConfig::default()
    };
    let err = hw_init::init_console(&cfg).err().unwrap();
    assert_eq!(err, FatalInitError::new(InitStage::Console, ERR_INVALID_ARG));
}
