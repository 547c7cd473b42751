//! Integration tests for the poll → sample → report → sleep loop.

use crate::mock_hw::{MockConsole, MockDelay, MockSensor, RecordingSink};

use adcscan::app::events::AppEvent;
use adcscan::app::service::{SamplingController, Step};
use adcscan::config::{DelayDigitPolicy, ScanConfig};
use adcscan::error::SensorError;
use adcscan::fsm::RunState;

struct Rig {
    ctl: SamplingController,
    console: MockConsole,
    sensor: MockSensor,
    delay: MockDelay,
    sink: RecordingSink,
}

impl Rig {
    fn with_config(config: &ScanConfig, microvolts: i32) -> Self {
        let mut sink = RecordingSink::new();
        let mut ctl = SamplingController::new(config);
        ctl.start(&mut sink);
        Self {
            ctl,
            console: MockConsole::new(),
            sensor: MockSensor::reading(microvolts),
            delay: MockDelay::new(),
            sink,
        }
    }

    fn new(microvolts: i32) -> Self {
        Self::with_config(&ScanConfig::default(), microvolts)
    }

    fn step(&mut self) -> Step {
        self.ctl
            .step(&mut self.console, &mut self.sensor, &mut self.delay, &mut self.sink)
    }
}

#[test]
fn starts_running_with_default_delay() {
    let rig = Rig::new(0);
    assert_eq!(rig.ctl.state(), RunState::Running);
    assert_eq!(rig.ctl.scan_delay_ms(), 200);
    assert_eq!(
        rig.sink.events.first(),
        Some(&AppEvent::Started {
            state: RunState::Running,
            scan_delay_ms: 200
        })
    );
}

#[test]
fn running_iteration_prints_then_sleeps_scan_delay() {
    let mut rig = Rig::new(1_650_000);

    assert_eq!(rig.step(), Step::Sampled { delay_ms: 200 });

    assert_eq!(rig.console.raw, "Channel 0 input: 1650mV\r\n");
    assert_eq!(rig.delay.sleeps_ms, vec![200]);
    assert_eq!(rig.ctl.samples_taken(), 1);
}

#[test]
fn one_line_per_scan_delay() {
    let mut rig = Rig::new(500_000);
    for _ in 0..5 {
        rig.step();
    }
    assert_eq!(rig.console.lines().len(), 5);
    assert_eq!(rig.delay.sleeps_ms, vec![200; 5]);
    assert_eq!(rig.delay.total_ms(), 1000);
}

#[test]
fn stopped_state_neither_prints_nor_sleeps() {
    let mut rig = Rig::new(1_000_000);
    rig.console.type_bytes(b"1");

    for _ in 0..100 {
        assert_eq!(rig.step(), Step::Idle);
    }

    assert!(rig.console.raw.is_empty());
    assert!(rig.delay.sleeps_ms.is_empty());
    assert_eq!(rig.sensor.reads, 0);
}

#[test]
fn toggle_twice_resumes_output() {
    let mut rig = Rig::new(1_650_000);
    rig.step();

    rig.console.type_bytes(b"1");
    assert_eq!(rig.step(), Step::Idle);
    assert_eq!(rig.step(), Step::Idle);

    rig.console.type_bytes(b"1");
    assert_eq!(rig.step(), Step::Sampled { delay_ms: 200 });

    assert_eq!(rig.ctl.state(), RunState::Running);
    assert_eq!(rig.console.lines(), vec!["Channel 0 input: 1650mV"; 2]);
    assert!(rig.sink.events.contains(&AppEvent::StateChanged {
        from: RunState::Running,
        to: RunState::Stopped
    }));
    assert!(rig.sink.events.contains(&AppEvent::StateChanged {
        from: RunState::Stopped,
        to: RunState::Running
    }));
}

#[test]
fn set_delay_five_seconds() {
    let mut rig = Rig::new(0);
    rig.console.type_bytes(b"25");

    assert_eq!(rig.step(), Step::Sampled { delay_ms: 5000 });
    assert_eq!(rig.ctl.scan_delay_ms(), 5000);
    assert_eq!(rig.delay.sleeps_ms, vec![5000]);
    assert!(rig.sink.events.contains(&AppEvent::ScanDelayChanged {
        from_ms: 200,
        to_ms: 5000
    }));
}

#[test]
fn set_delay_while_stopped_keeps_stopped() {
    let mut rig = Rig::new(0);
    rig.console.type_bytes(b"1");
    rig.step();
    rig.console.type_bytes(b"23");
    assert_eq!(rig.step(), Step::Idle);
    assert_eq!(rig.ctl.state(), RunState::Stopped);
    assert_eq!(rig.ctl.scan_delay_ms(), 3000);
}

#[test]
fn set_delay_without_argument_is_a_no_op() {
    let mut rig = Rig::new(0);
    rig.console.type_bytes(b"2");
    rig.step();
    assert_eq!(rig.ctl.scan_delay_ms(), 200);
    assert!(rig.sink.events.contains(&AppEvent::DelayArgumentMissing));

    // The next byte is a fresh command, not a late argument.
    rig.console.type_bytes(b"7");
    rig.step();
    assert_eq!(rig.ctl.scan_delay_ms(), 200);
    assert!(rig.sink.events.contains(&AppEvent::ByteIgnored(b'7')));
}

#[test]
fn non_digit_argument_rejected_by_default() {
    let mut rig = Rig::new(0);
    rig.console.type_bytes(b"2a");
    rig.step();
    assert_eq!(rig.ctl.scan_delay_ms(), 200);
    assert!(rig.sink.events.contains(&AppEvent::DelayDigitRejected(b'a')));
}

#[test]
fn wrapping_policy_accepts_any_byte() {
    let config = ScanConfig {
        digit_policy: DelayDigitPolicy::Wrapping,
        ..ScanConfig::default()
    };
    let mut rig = Rig::with_config(&config, 0);
    rig.console.type_bytes(b"2:");
    rig.step();
    assert_eq!(rig.ctl.scan_delay_ms(), 10_000);
}

#[test]
fn one_byte_consumed_per_iteration() {
    let mut rig = Rig::new(0);
    rig.console.type_bytes(b"xy1");
    rig.step();
    assert_eq!(rig.console.pending(), 2);
    rig.step();
    rig.step();
    assert_eq!(rig.ctl.state(), RunState::Stopped);
}

#[test]
fn failed_read_prints_nothing_but_keeps_cadence() {
    let mut rig = Rig::new(0);
    rig.sensor.fail_with = Some(SensorError::ReadFailed(-1));

    assert_eq!(rig.step(), Step::SampleFailed { delay_ms: 200 });
    assert!(rig.console.raw.is_empty());
    assert_eq!(rig.delay.sleeps_ms, vec![200]);
    assert!(rig.sink.events.contains(&AppEvent::SampleFailed(SensorError::ReadFailed(-1))));

    rig.sensor.fail_with = None;
    rig.sensor.microvolts = 3_300_000;
    rig.step();
    assert_eq!(rig.console.lines(), vec!["Channel 0 input: 3300mV"]);
}

#[test]
fn start_stopped_from_config() {
    let config = ScanConfig {
        start_sampling: false,
        ..ScanConfig::default()
    };
    let mut rig = Rig::with_config(&config, 0);
    assert_eq!(rig.step(), Step::Idle);
    rig.console.type_bytes(b"1");
    assert_eq!(rig.step(), Step::Sampled { delay_ms: 200 });
}

#[test]
fn long_wrapping_delay_keeps_watchdog_fed() {
    use adcscan::drivers::watchdog::{FEED_SLICE_MS, TIMEOUT_MS, Watchdog, WatchdogDelay};

    let config = ScanConfig {
        digit_policy: DelayDigitPolicy::Wrapping,
        ..ScanConfig::default()
    };
    let mut ctl = SamplingController::new(&config);
    let mut console = MockConsole::new();
    let mut sensor = MockSensor::reading(1_000_000);
    let mut delay = WatchdogDelay::new(MockDelay::new(), Watchdog::new());
    let mut sink = RecordingSink::new();

    console.type_bytes(b"2A");
    assert_eq!(
        ctl.step(&mut console, &mut sensor, &mut delay, &mut sink),
        Step::Sampled { delay_ms: 17_000 }
    );

    let sleeps = &delay.inner().sleeps_ms;
    assert_eq!(delay.inner().total_ms(), 17_000);
    assert!(sleeps.iter().all(|&ms| ms <= FEED_SLICE_MS && ms < TIMEOUT_MS));
    assert_eq!(delay.watchdog().feeds(), sleeps.len() as u64 - 1);
}
