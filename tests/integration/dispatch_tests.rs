//! Dispatcher ordering and timing through the full station wiring.

use crate::mock_hw::{OutputCall, Rig};

use sensorstation::app::events::AppEvent;
use sensorstation::config::StationConfig;
use sensorstation::pins;

fn readouts(calls: &[OutputCall]) -> usize {
    calls
        .iter()
        .filter(|c| matches!(c, OutputCall::Text(t) if t.starts_with("Temp:")))
        .count()
}

#[test]
fn fire_check_runs_once_per_interval() {
    let mut rig = Rig::new();
    rig.hw.clear_calls();
    for _ in 0..99 {
        rig.step();
    }
    assert_eq!(readouts(&rig.hw.calls()), 0, "first check one interval after arming");
    rig.step();
    assert_eq!(readouts(&rig.hw.calls()), 1);
}

#[test]
fn tick_during_hold_fires_late_not_dropped() {
    let mut rig = Rig::new();

    // Walk up to just before the first fire check.
    for _ in 0..98 {
        rig.step();
    }
    assert_eq!(rig.clock_now(), 980);
    rig.hw.clear_calls();

    // Doorbell at 990 holds until 1990; the check due at 1000 is skipped over.
    rig.press(pins::TOUCH_PIN);
    assert_eq!(rig.clock_now(), 1990);
    assert_eq!(readouts(&rig.hw.calls()), 0);

    // First cycle after the hold: the late tick fires, exactly once.
    rig.step();
    assert_eq!(readouts(&rig.hw.calls()), 1);

    // Cadence restarts from the late tick (2000), not from 1000.
    for _ in 0..99 {
        rig.step();
    }
    assert_eq!(rig.clock_now(), 2990);
    assert_eq!(readouts(&rig.hw.calls()), 1);
    rig.step();
    assert_eq!(readouts(&rig.hw.calls()), 2);
}

#[test]
fn events_in_one_cycle_keep_arrival_order() {
    let mut rig = Rig::new();
    rig.hw.clear_calls();

    // Button (slot 0) and sound (slot 3) in the same cycle: button first.
    rig.inputs.set_digital(pins::BUTTON_PIN, true);
    rig.inputs.set_analog(pins::SOUND_ADC, 500);
    rig.step();

    let texts: Vec<_> = rig
        .hw
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            OutputCall::Text(t) => Some(t),
            _ => None,
        })
        .collect();
    assert_eq!(texts, ["On!", "Sound detected", "Airlock ready."]);
}

#[test]
fn repeated_triggers_cannot_overlap() {
    let mut rig = Rig::new();
    rig.hw.clear_calls();

    // Sound stays loud: each cycle raises one full alert, never two at once.
    rig.inputs.set_analog(pins::SOUND_ADC, 4095);
    rig.step();
    rig.step();

    let calls = rig.hw.calls();
    let holds: Vec<_> = calls
        .iter()
        .enumerate()
        .filter(|(_, c)| matches!(c, OutputCall::Hold(_)))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(holds.len(), 2);
    // Baseline restored between the two holds.
    assert!(calls[holds[0]..holds[1]].contains(&OutputCall::Text("Airlock ready.".into())));
}

#[test]
fn status_reports_follow_their_interval() {
    let config = StationConfig {
        status_interval_ms: 50,
        ..StationConfig::default()
    };
    let mut rig = Rig::with_config(config);
    for _ in 0..10 {
        rig.step();
    }
    let reports = rig
        .sink
        .events()
        .iter()
        .filter(|e| matches!(e, AppEvent::Status { .. }))
        .count();
    assert_eq!(reports, 2);
}

#[test]
fn zero_status_interval_disables_reports() {
    let config = StationConfig {
        status_interval_ms: 0,
        ..StationConfig::default()
    };
    let rig = Rig::with_config(config);
    assert_eq!(rig.dispatcher.task_count(), 1);
}
