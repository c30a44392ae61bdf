//! End-to-end station behaviour through the real dispatcher, sources and
//! handlers, against mock outputs.

use crate::mock_hw::{OutputCall, Rig};

use sensorstation::app::events::AppEvent;
use sensorstation::app::ports::{Indicator, Tone};
use sensorstation::config::StationConfig;
use sensorstation::fsm::{AlertKind, Mode};
use sensorstation::pins;

const GREEN: (u8, u8, u8) = (0, 255, 0);
const BLUE: (u8, u8, u8) = (0, 0, 255);
const RED: (u8, u8, u8) = (255, 0, 0);

fn holds(calls: &[OutputCall]) -> usize {
    calls.iter().filter(|c| matches!(c, OutputCall::Hold(_))).count()
}

// ── Startup ──────────────────────────────────────────────────

#[test]
fn starts_idle_with_ready_message_on_green() {
    let rig = Rig::new();
    let out = rig.hw.outputs();
    assert_eq!(rig.station.mode(), Mode::Idle);
    assert_eq!(out.text, "Airlock ready.");
    assert_eq!(out.color, GREEN);
    assert!(out.led(Indicator::Green));
    assert!(!out.led(Indicator::Red));
    assert!(!out.led(Indicator::Blue));
    assert_eq!(out.tone, Some(Tone::Off));
    assert_eq!(rig.sink.events().first(), Some(&AppEvent::Started { mode: Mode::Idle }));
}

// ── Button ───────────────────────────────────────────────────

#[test]
fn push_then_release_restores_baseline_exactly() {
    let mut rig = Rig::new();
    let before = rig.hw.outputs();

    rig.press(pins::BUTTON_PIN);
    let pushed = rig.hw.outputs();
    assert_eq!(pushed.text, "On!");
    assert_eq!(pushed.color, BLUE);
    assert!(pushed.led(Indicator::Blue));
    assert!(!pushed.led(Indicator::Green));
    assert_eq!(rig.station.mode(), Mode::Idle, "push is momentary feedback");

    rig.release(pins::BUTTON_PIN);
    assert_eq!(rig.hw.outputs(), before);
    assert_eq!(rig.station.mode(), Mode::Idle);
    assert_eq!(rig.station.transition_count(), 0);
}

#[test]
fn push_then_release_keeps_dial_brightness() {
    let mut rig = Rig::new();
    rig.inputs.set_analog(pins::ROTARY_ADC, 2048);
    rig.step();
    let before = rig.hw.outputs();
    assert!(before.led(Indicator::Blue));
    assert_eq!(before.brightness[2], 128);

    rig.press(pins::BUTTON_PIN);
    rig.release(pins::BUTTON_PIN);
    assert_eq!(rig.hw.outputs(), before);

    // The dial has not moved; the next samples leave it as it is.
    rig.step();
    assert_eq!(rig.hw.outputs(), before);
}

#[test]
fn timed_alert_keeps_dial_brightness() {
    let mut rig = Rig::new();
    rig.inputs.set_analog(pins::ROTARY_ADC, 4095);
    rig.step();
    let before = rig.hw.outputs();

    rig.press(pins::TOUCH_PIN);
    assert_eq!(rig.hw.outputs(), before);
    assert_eq!(rig.station.mode(), Mode::Idle);
}

#[test]
fn holding_the_button_emits_one_push() {
    let mut rig = Rig::new();
    rig.press(pins::BUTTON_PIN);
    rig.hw.clear_calls();
    rig.step();
    rig.step();
    assert!(
        !rig.hw.calls().iter().any(|c| matches!(c, OutputCall::Text(_))),
        "no edge while the level is steady"
    );
}

// ── Doorbell ─────────────────────────────────────────────────

#[test]
fn doorbell_holds_one_second_then_restores_baseline() {
    let mut rig = Rig::new();
    let before = rig.hw.outputs();
    rig.hw.clear_calls();
    let t0 = rig.clock_now();

    rig.press(pins::TOUCH_PIN);

    let calls = rig.hw.calls();
    let hold = calls.iter().position(|c| *c == OutputCall::Hold(1000)).unwrap();
    assert!(calls[..hold].contains(&OutputCall::Color(BLUE)));
    assert!(calls[..hold].iter().any(|c| matches!(c, OutputCall::Tone(Tone::Beep { hz: 262, .. }))));
    assert!(calls[hold..].contains(&OutputCall::Color(GREEN)));
    assert_eq!(rig.clock_now() - t0, 10 + 1000);

    assert_eq!(rig.hw.outputs(), before);
    assert_eq!(rig.station.mode(), Mode::Idle);
    assert_eq!(rig.station.state().alerts_raised, 1);

    let events = rig.sink.events();
    assert!(events.contains(&AppEvent::ModeChanged {
        from: Mode::Idle,
        to: Mode::Alerting
    }));
    assert!(events.contains(&AppEvent::AlertRaised {
        kind: AlertKind::Doorbell
    }));
    assert_eq!(
        events.last(),
        Some(&AppEvent::AlertCleared {
            kind: AlertKind::Doorbell
        })
    );
}

#[test]
fn touch_release_does_nothing() {
    let mut rig = Rig::new();
    rig.press(pins::TOUCH_PIN);
    rig.hw.clear_calls();
    rig.release(pins::TOUCH_PIN);
    assert_eq!(holds(&rig.hw.calls()), 0);
}

#[test]
fn touch_blocks_rotary_until_hold_completes() {
    let mut rig = Rig::new();
    rig.hw.clear_calls();

    // Both arrive in the same cycle; touch is polled first.
    rig.inputs.set_digital(pins::TOUCH_PIN, true);
    rig.inputs.set_analog(pins::ROTARY_ADC, 2048);
    rig.step();

    let calls = rig.hw.calls();
    let hold = calls.iter().position(|c| matches!(c, OutputCall::Hold(_))).unwrap();
    let dial = calls
        .iter()
        .position(|c| *c == OutputCall::Brightness(Indicator::Blue, 128))
        .expect("rotary event must still be delivered");
    assert!(dial > hold, "rotary ran during the hold: {:?}", calls);
    assert_eq!(rig.station.state().readings.rotary, Some(2048));
}

// ── Sound and light ──────────────────────────────────────────

#[test]
fn sound_threshold_is_inclusive() {
    let mut rig = Rig::new();
    rig.hw.clear_calls();

    rig.inputs.set_analog(pins::SOUND_ADC, 399);
    rig.step();
    assert_eq!(holds(&rig.hw.calls()), 0);

    rig.inputs.set_analog(pins::SOUND_ADC, 400);
    rig.step();
    let calls = rig.hw.calls();
    assert_eq!(holds(&calls), 1);
    assert!(calls.contains(&OutputCall::Text("Sound detected".into())));
    assert_eq!(rig.hw.outputs().text, "Airlock ready.");
}

#[test]
fn light_threshold_is_inclusive() {
    let mut rig = Rig::new();
    rig.hw.clear_calls();

    rig.inputs.set_analog(pins::LIGHT_ADC, 699);
    rig.step();
    assert_eq!(holds(&rig.hw.calls()), 0);

    rig.inputs.set_analog(pins::LIGHT_ADC, 700);
    rig.step();
    let calls = rig.hw.calls();
    assert_eq!(holds(&calls), 1);
    assert!(calls.contains(&OutputCall::Text("Light detected".into())));
    assert_eq!(rig.station.state().readings.light, Some(700));
}

// ── Fire alarm ───────────────────────────────────────────────

#[test]
fn fire_alarm_latches_until_a_cool_reading() {
    let mut rig = Rig::new();

    rig.hw.set_celsius(39.0);
    rig.next_fire_check();
    assert_eq!(rig.station.mode(), Mode::Idle);
    assert_eq!(rig.hw.outputs().text, "Temp: 39.0");

    rig.hw.set_celsius(40.0);
    rig.next_fire_check();
    let out = rig.hw.outputs();
    assert_eq!(rig.station.mode(), Mode::Alerting);
    assert_eq!(out.color, RED);
    assert!(out.led(Indicator::Red));
    assert_eq!(out.tone, Some(Tone::Continuous { hz: 349 }));

    // No timer: many checks later it is still asserted.
    rig.hw.set_celsius(41.0);
    for _ in 0..5 {
        rig.next_fire_check();
        assert_eq!(rig.station.mode(), Mode::Alerting);
        assert_eq!(rig.hw.outputs().tone, Some(Tone::Continuous { hz: 349 }));
    }
    assert!(!rig.sink.events().iter().any(|e| matches!(e, AppEvent::AlertCleared { .. })));

    rig.hw.set_celsius(39.9);
    rig.next_fire_check();
    let out = rig.hw.outputs();
    assert_eq!(rig.station.mode(), Mode::Idle);
    assert_eq!(rig.station.state().latched, None);
    assert_eq!(out.text, "Airlock ready.");
    assert_eq!(out.color, GREEN);
    assert_eq!(out.tone, Some(Tone::Off));
    assert!(!out.led(Indicator::Red));

    let raised = rig
        .sink
        .events()
        .iter()
        .filter(|e| **e == AppEvent::AlertRaised { kind: AlertKind::Fire })
        .count();
    assert_eq!(raised, 1);
}

#[test]
fn latched_fire_ignores_button_touch_sound_and_light() {
    let mut rig = Rig::new();
    rig.hw.set_celsius(45.0);
    rig.next_fire_check();
    rig.hw.clear_calls();

    rig.press(pins::BUTTON_PIN);
    rig.press(pins::TOUCH_PIN);
    rig.inputs.set_analog(pins::SOUND_ADC, 4000);
    rig.inputs.set_analog(pins::LIGHT_ADC, 4000);
    rig.step();

    let calls = rig.hw.calls();
    assert_eq!(holds(&calls), 0);
    assert!(!calls.iter().any(|c| matches!(c, OutputCall::Text(_))));
    assert_eq!(rig.hw.outputs().text, "Temp: 45.0");
    assert_eq!(rig.station.mode(), Mode::Alerting);
}

#[test]
fn side_channels_work_while_latched() {
    let mut rig = Rig::new();
    rig.hw.set_celsius(45.0);
    rig.next_fire_check();

    rig.inputs.set_analog(pins::ROTARY_ADC, 4095);
    rig.step();
    assert_eq!(rig.hw.outputs().brightness[2], 255);

    rig.heartbeat();
    rig.step();
    assert_eq!(rig.station.mode(), Mode::Alerting);
    assert!(rig
        .sink
        .events()
        .iter()
        .any(|e| matches!(e, AppEvent::Heartbeat { .. })));
}

// ── Side channels ────────────────────────────────────────────

#[test]
fn heartbeat_toggles_blue_each_message() {
    let mut rig = Rig::new();
    rig.heartbeat();
    rig.step();
    assert!(rig.hw.outputs().led(Indicator::Blue));

    rig.heartbeat();
    rig.step();
    assert!(!rig.hw.outputs().led(Indicator::Blue));

    let beats: Vec<_> = rig
        .sink
        .events()
        .into_iter()
        .filter_map(|e| match e {
            AppEvent::Heartbeat { indicator_on } => Some(indicator_on),
            _ => None,
        })
        .collect();
    assert_eq!(beats, [true, false]);
    assert_eq!(rig.station.mode(), Mode::Idle);
}

#[test]
fn rotary_maps_to_blue_brightness() {
    let mut rig = Rig::new();
    for (raw, level) in [(0, 0), (2048, 128), (4095, 255)] {
        // Move away first so every position is a change.
        rig.inputs.set_analog(pins::ROTARY_ADC, 1);
        rig.step();
        rig.inputs.set_analog(pins::ROTARY_ADC, raw);
        rig.step();
        assert_eq!(rig.hw.outputs().brightness[2], level, "raw {raw}");
    }
    assert_eq!(rig.station.mode(), Mode::Idle);
}

// ── Whole scenario ───────────────────────────────────────────

#[test]
fn end_to_end_scenario() {
    // Slow fire checks so the periodic readout stays out of the button
    // and doorbell steps.
    let config = StationConfig {
        fire_check_interval_ms: 60_000,
        ..StationConfig::default()
    };
    let mut rig = Rig::with_config(config);
    let baseline = rig.hw.outputs();
    assert_eq!(baseline.text, "Airlock ready.");
    assert_eq!(baseline.color, GREEN);

    rig.press(pins::BUTTON_PIN);
    assert_eq!(rig.hw.outputs().color, BLUE);
    assert_eq!(rig.station.mode(), Mode::Idle);

    rig.release(pins::BUTTON_PIN);
    assert_eq!(rig.hw.outputs(), baseline);

    rig.press(pins::TOUCH_PIN);
    rig.release(pins::TOUCH_PIN);
    assert!(rig.hw.calls().contains(&OutputCall::Hold(1000)));
    assert_eq!(rig.hw.outputs(), baseline);

    rig.hw.set_celsius(45.0);
    rig.next_fire_check();
    let out = rig.hw.outputs();
    assert_eq!(out.color, RED);
    assert_eq!(out.tone, Some(Tone::Continuous { hz: 349 }));
    rig.step();
    assert_eq!(rig.station.mode(), Mode::Alerting, "no auto-revert");

    rig.hw.set_celsius(30.0);
    rig.next_fire_check();
    assert_eq!(rig.hw.outputs(), baseline);
    assert_eq!(rig.station.mode(), Mode::Idle);
}

// ── Control plane ────────────────────────────────────────────

#[test]
fn devices_are_listed_without_side_effects() {
    let mut rig = Rig::new();
    rig.hw.clear_calls();
    let listed = rig.station.devices().len();
    let snap = rig.station.snapshot();
    assert_eq!(listed, pins::DEVICES.len());
    assert_eq!(snap.devices.len(), listed);
    assert_eq!(rig.station.device("screen").map(|d| d.pin), Some(pins::LCD_I2C_ADDR));
    assert!(rig.hw.calls().is_empty());
    rig.step();
    assert_eq!(rig.station.mode(), Mode::Idle);
}
