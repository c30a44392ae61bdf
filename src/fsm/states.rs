//! Concrete mode handlers and table builder.
//!
//! Each mode is defined by plain `fn` pointers — no closures, no dynamic
//! dispatch, no heap.
//!
//! ```text
//!  IDLE ──[touch / sound ≥ 400 / light ≥ 700]──▶ ALERTING ──[hold elapsed]──▶ IDLE
//!  IDLE ──[temperature ≥ 40]──▶ ALERTING (latched) ──[temperature < 40]──▶ IDLE
//!
//!  IDLE: button push / release → momentary feedback, mode unchanged
//!  ALERTING (latched): button, touch, sound and light are ignored
//! ```
//!
//! Timed alerts pass through `Alerting` synchronously inside a single
//! dispatch, so the only trigger `Alerting` ever sees from the dispatcher
//! is the periodic temperature check of a latched fire alarm.

use log::{debug, info};

use super::context::{Rules, Scene, StationState};
use super::{AlertKind, Mode, Reaction, StateDescriptor, Trigger};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static mode table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; Mode::COUNT] {
    [
        // Index 0 — Idle
        StateDescriptor {
            name: "Idle",
            on_enter: Some(idle_enter),
            on_trigger: idle_trigger,
        },
        // Index 1 — Alerting
        StateDescriptor {
            name: "Alerting",
            on_enter: Some(alerting_enter),
            on_trigger: alerting_trigger,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(state: &mut StationState) {
    state.latched = None;
}

fn idle_trigger(rules: &Rules, _state: &StationState, trigger: Trigger) -> Option<Reaction> {
    match trigger {
        Trigger::Pushed => Some(Reaction::Feedback(Scene::active())),

        Trigger::Released => Some(Reaction::Feedback(Scene::baseline(rules))),

        Trigger::Doorbell => Some(Reaction::TimedAlert {
            kind: AlertKind::Doorbell,
            scene: Scene::doorbell(rules),
            hold_ms: rules.hold_ms,
        }),

        Trigger::Sound(level) if level >= rules.sound_threshold => Some(Reaction::TimedAlert {
            kind: AlertKind::Sound,
            scene: Scene::detection("Sound detected"),
            hold_ms: rules.hold_ms,
        }),

        Trigger::Light(level) if level >= rules.light_threshold => Some(Reaction::TimedAlert {
            kind: AlertKind::Light,
            scene: Scene::detection("Light detected"),
            hold_ms: rules.hold_ms,
        }),

        Trigger::Sound(_) | Trigger::Light(_) => None,

        Trigger::Temperature(celsius) if celsius >= rules.fire_threshold_c => {
            info!("IDLE: {:.1}C at or above {:.1}C, fire alarm", celsius, rules.fire_threshold_c);
            Some(Reaction::Latch {
                kind: AlertKind::Fire,
                scene: Scene::fire(celsius),
            })
        }

        Trigger::Temperature(celsius) => Some(Reaction::Feedback(Scene::readout(celsius))),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  ALERTING
// ═══════════════════════════════════════════════════════════════════════════

fn alerting_enter(state: &mut StationState) {
    state.alerts_raised = state.alerts_raised.saturating_add(1);
}

fn alerting_trigger(rules: &Rules, state: &StationState, trigger: Trigger) -> Option<Reaction> {
    let kind = state.latched?;

    match trigger {
        // Level-triggered: re-assert every check while hot.
        Trigger::Temperature(celsius) if celsius >= rules.fire_threshold_c => {
            Some(Reaction::Latch {
                kind,
                scene: Scene::fire(celsius),
            })
        }

        Trigger::Temperature(celsius) => {
            info!("ALERTING: {:.1}C below {:.1}C, fire alarm cleared", celsius, rules.fire_threshold_c);
            Some(Reaction::Unlatch {
                kind,
                scene: Scene::baseline(rules),
            })
        }

        other => {
            debug!("ALERTING: {:?} ignored while {:?} is latched", other, kind);
            None
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════
