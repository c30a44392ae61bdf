//! Table-driven alert state machine.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  StateTable                                              │
//! │  ┌──────────┬───────────┬──────────────────────────────┐ │
//! │  │ Mode     │ on_enter  │ on_trigger                   │ │
//! │  ├──────────┼───────────┼──────────────────────────────┤ │
//! │  │ Idle     │ fn(state) │ fn(rules, state, trigger)    │ │
//! │  │ Alerting │ fn(state) │   -> Option<Reaction>        │ │
//! │  └──────────┴───────────┴──────────────────────────────┘ │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Every trigger is routed to the `on_trigger` handler of the **current**
//! mode.  The handler is pure: it inspects the rules and the state and
//! returns a [`Reaction`] describing what the station should do.  The
//! station service carries the reaction out, calling back into
//! [`AlertMachine::transition`] whenever the reaction changes mode.  That
//! call is the only way the mode ever changes.

pub mod context;
pub mod states;

use log::info;
use serde::Serialize;

use context::{Rules, Scene, StationState};

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Station mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Mode {
    #[default]
    Idle = 0,
    Alerting = 1,
}

impl Mode {
    /// Total number of modes — used to size the table array.
    pub const COUNT: usize = 2;
}

/// What raised an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Doorbell,
    Sound,
    Light,
    Fire,
}

/// Inputs the state machine understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    /// Button went down.
    Pushed,
    /// Button came back up.
    Released,
    /// Touch pad pressed.
    Doorbell,
    /// Sound sensor sample.
    Sound(u16),
    /// Light sensor sample.
    Light(u16),
    /// Periodic temperature check (Celsius).
    Temperature(f32),
}

/// What the station should do in response to a trigger.
#[derive(Debug, Clone, PartialEq)]
pub enum Reaction {
    /// Show the scene; mode unchanged.
    Feedback(Scene),
    /// Enter `Alerting`, show the scene, block the whole station for
    /// `hold_ms`, then return to `Idle` and restore the baseline.
    TimedAlert {
        kind: AlertKind,
        scene: Scene,
        hold_ms: u32,
    },
    /// Enter (or stay in) `Alerting` and show the scene.  No timer: the
    /// alert stays until a later trigger unlatches it.
    Latch { kind: AlertKind, scene: Scene },
    /// Leave a latched alert and show the scene.
    Unlatch { kind: AlertKind, scene: Scene },
}

// ---------------------------------------------------------------------------
// Handler signatures
// ---------------------------------------------------------------------------

/// Runs once whenever the machine enters a mode.
pub type EnterFn = fn(&mut StationState);

/// Maps a trigger to a reaction for one mode.  `None` means "ignore".
pub type TriggerFn = fn(&Rules, &StationState, Trigger) -> Option<Reaction>;

/// Static descriptor for a single mode.  Its position in the table is
/// the mode's discriminant.
pub struct StateDescriptor {
    pub name: &'static str,
    pub on_enter: Option<EnterFn>,
    pub on_trigger: TriggerFn,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

pub struct AlertMachine {
    /// Fixed-size table indexed by `Mode as usize`.
    table: [StateDescriptor; Mode::COUNT],
    rules: Rules,
    transitions: u64,
}

impl AlertMachine {
    pub fn new(table: [StateDescriptor; Mode::COUNT], rules: Rules) -> Self {
        Self {
            table,
            rules,
            transitions: 0,
        }
    }

    /// Run the `on_enter` for the state's current mode.  Call once at startup.
    pub fn start(&self, state: &mut StationState) {
        let desc = &self.table[state.mode() as usize];
        info!("Alert FSM starting in mode: {}", desc.name);
        if let Some(enter) = desc.on_enter {
            enter(state);
        }
    }

    /// Ask the current mode's handler what to do with `trigger`.
    pub fn react(&self, state: &StationState, trigger: Trigger) -> Option<Reaction> {
        (self.table[state.mode() as usize].on_trigger)(&self.rules, state, trigger)
    }

    /// Move to `next`, running its `on_enter`.  No-op if already there.
    pub fn transition(&mut self, state: &mut StationState, next: Mode) {
        let current = state.mode();
        if current == next {
            return;
        }
        info!(
            "Alert FSM transition: {} -> {}",
            self.table[current as usize].name,
            self.table[next as usize].name
        );
        state.set_mode(next);
        self.transitions += 1;
        if let Some(enter) = self.table[next as usize].on_enter {
            enter(state);
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Mode changes since startup.
    pub fn transition_count(&self) -> u64 {
        self.transitions
    }
}
