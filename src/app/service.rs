//! Station service — the hexagonal core.
//!
//! [`Station`] owns the alert FSM, the shared [`StationState`] and the
//! registered device list.  Handlers registered with the dispatcher call
//! into it; all I/O flows through the port traits it is generic over, so
//! the whole service runs against mock adapters in tests.
//!
//! ```text
//!  Dispatcher ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │        Station          │
//!  OutputSink ◀── │  FSM · State · Devices  │
//!  TempProbe  ──▶ └────────────────────────┘
//! ```
//!
//! A timed alert holds the station through [`DelayNs`].  While the hold
//! runs nothing else in the process executes on the dispatcher's context,
//! which is exactly the lock-out the alert needs.

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use log::{info, warn};
use serde::Serialize;

use crate::config::{LcdText, ScaleBounds, StationConfig};
use crate::error::PortError;
use crate::fsm::context::{Indicators, Readings, Rules, Scene, StationState};
use crate::fsm::states::build_state_table;
use crate::fsm::{AlertKind, AlertMachine, Mode, Reaction, Trigger};

use super::events::AppEvent;
use super::ports::{DevicePort, EventSink, Indicator, OutputSink, TemperatureProbe};

/// Maximum number of device ports a station can list.
pub const MAX_DEVICES: usize = 16;

/// Everything the station needs from the physical side.
pub trait StationHardware: OutputSink + TemperatureProbe + DelayNs {}

impl<T: OutputSink + TemperatureProbe + DelayNs> StationHardware for T {}

/// Point-in-time view of the station for the control plane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationSnapshot {
    pub name: LcdText,
    pub mode: Mode,
    pub latched: Option<AlertKind>,
    pub readings: Readings,
    pub indicators: Indicators,
    pub alerts_raised: u32,
    pub devices: Vec<DevicePort, MAX_DEVICES>,
}

// ───────────────────────────────────────────────────────────────
// Station
// ───────────────────────────────────────────────────────────────

pub struct Station<H, S> {
    hw: H,
    sink: S,
    machine: AlertMachine,
    state: StationState,
    scale: ScaleBounds,
    name: LcdText,
    devices: Vec<DevicePort, MAX_DEVICES>,
}

impl<H: StationHardware, S: EventSink> Station<H, S> {
    /// Build the station from a validated configuration.
    ///
    /// Does **not** touch the outputs — call [`start`](Self::start) next.
    pub fn new(config: &StationConfig, hw: H, sink: S) -> Self {
        Self {
            hw,
            sink,
            machine: AlertMachine::new(build_state_table(), Rules::from_config(config)),
            state: StationState::new(),
            scale: config.rotary_scale,
            name: config.name.clone(),
            devices: Vec::new(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Enter Idle and paint the baseline display.
    pub fn start(&mut self) {
        self.machine.start(&mut self.state);
        let baseline = Scene::baseline(self.machine.rules());
        self.apply(&baseline);
        self.sink.emit(&AppEvent::Started {
            mode: self.state.mode(),
        });
        info!("Station '{}' started in {:?}", self.name, self.state.mode());
    }

    // ── Inputs ────────────────────────────────────────────────

    /// Route a trigger through the state machine and carry out the reaction.
    pub fn fire(&mut self, trigger: Trigger) {
        let Some(reaction) = self.machine.react(&self.state, trigger) else {
            return;
        };

        match reaction {
            Reaction::Feedback(scene) => self.apply(&scene),

            Reaction::TimedAlert {
                kind,
                scene,
                hold_ms,
            } => {
                self.enter(Mode::Alerting);
                self.sink.emit(&AppEvent::AlertRaised { kind });
                self.apply(&scene);
                // Full stop: the dispatcher resumes only once the hold is over.
                self.hw.delay_ms(hold_ms);
                self.enter(Mode::Idle);
                let baseline = Scene::baseline(self.machine.rules());
                self.apply(&baseline);
                self.sink.emit(&AppEvent::AlertCleared { kind });
            }

            Reaction::Latch { kind, scene } => {
                let fresh = self.state.latched.is_none();
                self.enter(Mode::Alerting);
                self.state.latched = Some(kind);
                if fresh {
                    self.sink.emit(&AppEvent::AlertRaised { kind });
                }
                self.apply(&scene);
            }

            Reaction::Unlatch { kind, scene } => {
                self.enter(Mode::Idle);
                self.apply(&scene);
                self.sink.emit(&AppEvent::AlertCleared { kind });
            }
        }
    }

    /// New sound sample.
    pub fn sample_sound(&mut self, level: u16) {
        self.state.readings.sound = Some(level);
        self.fire(Trigger::Sound(level));
    }

    /// New light sample.
    pub fn sample_light(&mut self, level: u16) {
        self.state.readings.light = Some(level);
        self.fire(Trigger::Light(level));
    }

    /// Rotary side channel: blue LED brightness follows the dial.  The
    /// source samples continuously; only a changed position is applied.
    /// Never changes the mode.
    pub fn adjust_brightness(&mut self, raw: u16) {
        if self.state.readings.rotary == Some(raw) {
            return;
        }
        self.state.readings.rotary = Some(raw);
        let level = self.scale.apply(raw);
        self.hw.set_brightness(Indicator::Blue, level);
        self.state.indicators.blue = level > 0;
    }

    /// Heartbeat side channel: toggle the blue indicator.  Never changes
    /// the mode.
    pub fn heartbeat(&mut self) {
        let on = !self.state.indicators.blue;
        self.hw.set_indicator(Indicator::Blue, on);
        self.state.indicators.blue = on;
        self.sink.emit(&AppEvent::Heartbeat { indicator_on: on });
    }

    /// Periodic fire-alarm check.  A failed read skips this check; the
    /// latch, if any, stays as it is.
    pub fn check_temperature(&mut self) {
        match self.hw.read_celsius() {
            Ok(celsius) => {
                self.state.readings.temperature_c = Some(celsius);
                self.fire(Trigger::Temperature(celsius));
            }
            Err(e) => warn!("Fire check skipped: {}", e),
        }
    }

    /// Emit a status snapshot.
    pub fn report_status(&mut self) {
        let snapshot = self.snapshot();
        self.sink.emit(&AppEvent::Status { snapshot });
    }

    // ── Control plane ─────────────────────────────────────────

    /// Add a device to the listing.  Purely descriptive.
    pub fn register_device(&mut self, port: DevicePort) -> Result<(), PortError> {
        self.devices.push(port).map_err(|_| PortError::Rejected)
    }

    pub fn devices(&self) -> &[DevicePort] {
        &self.devices
    }

    /// Look up a registered device by name.
    pub fn device(&self, name: &str) -> Option<&DevicePort> {
        self.devices.iter().find(|d| d.name == name)
    }

    pub fn snapshot(&self) -> StationSnapshot {
        StationSnapshot {
            name: self.name.clone(),
            mode: self.state.mode(),
            latched: self.state.latched,
            readings: self.state.readings,
            indicators: self.state.indicators,
            alerts_raised: self.state.alerts_raised,
            devices: self.devices.clone(),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn state(&self) -> &StationState {
        &self.state
    }

    pub fn hardware(&self) -> &H {
        &self.hw
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mode changes since startup.
    pub fn transition_count(&self) -> u64 {
        self.machine.transition_count()
    }

    // ── Internal ──────────────────────────────────────────────

    /// Move the machine to `next` and report the change.
    fn enter(&mut self, next: Mode) {
        let from = self.state.mode();
        if from == next {
            return;
        }
        self.machine.transition(&mut self.state, next);
        self.sink.emit(&AppEvent::ModeChanged { from, to: next });
    }

    /// Blue level the dial last asked for.
    fn dial_level(&self) -> u8 {
        self.state.readings.rotary.map_or(0, |raw| self.scale.apply(raw))
    }

    /// Write a scene to the outputs: clear → text → color → tone.
    fn apply(&mut self, scene: &Scene) {
        if scene.clear {
            for led in Indicator::ALL {
                self.hw.set_indicator(led, false);
                self.state.indicators.set(led, false);
            }
            // The dial owns the blue level; a steady dial is never resampled.
            let dial = self.dial_level();
            if dial > 0 {
                self.hw.set_brightness(Indicator::Blue, dial);
                self.state.indicators.blue = true;
            }
        }
        if let Some(text) = &scene.text {
            info!("LCD: {}", text);
            self.hw.set_text(text);
        }
        if let Some(color) = scene.color {
            let led = color.indicator();
            self.hw.set_indicator(led, true);
            self.state.indicators.set(led, true);
            self.hw.set_color(color.rgb());
        }
        if let Some(tone) = scene.tone {
            self.hw.tone(tone);
        }
    }
}
