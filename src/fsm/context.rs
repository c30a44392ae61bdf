//! Station state and the output plans state handlers produce.
//!
//! [`StationState`] is the single mutable blackboard of the station: the
//! current mode, the last reading of every analog source, and the levels
//! last written to the indicator LEDs.  It is only ever touched from the
//! dispatcher's execution context, and the mode can only be changed by the
//! [`AlertMachine`](super::AlertMachine).
//!
//! [`Scene`] is what a state handler asks for; the station service applies
//! it to the output sink.

use core::fmt::Write as _;

use serde::Serialize;

use super::{AlertKind, Mode};
use crate::app::ports::{Indicator, Rgb, Tone};
use crate::config::{LcdText, StationConfig, lcd_text};

/// Middle C.
pub const C4_HZ: u16 = 262;
/// F above middle C.
pub const F4_HZ: u16 = 349;

// ---------------------------------------------------------------------------
// Readings
// ---------------------------------------------------------------------------

/// Last value seen from each analog source.  `None` until the first sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Readings {
    pub rotary: Option<u16>,
    pub sound: Option<u16>,
    pub light: Option<u16>,
    pub temperature_c: Option<f32>,
}

// ---------------------------------------------------------------------------
// Indicator levels
// ---------------------------------------------------------------------------

/// Levels last written to the indicator LEDs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Indicators {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl Indicators {
    pub fn set(&mut self, led: Indicator, on: bool) {
        match led {
            Indicator::Red => self.red = on,
            Indicator::Green => self.green = on,
            Indicator::Blue => self.blue = on,
        }
    }
}

// ---------------------------------------------------------------------------
// StationState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct StationState {
    mode: Mode,
    /// Latched alert, if any (only the fire alarm latches).
    pub latched: Option<AlertKind>,
    pub readings: Readings,
    pub indicators: Indicators,
    /// Alerts raised since startup.
    pub alerts_raised: u32,
}

impl StationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Only the state machine moves the mode.
    pub(super) fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }
}

// ---------------------------------------------------------------------------
// Colours
// ---------------------------------------------------------------------------

/// A station colour: one indicator LED plus the matching LCD backlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Blue,
}

impl Color {
    pub fn indicator(self) -> Indicator {
        match self {
            Self::Red => Indicator::Red,
            Self::Green => Indicator::Green,
            Self::Blue => Indicator::Blue,
        }
    }

    pub fn rgb(self) -> Rgb {
        match self {
            Self::Red => (255, 0, 0),
            Self::Green => (0, 255, 0),
            Self::Blue => (0, 0, 255),
        }
    }
}

// ---------------------------------------------------------------------------
// Scene (written by state handlers; applied by the station service)
// ---------------------------------------------------------------------------

/// An output plan.  Applied in field order: clear → text → color → tone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    /// Switch every indicator LED off first.
    pub clear: bool,
    pub text: Option<LcdText>,
    pub color: Option<Color>,
    pub tone: Option<Tone>,
}

impl Scene {
    /// The idle display: ready message on green, buzzer silent.
    pub fn baseline(rules: &Rules) -> Self {
        Self {
            clear: true,
            text: Some(rules.ready_message.clone()),
            color: Some(Color::Green),
            tone: Some(Tone::Off),
        }
    }

    /// Momentary feedback while the button is held.
    pub fn active() -> Self {
        Self {
            clear: true,
            text: Some(lcd_text("On!")),
            color: Some(Color::Blue),
            tone: None,
        }
    }

    /// Doorbell chime: blue plus a short note.
    pub fn doorbell(rules: &Rules) -> Self {
        Self {
            clear: true,
            text: None,
            color: Some(Color::Blue),
            tone: Some(Tone::Beep {
                hz: C4_HZ,
                ms: rules.doorbell_tone_ms,
            }),
        }
    }

    /// Sound or light detection: message on blue.
    pub fn detection(message: &str) -> Self {
        Self {
            clear: true,
            text: Some(lcd_text(message)),
            color: Some(Color::Blue),
            tone: None,
        }
    }

    /// Temperature readout only; leaves the LEDs alone.
    pub fn readout(celsius: f32) -> Self {
        Self {
            text: Some(temperature_text(celsius)),
            ..Self::default()
        }
    }

    /// Fire alarm: readout, red, continuous tone.
    pub fn fire(celsius: f32) -> Self {
        Self {
            clear: true,
            text: Some(temperature_text(celsius)),
            color: Some(Color::Red),
            tone: Some(Tone::Continuous { hz: F4_HZ }),
        }
    }
}

fn temperature_text(celsius: f32) -> LcdText {
    let mut text = LcdText::new();
    // Overflow truncates.
    let _ = write!(text, "Temp: {:.1}", celsius);
    text
}

// ---------------------------------------------------------------------------
// Rules (thresholds and fixed texts, built once from config)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Rules {
    pub sound_threshold: u16,
    pub light_threshold: u16,
    pub fire_threshold_c: f32,
    pub hold_ms: u32,
    pub doorbell_tone_ms: u32,
    pub ready_message: LcdText,
}

impl Rules {
    pub fn from_config(config: &StationConfig) -> Self {
        Self {
            sound_threshold: config.sound_threshold,
            light_threshold: config.light_threshold,
            fire_threshold_c: config.fire_threshold_c,
            hold_ms: config.alert_hold_ms,
            // A quarter note.
            doorbell_tone_ms: config.beat_ms(0.25),
            ready_message: config.ready_message.clone(),
        }
    }
}
