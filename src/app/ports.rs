//! Port traits — the hexagonal boundary between station logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Station (domain)
//! ```
//!
//! Driven adapters (board, outputs, probes, brokers, event sinks) implement
//! these traits.  The [`Station`](super::service::Station) consumes them
//! via generics, so the domain core never touches hardware directly.

use std::sync::Arc;

use serde::Serialize;

use crate::error::PortError;
use crate::events::Message;

// ───────────────────────────────────────────────────────────────
// Shared output vocabulary
// ───────────────────────────────────────────────────────────────

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

/// The three indicator LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Red,
    Green,
    Blue,
}

impl Indicator {
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];
}

/// Buzzer command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Silence.
    Off,
    /// Play `hz` for `ms`, then stop by itself.
    Beep { hz: u16, ms: u32 },
    /// Play `hz` until told otherwise.
    Continuous { hz: u16 },
}

/// Operations on the composite LCD device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayOp<'a> {
    Clear,
    Home,
    Write(&'a str),
    SetRgb(Rgb),
}

// ───────────────────────────────────────────────────────────────
// Device ports (identity of one physical line)
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Input,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PortKind {
    Digital,
    Analog,
    Composite,
}

/// Descriptor of one physical I/O line.  Created at startup, lives for
/// the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DevicePort {
    pub name: &'static str,
    pub pin: u8,
    pub direction: Direction,
    pub kind: PortKind,
}

impl DevicePort {
    pub const fn new(name: &'static str, pin: u8, direction: Direction, kind: PortKind) -> Self {
        Self {
            name,
            pin,
            direction,
            kind,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Board (driven adapter: the microcontroller behind the transport)
// ───────────────────────────────────────────────────────────────

/// Pin-addressed access to the board.  The transport (serial firmata,
/// TCP bridge, simulator) lives entirely behind this trait, including
/// any reconnect logic.
pub trait Board {
    fn read_digital(&mut self, pin: u8) -> Result<bool, PortError>;

    /// Raw analog sample, 0 – 4095.
    fn read_analog(&mut self, channel: u8) -> Result<u16, PortError>;

    fn write_digital(&mut self, pin: u8, level: bool) -> Result<(), PortError>;

    /// PWM duty, 0 – 255.
    fn write_pwm(&mut self, pin: u8, duty: u8) -> Result<(), PortError>;

    fn write_tone(&mut self, pin: u8, tone: Tone) -> Result<(), PortError>;

    fn write_display(&mut self, op: DisplayOp<'_>) -> Result<(), PortError>;
}

/// A single analog input line.  `embedded-hal` 1.0 has no ADC trait, so
/// the station defines its own.
pub trait AnalogIn {
    fn read_sample(&mut self) -> Result<u16, PortError>;
}

// ───────────────────────────────────────────────────────────────
// Station-facing ports
// ───────────────────────────────────────────────────────────────

/// Write-only output surface: LEDs, LCD, buzzer.
///
/// Calls are fire-and-forget and idempotent.  A failed physical write is
/// not reported here; that is the board collaborator's business.
pub trait OutputSink {
    /// LCD backlight colour.
    fn set_color(&mut self, rgb: Rgb);

    /// Replace the LCD contents.
    fn set_text(&mut self, text: &str);

    fn set_indicator(&mut self, led: Indicator, on: bool);

    /// PWM level, 0 – 255.
    fn set_brightness(&mut self, led: Indicator, level: u8);

    fn tone(&mut self, tone: Tone);
}

/// On-demand temperature read used by the periodic fire-alarm check.
pub trait TemperatureProbe {
    fn read_celsius(&mut self) -> Result<f32, PortError>;
}

/// Monotonic milliseconds since an arbitrary origin.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Pub/sub (driven adapter: broker connection)
// ───────────────────────────────────────────────────────────────

/// Receiving end of one subscription.  Never blocks.
pub trait Inbox {
    fn try_next(&mut self) -> Option<Message>;
}

/// Publish/subscribe collaborator.  Reconnection is its own concern.
pub trait PubSub {
    type Subscription: Inbox;

    fn publish(&self, topic: &str, payload: &[u8]) -> Result<(), PortError>;

    fn subscribe(&self, topic: &str) -> Result<Self::Subscription, PortError>;
}

impl<T: PubSub + ?Sized> PubSub for Arc<T> {
    type Subscription = T::Subscription;

    fn publish(&self, topic: &str, payload: &[u8]) -> Result<(), PortError> {
        (**self).publish(topic, payload)
    }

    fn subscribe(&self, topic: &str) -> Result<Self::Subscription, PortError> {
        (**self).subscribe(topic)
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The station emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (console, broker).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

/// Fan out to two sinks, left first.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn emit(&mut self, event: &super::events::AppEvent) {
        self.0.emit(event);
        self.1.emit(event);
    }
}
