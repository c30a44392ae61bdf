//! Event sources — turn device ports into discrete notifications.
//!
//! | Source           | Port                 | Emits                        |
//! |------------------|----------------------|------------------------------|
//! | `DigitalSource`  | `InputPin`           | `Edge` on level transitions  |
//! | `AnalogSource`   | `AnalogIn`           | `Sample` on every poll       |
//! | `MessageSource`  | `Inbox`              | `Message` per pending message|
//!
//! [`Thermistor`](temperature::Thermistor) is not a source: the fire-alarm
//! check reads it on demand through the `TemperatureProbe` port.

pub mod analog;
pub mod digital;
pub mod message;
pub mod temperature;

pub use analog::AnalogSource;
pub use digital::DigitalSource;
pub use message::MessageSource;

use crate::events::Payload;

/// A lazy, non-blocking stream of payloads from one device port.
pub trait EventSource {
    /// Short label for logs.
    fn name(&self) -> &'static str;

    /// Next payload, or `None` if there is nothing new.  Never blocks.
    fn poll(&mut self) -> Option<Payload>;
}
