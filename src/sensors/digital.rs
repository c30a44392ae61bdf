//! Edge-detecting source for buttons and touch pads.

use embedded_hal::digital::InputPin;
use log::debug;

use super::EventSource;
use crate::events::{Edge, Payload};

pub struct DigitalSource<P> {
    name: &'static str,
    pin: P,
    /// Last level seen; starts released.
    last: bool,
}

impl<P: InputPin> DigitalSource<P> {
    pub fn new(name: &'static str, pin: P) -> Self {
        Self {
            name,
            pin,
            last: false,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.last
    }
}

impl<P: InputPin> EventSource for DigitalSource<P> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn poll(&mut self) -> Option<Payload> {
        let level = match self.pin.is_high() {
            Ok(level) => level,
            Err(e) => {
                debug!("{}: read failed: {:?}", self.name, e);
                return None;
            }
        };
        if level == self.last {
            return None;
        }
        self.last = level;
        Some(Payload::Edge(if level { Edge::Pushed } else { Edge::Released }))
    }
}
