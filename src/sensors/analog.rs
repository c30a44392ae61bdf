//! Continuous analog sampling source (rotary, sound, light).

use log::debug;

use super::EventSource;
use crate::app::ports::AnalogIn;
use crate::events::Payload;
use crate::pins::ADC_MAX;

/// Emits one sample per poll, changed or not.
pub struct AnalogSource<A> {
    name: &'static str,
    adc: A,
}

impl<A: AnalogIn> AnalogSource<A> {
    pub fn new(name: &'static str, adc: A) -> Self {
        Self { name, adc }
    }
}

impl<A: AnalogIn> EventSource for AnalogSource<A> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn poll(&mut self) -> Option<Payload> {
        match self.adc.read_sample() {
            Ok(raw) => Some(Payload::Sample(raw.min(ADC_MAX))),
            Err(e) => {
                debug!("{}: read failed: {}", self.name, e);
                None
            }
        }
    }
}
