//! Single-colour indicator LED driver.
//!
//! Switched on/off through `OutputPin`, dimmed through `SetDutyCycle`.
//! Write failures are logged and otherwise ignored; the driver still
//! tracks what it was asked to show.

use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::pwm::SetDutyCycle;
use log::debug;

use crate::pins::PWM_MAX;

pub struct IndicatorLed<P> {
    name: &'static str,
    pin: P,
    on: bool,
    level: u8,
}

impl<P: OutputPin + SetDutyCycle> IndicatorLed<P> {
    pub fn new(name: &'static str, pin: P) -> Self {
        Self {
            name,
            pin,
            on: false,
            level: 0,
        }
    }

    pub fn set(&mut self, on: bool) {
        if let Err(e) = self.pin.set_state(PinState::from(on)) {
            debug!("{} LED: write failed: {:?}", self.name, e);
        }
        self.on = on;
        self.level = if on { PWM_MAX } else { 0 };
    }

    pub fn off(&mut self) {
        self.set(false);
    }

    /// PWM level, 0 – 255.
    pub fn set_brightness(&mut self, level: u8) {
        if let Err(e) = self.pin.set_duty_cycle_fraction(level as u16, PWM_MAX as u16) {
            debug!("{} LED: duty write failed: {:?}", self.name, e);
        }
        self.level = level;
        self.on = level > 0;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn level(&self) -> u8 {
        self.level
    }
}
