//! Simulated board for host runs and demos.
//!
//! Inputs live in [`SimInputs`], a block of atomics that any thread can
//! poke (the demo stimulus, a test).  Outputs are kept in memory and
//! logged, so a run can be followed from the console.

use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};
use std::sync::Arc;

use log::debug;

use crate::app::ports::{Board, DisplayOp, Rgb, Tone};
use crate::config::LcdText;
use crate::error::PortError;
use crate::pins::{ADC_MAX, LCD_I2C_ADDR, TEMPERATURE_ADC};
use crate::sensors::temperature::celsius_to_raw;

pub const SIM_DIGITAL_PINS: usize = 16;
pub const SIM_ANALOG_CHANNELS: usize = 4;

/// Room temperature on the thermistor divider.
const ROOM_TEMP_RAW: u16 = 2048;

/// Input levels reported by the simulator.
#[derive(Debug)]
pub struct SimInputs {
    digital: [AtomicBool; SIM_DIGITAL_PINS],
    analog: [AtomicU16; SIM_ANALOG_CHANNELS],
}

impl Default for SimInputs {
    fn default() -> Self {
        Self::new()
    }
}

impl SimInputs {
    pub fn new() -> Self {
        let inputs = Self {
            digital: [const { AtomicBool::new(false) }; SIM_DIGITAL_PINS],
            analog: [const { AtomicU16::new(0) }; SIM_ANALOG_CHANNELS],
        };
        inputs.analog[TEMPERATURE_ADC as usize].store(ROOM_TEMP_RAW, Ordering::Relaxed);
        inputs
    }

    pub fn set_digital(&self, pin: u8, level: bool) {
        if let Some(slot) = self.digital.get(pin as usize) {
            slot.store(level, Ordering::Relaxed);
        }
    }

    pub fn set_analog(&self, channel: u8, raw: u16) {
        if let Some(slot) = self.analog.get(channel as usize) {
            slot.store(raw.min(ADC_MAX), Ordering::Relaxed);
        }
    }

    /// Put the thermistor at `celsius`.
    pub fn set_celsius(&self, celsius: f32) {
        self.set_analog(TEMPERATURE_ADC, celsius_to_raw(celsius));
    }
}

pub struct SimulatedBoard {
    inputs: Arc<SimInputs>,
    levels: [bool; SIM_DIGITAL_PINS],
    duty: [u8; SIM_DIGITAL_PINS],
    tone: Tone,
    lcd: LcdText,
    backlight: Rgb,
}

impl SimulatedBoard {
    pub fn new(inputs: Arc<SimInputs>) -> Self {
        Self {
            inputs,
            levels: [false; SIM_DIGITAL_PINS],
            duty: [0; SIM_DIGITAL_PINS],
            tone: Tone::Off,
            lcd: LcdText::new(),
            backlight: (0, 0, 0),
        }
    }

    /// Last level written to `pin`.
    pub fn output(&self, pin: u8) -> bool {
        self.levels.get(pin as usize).copied().unwrap_or(false)
    }

    /// Last PWM duty written to `pin`.
    pub fn duty(&self, pin: u8) -> u8 {
        self.duty.get(pin as usize).copied().unwrap_or(0)
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn lcd_text(&self) -> &str {
        &self.lcd
    }

    pub fn backlight(&self) -> Rgb {
        self.backlight
    }

    fn digital_slot(pin: u8) -> Result<usize, PortError> {
        let idx = pin as usize;
        if idx < SIM_DIGITAL_PINS {
            Ok(idx)
        } else {
            Err(PortError::InvalidPin(pin))
        }
    }
}

impl Board for SimulatedBoard {
    fn read_digital(&mut self, pin: u8) -> Result<bool, PortError> {
        let idx = Self::digital_slot(pin)?;
        Ok(self.inputs.digital[idx].load(Ordering::Relaxed))
    }

    fn read_analog(&mut self, channel: u8) -> Result<u16, PortError> {
        self.inputs
            .analog
            .get(channel as usize)
            .map(|slot| slot.load(Ordering::Relaxed))
            .ok_or(PortError::InvalidPin(channel))
    }

    fn write_digital(&mut self, pin: u8, level: bool) -> Result<(), PortError> {
        let idx = Self::digital_slot(pin)?;
        if self.levels[idx] != level {
            debug!("SIM | D{} = {}", pin, if level { "HIGH" } else { "LOW" });
        }
        self.levels[idx] = level;
        Ok(())
    }

    fn write_pwm(&mut self, pin: u8, duty: u8) -> Result<(), PortError> {
        let idx = Self::digital_slot(pin)?;
        self.duty[idx] = duty;
        self.levels[idx] = duty > 0;
        Ok(())
    }

    fn write_tone(&mut self, pin: u8, tone: Tone) -> Result<(), PortError> {
        Self::digital_slot(pin)?;
        if self.tone != tone {
            debug!("SIM | D{} tone {:?}", pin, tone);
        }
        self.tone = tone;
        Ok(())
    }

    fn write_display(&mut self, op: DisplayOp<'_>) -> Result<(), PortError> {
        match op {
            DisplayOp::Clear => self.lcd.clear(),
            DisplayOp::Home => {}
            DisplayOp::Write(text) => {
                self.lcd.push_str(text).map_err(|_| PortError::Rejected)?;
                debug!("SIM | LCD@{:#04x} \"{}\"", LCD_I2C_ADDR, self.lcd);
            }
            DisplayOp::SetRgb(rgb) => self.backlight = rgb,
        }
        Ok(())
    }
}
