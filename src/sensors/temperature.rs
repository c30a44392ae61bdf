//! Grove NTC thermistor (10 kOhm @ 25 C, B = 3975).
//!
//! The thermistor sits on the low side of a divider with a fixed 10 kOhm
//! resistor, so the sample rises with temperature.  The simplified Beta
//! equation converts resistance to Celsius.

use crate::app::ports::{AnalogIn, TemperatureProbe};
use crate::error::PortError;
use crate::pins::ADC_MAX;

const R0: f32 = 10_000.0;
const BETA: f32 = 3975.0;
const T0_K: f32 = 298.15;
const KELVIN: f32 = 273.15;

pub struct Thermistor<A> {
    adc: A,
}

impl<A: AnalogIn> Thermistor<A> {
    pub fn new(adc: A) -> Self {
        Self { adc }
    }
}

impl<A: AnalogIn> TemperatureProbe for Thermistor<A> {
    fn read_celsius(&mut self) -> Result<f32, PortError> {
        raw_to_celsius(self.adc.read_sample()?)
    }
}

/// Convert a 12-bit sample to Celsius.  The rails mean an open or shorted
/// probe and are rejected.
pub fn raw_to_celsius(raw: u16) -> Result<f32, PortError> {
    if raw == 0 || raw >= ADC_MAX {
        return Err(PortError::OutOfRange);
    }
    let max = ADC_MAX as f32;
    let r = (max - raw as f32) * R0 / raw as f32;
    let inv_t = (r / R0).ln() / BETA + 1.0 / T0_K;
    Ok(1.0 / inv_t - KELVIN)
}

/// Inverse of [`raw_to_celsius`], for simulation.  Clamped inside the rails.
pub fn celsius_to_raw(celsius: f32) -> u16 {
    let ratio = (BETA * (1.0 / (celsius + KELVIN) - 1.0 / T0_K)).exp();
    let raw = (ADC_MAX as f32 / (1.0 + ratio)).round();
    (raw as u16).clamp(1, ADC_MAX - 1)
}
