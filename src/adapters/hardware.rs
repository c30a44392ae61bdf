//! Hardware adapter — bridges the board's output devices to domain ports.
//!
//! Owns the indicator LEDs, buzzer, LCD and thermistor, exposing them
//! through [`OutputSink`] and [`TemperatureProbe`], plus the delay the
//! station holds alerts with.  Input pins are not here: they belong to
//! the event sources.

use embedded_hal::delay::DelayNs;

use crate::app::ports::{Board, Indicator, OutputSink, Rgb, TemperatureProbe, Tone};
use crate::drivers::buzzer::Buzzer;
use crate::drivers::lcd::GroveLcd;
use crate::drivers::status_led::IndicatorLed;
use crate::drivers::{BoardPin, SharedBoard};
use crate::error::PortError;
use crate::pins;
use crate::sensors::temperature::Thermistor;

/// Concrete adapter that combines all output hardware behind port traits.
pub struct HardwareAdapter<B, D> {
    red: IndicatorLed<BoardPin<B>>,
    green: IndicatorLed<BoardPin<B>>,
    blue: IndicatorLed<BoardPin<B>>,
    buzzer: Buzzer<B>,
    lcd: GroveLcd<B>,
    thermistor: Thermistor<BoardPin<B>>,
    delay: D,
}

impl<B: Board, D: DelayNs> HardwareAdapter<B, D> {
    /// Bind every output on the standard shield layout.
    pub fn new(board: &SharedBoard<B>, delay: D) -> Self {
        Self {
            red: IndicatorLed::new("red", BoardPin::new(board, pins::RED_LED_PIN)),
            green: IndicatorLed::new("green", BoardPin::new(board, pins::GREEN_LED_PIN)),
            blue: IndicatorLed::new("blue", BoardPin::new(board, pins::BLUE_LED_PIN)),
            buzzer: Buzzer::new(BoardPin::new(board, pins::BUZZER_PIN)),
            lcd: GroveLcd::new(BoardPin::new(board, pins::LCD_I2C_ADDR)),
            thermistor: Thermistor::new(BoardPin::new(board, pins::TEMPERATURE_ADC)),
            delay,
        }
    }

    fn led(&mut self, led: Indicator) -> &mut IndicatorLed<BoardPin<B>> {
        match led {
            Indicator::Red => &mut self.red,
            Indicator::Green => &mut self.green,
            Indicator::Blue => &mut self.blue,
        }
    }
}

// ── OutputSink implementation ─────────────────────────────────

impl<B: Board, D: DelayNs> OutputSink for HardwareAdapter<B, D> {
    fn set_color(&mut self, rgb: Rgb) {
        self.lcd.set_backlight(rgb);
    }

    fn set_text(&mut self, text: &str) {
        self.lcd.show(text);
    }

    fn set_indicator(&mut self, led: Indicator, on: bool) {
        self.led(led).set(on);
    }

    fn set_brightness(&mut self, led: Indicator, level: u8) {
        self.led(led).set_brightness(level);
    }

    fn tone(&mut self, tone: Tone) {
        self.buzzer.play(tone);
    }
}

// ── TemperatureProbe implementation ───────────────────────────

impl<B: Board, D: DelayNs> TemperatureProbe for HardwareAdapter<B, D> {
    fn read_celsius(&mut self) -> Result<f32, PortError> {
        self.thermistor.read_celsius()
    }
}

// ── Alert hold ────────────────────────────────────────────────

impl<B: Board, D: DelayNs> DelayNs for HardwareAdapter<B, D> {
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_ns(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
