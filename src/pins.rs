//! Pin / ADC channel assignments for the Grove base shield.
//!
//! Single source of truth — the host wiring in `main.rs` references this
//! module rather than hard-coding pin numbers.  Digital pins and analog
//! channels are separate namespaces on the board (D2 and A2 are different
//! connectors).

use crate::app::ports::{DevicePort, Direction, PortKind};

// ---------------------------------------------------------------------------
// Digital connectors
// ---------------------------------------------------------------------------

/// Momentary push-button (active HIGH).
pub const BUTTON_PIN: u8 = 2;
/// Blue LED — PWM capable, driven by the rotary dial.
pub const BLUE_LED_PIN: u8 = 3;
/// Green LED — baseline "ready" indicator.
pub const GREEN_LED_PIN: u8 = 4;
/// Red LED — fire alarm indicator.
pub const RED_LED_PIN: u8 = 5;
/// Piezo buzzer.
pub const BUZZER_PIN: u8 = 6;
/// Capacitive touch pad (doorbell).  Active HIGH.
pub const TOUCH_PIN: u8 = 8;

// ---------------------------------------------------------------------------
// Analog connectors
// ---------------------------------------------------------------------------

/// Rotary angle sensor.
pub const ROTARY_ADC: u8 = 0;
/// NTC temperature sensor.
pub const TEMPERATURE_ADC: u8 = 1;
/// Sound sensor (microphone envelope).
pub const SOUND_ADC: u8 = 2;
/// Light sensor (photoresistor).
pub const LIGHT_ADC: u8 = 3;

// ---------------------------------------------------------------------------
// I²C
// ---------------------------------------------------------------------------

/// 16x2 RGB backlit LCD.  Composite device on the I²C bus; the pin
/// number is only used as its identity in the device listing.
pub const LCD_I2C_ADDR: u8 = 0x3e;

// ---------------------------------------------------------------------------
// Converter resolution
// ---------------------------------------------------------------------------

/// Largest raw value an analog read can return (12-bit ADC).
pub const ADC_MAX: u16 = 4095;
/// Largest PWM duty an output pin accepts (8-bit).
pub const PWM_MAX: u8 = 255;

// ---------------------------------------------------------------------------
// Device listing
// ---------------------------------------------------------------------------

/// Every device on the standard shield layout.
pub const DEVICES: [DevicePort; 11] = [
    DevicePort::new("button", BUTTON_PIN, Direction::Input, PortKind::Digital),
    DevicePort::new("touch", TOUCH_PIN, Direction::Input, PortKind::Digital),
    DevicePort::new("rotary", ROTARY_ADC, Direction::Input, PortKind::Analog),
    DevicePort::new("temperature", TEMPERATURE_ADC, Direction::Input, PortKind::Analog),
    DevicePort::new("sound", SOUND_ADC, Direction::Input, PortKind::Analog),
    DevicePort::new("light", LIGHT_ADC, Direction::Input, PortKind::Analog),
    DevicePort::new("blue", BLUE_LED_PIN, Direction::Output, PortKind::Digital),
    DevicePort::new("green", GREEN_LED_PIN, Direction::Output, PortKind::Digital),
    DevicePort::new("red", RED_LED_PIN, Direction::Output, PortKind::Digital),
    DevicePort::new("buzzer", BUZZER_PIN, Direction::Output, PortKind::Digital),
    DevicePort::new("screen", LCD_I2C_ADDR, Direction::Output, PortKind::Composite),
];
