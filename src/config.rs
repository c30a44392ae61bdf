//! Station configuration parameters
//!
//! All tunable parameters for the sensor station.  Defaults reproduce the
//! stock "airlock" build; any subset can be overridden from a JSON file.
//! Validation runs once at startup, never per event.

use std::path::Path;

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::events::TOPIC_CAP;
use crate::pins::{ADC_MAX, PWM_MAX};

/// Characters on the 16x2 LCD.
pub const LCD_CHARS: usize = 32;

/// LCD panel contents.
pub type LcdText = String<LCD_CHARS>;

/// Copy `s` into an LCD line, truncating at the panel width.
pub fn lcd_text(s: &str) -> LcdText {
    let mut text = LcdText::new();
    for ch in s.chars() {
        if text.push(ch).is_err() {
            break;
        }
    }
    text
}

/// Input/output bounds for rescaling the rotary dial onto LED brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleBounds {
    /// Exclusive upper bound of the raw input range (4096 for a 12-bit ADC).
    pub in_max: u32,
    /// Inclusive upper bound of the output range.
    pub out_max: u8,
}

impl ScaleBounds {
    /// Rescale `raw` from `[0, in_max)` to `[0, out_max]`, rounding half up.
    /// Inputs past the range clamp to the top.
    pub fn apply(&self, raw: u16) -> u8 {
        let raw = (raw as u32).min(self.in_max);
        let out = self.out_max as u32;
        let scaled = (raw * out + self.in_max / 2) / self.in_max;
        scaled.min(out) as u8
    }
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self {
            in_max: ADC_MAX as u32 + 1,
            out_max: PWM_MAX,
        }
    }
}

/// Core station configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    // --- Identity ---
    /// Station name, used in logs and status reports
    pub name: LcdText,
    /// LCD text shown in the baseline (idle) display
    pub ready_message: LcdText,

    // --- Alert thresholds (all inclusive) ---
    /// Sound level (raw ADC) that triggers a sound alert
    pub sound_threshold: u16,
    /// Light level (raw ADC) that triggers a light alert
    pub light_threshold: u16,
    /// Temperature (Celsius) that latches the fire alarm
    pub fire_threshold_c: f32,

    // --- Timing ---
    /// How long a timed alert holds the station (milliseconds)
    pub alert_hold_ms: u32,
    /// Fire-alarm check interval (milliseconds)
    pub fire_check_interval_ms: u32,
    /// Event-source polling interval (milliseconds)
    pub poll_interval_ms: u32,
    /// Status report interval (milliseconds, 0 = disabled)
    pub status_interval_ms: u32,
    /// Buzzer tempo used to turn note lengths into milliseconds
    pub tempo_bpm: u16,

    // --- Side channels ---
    /// Rotary dial → blue LED brightness mapping
    pub rotary_scale: ScaleBounds,

    // --- Pub/sub ---
    /// Topic the base station publishes heartbeats on
    pub heartbeat_topic: String<TOPIC_CAP>,
    /// Topic station events are published on
    pub event_topic: String<TOPIC_CAP>,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            // Identity
            name: String::try_from("airlock").unwrap_or_default(),
            ready_message: String::try_from("Airlock ready.").unwrap_or_default(),

            // Thresholds
            sound_threshold: 400,
            light_threshold: 700,
            fire_threshold_c: 40.0,

            // Timing
            alert_hold_ms: 1000,
            fire_check_interval_ms: 1000,
            poll_interval_ms: 10,     // 100 Hz
            status_interval_ms: 10_000,
            tempo_bpm: 96,

            rotary_scale: ScaleBounds::default(),

            heartbeat_topic: String::try_from("basestation/heartbeat").unwrap_or_default(),
            event_topic: String::try_from("sensorstation/events").unwrap_or_default(),
        }
    }
}

impl StationConfig {
    /// Parse a JSON document.  Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|_| ConfigError::NotFound)?;
        Self::from_json(&json)
    }

    /// Reject values that would make the station misbehave at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rotary_scale.in_max == 0 {
            return Err(ConfigError::ValidationFailed("rotary_scale.in_max must be > 0"));
        }
        if self.rotary_scale.out_max == 0 {
            return Err(ConfigError::ValidationFailed("rotary_scale.out_max must be > 0"));
        }
        if self.sound_threshold > ADC_MAX {
            return Err(ConfigError::ValidationFailed("sound_threshold above ADC range"));
        }
        if self.light_threshold > ADC_MAX {
            return Err(ConfigError::ValidationFailed("light_threshold above ADC range"));
        }
        if !self.fire_threshold_c.is_finite() {
            return Err(ConfigError::ValidationFailed("fire_threshold_c must be finite"));
        }
        if self.alert_hold_ms == 0 {
            return Err(ConfigError::ValidationFailed("alert_hold_ms must be > 0"));
        }
        if self.fire_check_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("fire_check_interval_ms must be > 0"));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("poll_interval_ms must be > 0"));
        }
        if self.tempo_bpm == 0 {
            return Err(ConfigError::ValidationFailed("tempo_bpm must be > 0"));
        }
        if self.heartbeat_topic.is_empty() || self.event_topic.is_empty() {
            return Err(ConfigError::ValidationFailed("topics must not be empty"));
        }
        Ok(())
    }

    /// Length of `beats` at the configured tempo, in milliseconds.
    pub fn beat_ms(&self, beats: f32) -> u32 {
        (60_000.0 / self.tempo_bpm as f32 * beats) as u32
    }
}
