//! Unified error types for the sensor station.
//!
//! Transport faults stay inside the board and broker collaborators; the
//! dispatcher only ever sees a stalled event stream.  What reaches the
//! top-level [`Error`] are startup faults: bad configuration, full
//! registration tables, and collaborators that refused a subscription.
//! All variants are `Copy` so they can be logged and passed around
//! without allocation.

use core::fmt;

use crate::events::SourceId;

// ---------------------------------------------------------------------------
// Top-level station error
// ---------------------------------------------------------------------------

/// Every fallible startup operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
    /// A source, handler, or periodic task could not be registered.
    Dispatch(DispatchError),
    /// A device port or broker operation failed.
    Port(PortError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Dispatch(e) => write!(f, "dispatch: {e}"),
            Self::Port(e) => write!(f, "port: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from loading or validating [`StationConfig`](crate::config::StationConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The config file does not exist or could not be read.
    NotFound,
    /// The config file is not valid JSON for the expected schema.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Dispatcher registration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// All event-source slots are taken.
    SourceTableFull,
    /// All handler-binding slots are taken.
    HandlerTableFull,
    /// All periodic-task slots are taken.
    TaskTableFull,
    /// A handler was registered against a source that was never added.
    UnknownSource(SourceId),
    /// A periodic task was registered with a zero interval.
    ZeroInterval,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceTableFull => write!(f, "event source table full"),
            Self::HandlerTableFull => write!(f, "handler table full"),
            Self::TaskTableFull => write!(f, "periodic task table full"),
            Self::UnknownSource(id) => write!(f, "unknown event source {}", id.index()),
            Self::ZeroInterval => write!(f, "periodic interval must be non-zero"),
        }
    }
}

impl core::error::Error for DispatchError {}

impl From<DispatchError> for Error {
    fn from(e: DispatchError) -> Self {
        Self::Dispatch(e)
    }
}

// ---------------------------------------------------------------------------
// Device port errors
// ---------------------------------------------------------------------------

/// Faults reported by the board or broker collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortError {
    /// The collaborator is not connected (or lost its connection).
    Disconnected,
    /// The pin or channel number does not exist on this board.
    InvalidPin(u8),
    /// A reading is outside the physically plausible range.
    OutOfRange,
    /// The collaborator refused the request (payload too large, etc.).
    Rejected,
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "collaborator disconnected"),
            Self::InvalidPin(pin) => write!(f, "invalid pin {}", pin),
            Self::OutOfRange => write!(f, "reading out of range"),
            Self::Rejected => write!(f, "request rejected"),
        }
    }
}

impl core::error::Error for PortError {}

impl embedded_hal::digital::Error for PortError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl embedded_hal::pwm::Error for PortError {
    fn kind(&self) -> embedded_hal::pwm::ErrorKind {
        embedded_hal::pwm::ErrorKind::Other
    }
}

impl From<PortError> for Error {
    fn from(e: PortError) -> Self {
        Self::Port(e)
    }
}

