//! Outbound station events.
//!
//! The [`Station`](super::service::Station) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — log to the console, publish on the
//! broker, etc.

use serde::Serialize;

use super::service::StationSnapshot;
use crate::fsm::{AlertKind, Mode};

/// Structured events emitted by the station core.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// The station has started (carries initial mode).
    Started { mode: Mode },

    /// The alert state machine changed mode.
    ModeChanged { from: Mode, to: Mode },

    /// An alert was raised.
    AlertRaised { kind: AlertKind },

    /// An alert ended (hold elapsed or latch released).
    AlertCleared { kind: AlertKind },

    /// A base-station heartbeat toggled the indicator.
    Heartbeat { indicator_on: bool },

    /// Periodic status snapshot.
    Status { snapshot: StationSnapshot },
}
