//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured station events through
//! the `log` facade (the host binary routes it to `tracing-subscriber`).

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { mode } => {
                info!("START | mode={:?}", mode);
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE | {:?} -> {:?}", from, to);
            }
            AppEvent::AlertRaised { kind } => {
                info!("ALERT | raised {:?}", kind);
            }
            AppEvent::AlertCleared { kind } => {
                info!("ALERT | cleared {:?}", kind);
            }
            AppEvent::Heartbeat { indicator_on } => {
                info!("HEARTBEAT | blue={}", if *indicator_on { "on" } else { "off" });
            }
            AppEvent::Status { snapshot: s } => {
                info!(
                    "STATUS | {} | mode={:?} latched={:?} | rotary={:?} sound={:?} light={:?} \
                     T={:?}\u{00b0}C | r={} g={} b={} | alerts={} devices={}",
                    s.name,
                    s.mode,
                    s.latched,
                    s.readings.rotary,
                    s.readings.sound,
                    s.readings.light,
                    s.readings.temperature_c,
                    s.indicators.red,
                    s.indicators.green,
                    s.indicators.blue,
                    s.alerts_raised,
                    s.devices.len(),
                );
            }
        }
    }
}
