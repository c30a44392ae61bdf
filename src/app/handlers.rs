//! Dispatcher bindings for the station.
//!
//! Each handler unpacks the payload shape its source produces and calls
//! into the [`Station`].  [`install`] wires the standard layout:
//!
//! | Source     | Payload  | Handler        | Effect                        |
//! |------------|----------|----------------|-------------------------------|
//! | button     | Edge     | `on_button`    | momentary feedback            |
//! | touch      | Edge     | `on_touch`     | doorbell alert (push only)    |
//! | rotary     | Sample   | `on_rotary`    | blue brightness               |
//! | sound      | Sample   | `on_sound`     | sound alert at threshold      |
//! | light      | Sample   | `on_light`     | light alert at threshold      |
//! | heartbeat  | Message  | `on_heartbeat` | toggle blue                   |
//! | (periodic) | —        | fire check     | temperature readout / latch   |
//! | (periodic) | —        | status report  | `AppEvent::Status`            |

use log::{debug, info};

use super::ports::EventSink;
use super::service::{Station, StationHardware};
use crate::config::StationConfig;
use crate::dispatcher::Dispatcher;
use crate::error::Error;
use crate::events::{Edge, Payload};
use crate::fsm::Trigger;
use crate::sensors::EventSource;

pub fn on_button<H: StationHardware, S: EventSink>(station: &mut Station<H, S>, payload: &Payload) {
    match payload {
        Payload::Edge(Edge::Pushed) => station.fire(Trigger::Pushed),
        Payload::Edge(Edge::Released) => station.fire(Trigger::Released),
        other => debug!("button: unexpected payload {:?}", other),
    }
}

pub fn on_touch<H: StationHardware, S: EventSink>(station: &mut Station<H, S>, payload: &Payload) {
    if let Payload::Edge(Edge::Pushed) = payload {
        station.fire(Trigger::Doorbell);
    }
}

pub fn on_rotary<H: StationHardware, S: EventSink>(station: &mut Station<H, S>, payload: &Payload) {
    if let Payload::Sample(raw) = payload {
        station.adjust_brightness(*raw);
    }
}

pub fn on_sound<H: StationHardware, S: EventSink>(station: &mut Station<H, S>, payload: &Payload) {
    if let Payload::Sample(level) = payload {
        station.sample_sound(*level);
    }
}

pub fn on_light<H: StationHardware, S: EventSink>(station: &mut Station<H, S>, payload: &Payload) {
    if let Payload::Sample(level) = payload {
        station.sample_light(*level);
    }
}

pub fn on_heartbeat<H: StationHardware, S: EventSink>(station: &mut Station<H, S>, payload: &Payload) {
    if let Payload::Message(msg) = payload {
        debug!("heartbeat on '{}' ({} bytes)", msg.topic, msg.body.len());
        station.heartbeat();
    }
}

pub fn check_fire_alarm<H: StationHardware, S: EventSink>(station: &mut Station<H, S>) {
    station.check_temperature();
}

pub fn report_status<H: StationHardware, S: EventSink>(station: &mut Station<H, S>) {
    station.report_status();
}

/// The station's event sources, in the order they are polled.
pub struct StationSources {
    pub button: Box<dyn EventSource>,
    pub touch: Box<dyn EventSource>,
    pub rotary: Box<dyn EventSource>,
    pub sound: Box<dyn EventSource>,
    pub light: Box<dyn EventSource>,
    pub heartbeat: Box<dyn EventSource>,
}

/// Register every source, handler and periodic check.
pub fn install<H: StationHardware, S: EventSink>(
    dispatcher: &mut Dispatcher<Station<H, S>>,
    sources: StationSources,
    config: &StationConfig,
) -> Result<(), Error> {
    let button = dispatcher.add_source(sources.button)?;
    dispatcher.register(button, on_button::<H, S>)?;

    let touch = dispatcher.add_source(sources.touch)?;
    dispatcher.register(touch, on_touch::<H, S>)?;

    let rotary = dispatcher.add_source(sources.rotary)?;
    dispatcher.register(rotary, on_rotary::<H, S>)?;

    let sound = dispatcher.add_source(sources.sound)?;
    dispatcher.register(sound, on_sound::<H, S>)?;

    let light = dispatcher.add_source(sources.light)?;
    dispatcher.register(light, on_light::<H, S>)?;

    let heartbeat = dispatcher.add_source(sources.heartbeat)?;
    dispatcher.register(heartbeat, on_heartbeat::<H, S>)?;

    dispatcher.register_periodic(
        "fire-check",
        config.fire_check_interval_ms,
        check_fire_alarm::<H, S>,
    )?;

    if config.status_interval_ms > 0 {
        dispatcher.register_periodic("status", config.status_interval_ms, report_status::<H, S>)?;
    }

    info!(
        "Station handlers installed: {} sources, {} handlers, {} periodic",
        dispatcher.source_count(),
        dispatcher.handler_count(),
        dispatcher.task_count()
    );
    Ok(())
}
