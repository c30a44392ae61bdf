//! Sensor station — host entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  SimulatedBoard    HardwareAdapter      LoopbackBroker         │
//! │  (Board)           (Output+Probe+Delay) (PubSub)               │
//! │  LogEventSink      PubSubEventSink      MonotonicClock         │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              Station (pure logic)                      │    │
//! │  │  Alert FSM · StationState · Devices                    │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Dispatcher (sources + scheduler → FIFO → handlers)            │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use tracing_subscriber::EnvFilter;

use sensorstation::adapters::broker::LoopbackBroker;
use sensorstation::adapters::hardware::HardwareAdapter;
use sensorstation::adapters::log_sink::LogEventSink;
use sensorstation::adapters::publish_sink::PubSubEventSink;
use sensorstation::adapters::sim_board::{SimInputs, SimulatedBoard};
use sensorstation::adapters::time::{MonotonicClock, StdDelay};
use sensorstation::app::handlers::{StationSources, install};
use sensorstation::app::ports::PubSub;
use sensorstation::app::service::Station;
use sensorstation::config::StationConfig;
use sensorstation::dispatcher::{Dispatcher, StopSignal};
use sensorstation::drivers::{BoardPin, share};
use sensorstation::pins;
use sensorstation::sensors::{AnalogSource, DigitalSource, MessageSource};

// ── CLI ───────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "sensorstation", version, about = "Grove sensor-station controller")]
struct Args {
    /// Board connection target (serial device or host:port).  Only the
    /// built-in simulator is wired on the host.
    board: String,

    /// Pub/sub broker address.  Only the in-process loopback broker is
    /// wired on the host.
    broker: String,

    /// JSON configuration file (missing fields take their defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Drive the simulated board with a scripted stimulus and a base-station heartbeat
    #[arg(long)]
    demo: bool,

    /// Stop after this many seconds (runs until killed otherwise)
    #[arg(long)]
    run_for_secs: Option<u64>,
}

// ── Demo stimulus ─────────────────────────────────────────────

/// Sleep `ms`, returning `false` if the station was stopped meanwhile.
fn pause(stop: &StopSignal, ms: u64) -> bool {
    thread::sleep(Duration::from_millis(ms));
    !stop.is_stopped()
}

/// Scripted walk through every station reaction, on repeat.
fn demo_stimulus(inputs: &SimInputs, stop: &StopSignal) {
    inputs.set_analog(pins::SOUND_ADC, 120);
    inputs.set_analog(pins::LIGHT_ADC, 300);
    inputs.set_celsius(24.0);

    loop {
        // Button push and release.
        if !pause(stop, 1500) {
            return;
        }
        inputs.set_digital(pins::BUTTON_PIN, true);
        if !pause(stop, 500) {
            return;
        }
        inputs.set_digital(pins::BUTTON_PIN, false);

        // Doorbell.
        if !pause(stop, 1500) {
            return;
        }
        inputs.set_digital(pins::TOUCH_PIN, true);
        if !pause(stop, 100) {
            return;
        }
        inputs.set_digital(pins::TOUCH_PIN, false);

        // Loud noise, then bright light.
        if !pause(stop, 2000) {
            return;
        }
        inputs.set_analog(pins::SOUND_ADC, 450);
        if !pause(stop, 50) {
            return;
        }
        inputs.set_analog(pins::SOUND_ADC, 120);
        if !pause(stop, 2000) {
            return;
        }
        inputs.set_analog(pins::LIGHT_ADC, 750);
        if !pause(stop, 50) {
            return;
        }
        inputs.set_analog(pins::LIGHT_ADC, 300);

        // Dial sweep.
        for raw in (0..=4095u16).step_by(512) {
            inputs.set_analog(pins::ROTARY_ADC, raw);
            if !pause(stop, 100) {
                return;
            }
        }

        // Fire, then all clear.
        inputs.set_celsius(45.0);
        if !pause(stop, 3500) {
            return;
        }
        inputs.set_celsius(30.0);
    }
}

/// Stand-in for the base station: one heartbeat per second.
fn demo_heartbeat(broker: &LoopbackBroker, topic: &str, stop: &StopSignal) {
    while pause(stop, 1000) {
        if let Err(e) = broker.publish(topic, b"1") {
            warn!("Heartbeat publish failed: {}", e);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Sensor station v{}", env!("CARGO_PKG_VERSION"));

    // ── Configuration (validated once, here) ──────────────────
    let config = match &args.config {
        Some(path) => {
            let config = StationConfig::load(path)?;
            info!("Config loaded from {}", path.display());
            config
        }
        None => {
            let config = StationConfig::default();
            config.validate()?;
            info!("Using default config");
            config
        }
    };

    // ── Collaborators ─────────────────────────────────────────
    info!("Board target '{}' -> simulated board", args.board);
    info!("Broker '{}' -> in-process loopback", args.broker);
    let inputs = Arc::new(SimInputs::new());
    let board = share(SimulatedBoard::new(Arc::clone(&inputs)));
    let broker = Arc::new(LoopbackBroker::new());

    // ── Station ───────────────────────────────────────────────
    let hw = HardwareAdapter::new(&board, StdDelay);
    let sink = (
        LogEventSink::new(),
        PubSubEventSink::new(Arc::clone(&broker), config.event_topic.clone()),
    );
    let mut station = Station::new(&config, hw, sink);
    for port in pins::DEVICES {
        station.register_device(port)?;
    }

    // ── Dispatcher ────────────────────────────────────────────
    let sources = StationSources {
        button: Box::new(DigitalSource::new("button", BoardPin::new(&board, pins::BUTTON_PIN))),
        touch: Box::new(DigitalSource::new("touch", BoardPin::new(&board, pins::TOUCH_PIN))),
        rotary: Box::new(AnalogSource::new("rotary", BoardPin::new(&board, pins::ROTARY_ADC))),
        sound: Box::new(AnalogSource::new("sound", BoardPin::new(&board, pins::SOUND_ADC))),
        light: Box::new(AnalogSource::new("light", BoardPin::new(&board, pins::LIGHT_ADC))),
        heartbeat: Box::new(MessageSource::new(
            "heartbeat",
            broker.subscribe(&config.heartbeat_topic)?,
        )),
    };
    let mut dispatcher = Dispatcher::new(config.poll_interval_ms);
    install(&mut dispatcher, sources, &config)?;
    let stop = dispatcher.stop_handle();

    // ── Background threads (never touch station state) ────────
    let mut workers = Vec::new();
    if args.demo {
        let (inputs, stop_demo) = (Arc::clone(&inputs), stop.clone());
        workers.push(thread::spawn(move || demo_stimulus(&inputs, &stop_demo)));

        let (remote, stop_hb) = (Arc::clone(&broker), stop.clone());
        let topic = config.heartbeat_topic.clone();
        workers.push(thread::spawn(move || demo_heartbeat(&remote, &topic, &stop_hb)));
        info!("Demo stimulus running");
    }
    if let Some(secs) = args.run_for_secs {
        let stop_timer = stop.clone();
        workers.push(thread::spawn(move || {
            thread::sleep(Duration::from_secs(secs));
            stop_timer.stop();
        }));
    }

    // ── Run ───────────────────────────────────────────────────
    station.start();
    dispatcher.run(&mut station, &MonotonicClock::new(), &mut StdDelay);

    // Wake sleeping workers promptly.
    stop.stop();
    for worker in workers {
        if worker.join().is_err() {
            warn!("Background thread panicked");
        }
    }

    let snapshot = station.snapshot();
    info!(
        "Station '{}' stopped in {:?} after {} cycles: {} alerts, {} mode changes",
        snapshot.name,
        snapshot.mode,
        dispatcher.cycles(),
        snapshot.alerts_raised,
        station.transition_count()
    );
    Ok(())
}
