//! Mock hardware and a full test rig.
//!
//! [`MockHardware`] records every output call (and every hold) and keeps
//! a model of what the outputs currently show.  Its handles are shared,
//! so a test keeps a clone while the station owns the original.  Holds
//! advance the shared [`MockClock`], the same clock the rig feeds to the
//! dispatcher.
//!
//! [`Rig`] wires the real dispatcher, sources, simulated board and
//! loopback broker around the mock, exactly as `main.rs` does.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use embedded_hal::delay::DelayNs;
use sensorstation::adapters::broker::LoopbackBroker;
use sensorstation::adapters::sim_board::{SimInputs, SimulatedBoard};
use sensorstation::app::events::AppEvent;
use sensorstation::app::handlers::{StationSources, install};
use sensorstation::app::ports::{
    Clock, EventSink, Indicator, OutputSink, PubSub, Rgb, TemperatureProbe, Tone,
};
use sensorstation::app::service::Station;
use sensorstation::config::StationConfig;
use sensorstation::dispatcher::Dispatcher;
use sensorstation::drivers::{BoardPin, share};
use sensorstation::error::PortError;
use sensorstation::pins;
use sensorstation::sensors::{AnalogSource, DigitalSource, MessageSource};

// ── Output call record ────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum OutputCall {
    Color(Rgb),
    Text(String),
    Indicator(Indicator, bool),
    Brightness(Indicator, u8),
    Tone(Tone),
    Hold(u32),
}

/// What the outputs show right now.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outputs {
    pub color: Rgb,
    pub text: String,
    pub leds: [bool; 3],
    pub brightness: [u8; 3],
    pub tone: Option<Tone>,
}

fn slot(led: Indicator) -> usize {
    match led {
        Indicator::Red => 0,
        Indicator::Green => 1,
        Indicator::Blue => 2,
    }
}

impl Outputs {
    pub fn led(&self, led: Indicator) -> bool {
        self.leds[slot(led)]
    }
}

// ── MockClock ─────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockClock(Rc<Cell<u64>>);

impl MockClock {
    pub fn advance(&self, ms: u64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

// ── MockHardware ──────────────────────────────────────────────

#[derive(Clone)]
pub struct MockHardware {
    calls: Rc<RefCell<Vec<OutputCall>>>,
    outputs: Rc<RefCell<Outputs>>,
    celsius: Rc<Cell<f32>>,
    clock: MockClock,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(clock: MockClock) -> Self {
        Self {
            calls: Rc::default(),
            outputs: Rc::default(),
            celsius: Rc::new(Cell::new(24.0)),
            clock,
        }
    }

    pub fn calls(&self) -> Vec<OutputCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn outputs(&self) -> Outputs {
        self.outputs.borrow().clone()
    }

    pub fn set_celsius(&self, celsius: f32) {
        self.celsius.set(celsius);
    }

    fn record(&self, call: OutputCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl OutputSink for MockHardware {
    fn set_color(&mut self, rgb: Rgb) {
        self.record(OutputCall::Color(rgb));
        self.outputs.borrow_mut().color = rgb;
    }

    fn set_text(&mut self, text: &str) {
        self.record(OutputCall::Text(text.to_string()));
        self.outputs.borrow_mut().text = text.to_string();
    }

    // On/off and brightness drive the same LED, as `IndicatorLed` does.

    fn set_indicator(&mut self, led: Indicator, on: bool) {
        self.record(OutputCall::Indicator(led, on));
        let mut out = self.outputs.borrow_mut();
        out.leds[slot(led)] = on;
        out.brightness[slot(led)] = if on { 255 } else { 0 };
    }

    fn set_brightness(&mut self, led: Indicator, level: u8) {
        self.record(OutputCall::Brightness(led, level));
        let mut out = self.outputs.borrow_mut();
        out.leds[slot(led)] = level > 0;
        out.brightness[slot(led)] = level;
    }

    fn tone(&mut self, tone: Tone) {
        self.record(OutputCall::Tone(tone));
        self.outputs.borrow_mut().tone = Some(tone);
    }
}

impl TemperatureProbe for MockHardware {
    fn read_celsius(&mut self) -> Result<f32, PortError> {
        Ok(self.celsius.get())
    }
}

impl DelayNs for MockHardware {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.record(OutputCall::Hold(ms));
        self.clock.advance(ms as u64);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct RecordingSink(Rc<RefCell<Vec<AppEvent>>>);

#[allow(dead_code)]
impl RecordingSink {
    pub fn events(&self) -> Vec<AppEvent> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.0.borrow_mut().push(event.clone());
    }
}

// ── Rig ───────────────────────────────────────────────────────

pub type TestStation = Station<MockHardware, RecordingSink>;

pub struct Rig {
    pub inputs: Arc<SimInputs>,
    pub broker: Arc<LoopbackBroker>,
    pub hw: MockHardware,
    pub sink: RecordingSink,
    pub clock: MockClock,
    pub config: StationConfig,
    pub station: TestStation,
    pub dispatcher: Dispatcher<TestStation>,
}

#[allow(dead_code)]
impl Rig {
    pub fn new() -> Self {
        Self::with_config(StationConfig::default())
    }

    /// Build, install and start the station, then run one cycle so the
    /// periodic tasks are armed and the sources have their first reading.
    pub fn with_config(config: StationConfig) -> Self {
        let clock = MockClock::default();
        let hw = MockHardware::new(clock.clone());
        let sink = RecordingSink::default();
        let inputs = Arc::new(SimInputs::new());
        let board = share(SimulatedBoard::new(Arc::clone(&inputs)));
        let broker = Arc::new(LoopbackBroker::new());

        let mut station = Station::new(&config, hw.clone(), sink.clone());
        for port in pins::DEVICES {
            station.register_device(port).unwrap();
        }

        let sources = StationSources {
            button: Box::new(DigitalSource::new("button", BoardPin::new(&board, pins::BUTTON_PIN))),
            touch: Box::new(DigitalSource::new("touch", BoardPin::new(&board, pins::TOUCH_PIN))),
            rotary: Box::new(AnalogSource::new("rotary", BoardPin::new(&board, pins::ROTARY_ADC))),
            sound: Box::new(AnalogSource::new("sound", BoardPin::new(&board, pins::SOUND_ADC))),
            light: Box::new(AnalogSource::new("light", BoardPin::new(&board, pins::LIGHT_ADC))),
            heartbeat: Box::new(MessageSource::new(
                "heartbeat",
                broker.subscribe(&config.heartbeat_topic).unwrap(),
            )),
        };
        let mut dispatcher = Dispatcher::new(config.poll_interval_ms);
        install(&mut dispatcher, sources, &config).unwrap();

        station.start();
        let mut rig = Self {
            inputs,
            broker,
            hw,
            sink,
            clock,
            config,
            station,
            dispatcher,
        };
        rig.cycle();
        rig
    }

    pub fn clock_now(&self) -> u64 {
        self.clock.now_ms()
    }

    /// One dispatcher cycle at the current mock time.
    pub fn cycle(&mut self) -> usize {
        let now = self.clock.now_ms();
        self.dispatcher.run_cycle(&mut self.station, now)
    }

    /// Advance the clock by one poll interval and run a cycle.
    pub fn step(&mut self) -> usize {
        self.clock.advance(self.config.poll_interval_ms as u64);
        self.cycle()
    }

    /// Advance the clock to the next fire check and run a cycle.
    pub fn next_fire_check(&mut self) -> usize {
        self.clock.advance(self.config.fire_check_interval_ms as u64);
        self.cycle()
    }

    pub fn press(&mut self, pin: u8) {
        self.inputs.set_digital(pin, true);
        self.step();
    }

    pub fn release(&mut self, pin: u8) {
        self.inputs.set_digital(pin, false);
        self.step();
    }

    pub fn heartbeat(&self) {
        self.broker.publish(&self.config.heartbeat_topic, b"1").unwrap();
    }
}
