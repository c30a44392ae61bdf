//! Sensor-station controller library.
//!
//! A single-context event dispatcher and a table-driven alert state
//! machine for a Grove sensor kit (button, touch pad, rotary dial, sound,
//! light and temperature sensors, LEDs, buzzer, RGB LCD).  Exposed as a
//! library so the host binary and the integration tests share one core.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod fsm;
pub mod pins;
pub mod scheduler;

pub mod adapters;
pub mod drivers;
pub mod sensors;
