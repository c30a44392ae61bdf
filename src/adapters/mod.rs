//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to               |
//! |----------------|--------------------|---------------------------|
//! | `hardware`     | OutputSink         | LEDs, buzzer, LCD         |
//! |                | TemperatureProbe   | Thermistor                |
//! |                | DelayNs            | Alert hold                |
//! | `sim_board`    | Board              | In-memory simulator       |
//! | `broker`       | PubSub             | In-process loopback       |
//! | `log_sink`     | EventSink          | Console log output        |
//! | `publish_sink` | EventSink          | Broker event topic (JSON) |
//! | `time`         | Clock, DelayNs     | `std::time`, `std::thread`|

pub mod broker;
pub mod hardware;
pub mod log_sink;
pub mod publish_sink;
pub mod sim_board;
pub mod time;
