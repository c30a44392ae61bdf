//! Device-port handles and output drivers.

pub mod board_pin;
pub mod buzzer;
pub mod lcd;
pub mod status_led;

pub use board_pin::{BoardPin, SharedBoard, share};
