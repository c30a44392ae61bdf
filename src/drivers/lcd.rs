//! Grove 16x2 RGB-backlight LCD driver.
//!
//! A composite device on the I2C bus: text goes to the character
//! controller, colour to the backlight controller.  Text longer than the
//! panel is truncated.

use log::debug;

use super::board_pin::BoardPin;
use crate::app::ports::{Board, DisplayOp, Rgb};
use crate::config::lcd_text;

pub struct GroveLcd<B> {
    bus: BoardPin<B>,
}

impl<B: Board> GroveLcd<B> {
    pub fn new(bus: BoardPin<B>) -> Self {
        Self { bus }
    }

    /// Clear the panel and write `text` from the home position.
    pub fn show(&mut self, text: &str) {
        let text = lcd_text(text);
        for op in [DisplayOp::Clear, DisplayOp::Home, DisplayOp::Write(text.as_str())] {
            if let Err(e) = self.bus.display(op) {
                debug!("LCD: {:?} failed: {}", op, e);
            }
        }
    }

    pub fn set_backlight(&mut self, rgb: Rgb) {
        if let Err(e) = self.bus.display(DisplayOp::SetRgb(rgb)) {
            debug!("LCD: backlight failed: {}", e);
        }
    }
}
