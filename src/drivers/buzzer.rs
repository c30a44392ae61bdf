//! Piezo buzzer driver.
//!
//! The board times a [`Tone::Beep`] itself; a [`Tone::Continuous`] plays
//! until the next [`Tone::Off`].

use log::debug;

use super::board_pin::BoardPin;
use crate::app::ports::{Board, Tone};

pub struct Buzzer<B> {
    pin: BoardPin<B>,
}

impl<B: Board> Buzzer<B> {
    pub fn new(pin: BoardPin<B>) -> Self {
        Self { pin }
    }

    pub fn play(&mut self, tone: Tone) {
        if let Err(e) = self.pin.tone(tone) {
            debug!("Buzzer: write failed: {}", e);
        }
    }
}
