//! One pin of a shared board, exposed through `embedded-hal` 1.0.
//!
//! Event sources and LED drivers are written against `InputPin`,
//! `OutputPin` and `SetDutyCycle`, so they run unchanged on a real HAL
//! pin.  On the station they run on a [`BoardPin`], which forwards every
//! call to the pin-addressed [`Board`] collaborator.
//!
//! The board is shared as `Rc<RefCell<_>>`: everything runs on the
//! dispatcher's single context, so a borrow never outlives one call.

use core::cell::RefCell;
use std::rc::Rc;

use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};

use crate::app::ports::{AnalogIn, Board, DisplayOp, Tone};
use crate::error::PortError;
use crate::pins::PWM_MAX;

/// A board shared between all of its pins.
pub type SharedBoard<B> = Rc<RefCell<B>>;

/// Wrap a board for sharing.
pub fn share<B: Board>(board: B) -> SharedBoard<B> {
    Rc::new(RefCell::new(board))
}

pub struct BoardPin<B> {
    board: SharedBoard<B>,
    pin: u8,
}

impl<B: Board> BoardPin<B> {
    pub fn new(board: &SharedBoard<B>, pin: u8) -> Self {
        Self {
            board: Rc::clone(board),
            pin,
        }
    }

    /// Drive a tone on this pin.
    pub fn tone(&mut self, tone: Tone) -> Result<(), PortError> {
        self.board.borrow_mut().write_tone(self.pin, tone)
    }

    /// Send a display operation to the composite device behind this pin.
    pub fn display(&mut self, op: DisplayOp<'_>) -> Result<(), PortError> {
        self.board.borrow_mut().write_display(op)
    }
}

impl<B: Board> digital::ErrorType for BoardPin<B> {
    type Error = PortError;
}

impl<B: Board> InputPin for BoardPin<B> {
    fn is_high(&mut self) -> Result<bool, PortError> {
        self.board.borrow_mut().read_digital(self.pin)
    }

    fn is_low(&mut self) -> Result<bool, PortError> {
        self.is_high().map(|high| !high)
    }
}

impl<B: Board> OutputPin for BoardPin<B> {
    fn set_high(&mut self) -> Result<(), PortError> {
        self.board.borrow_mut().write_digital(self.pin, true)
    }

    fn set_low(&mut self) -> Result<(), PortError> {
        self.board.borrow_mut().write_digital(self.pin, false)
    }
}

impl<B: Board> pwm::ErrorType for BoardPin<B> {
    type Error = PortError;
}

impl<B: Board> SetDutyCycle for BoardPin<B> {
    fn max_duty_cycle(&self) -> u16 {
        PWM_MAX as u16
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), PortError> {
        let duty = duty.min(PWM_MAX as u16) as u8;
        self.board.borrow_mut().write_pwm(self.pin, duty)
    }
}

impl<B: Board> AnalogIn for BoardPin<B> {
    fn read_sample(&mut self) -> Result<u16, PortError> {
        self.board.borrow_mut().read_analog(self.pin)
    }
}
