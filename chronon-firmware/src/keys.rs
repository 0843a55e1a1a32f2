//! Four-key keyboard input
//!
//! Keys pull their lines low when pressed. Generic over
//! [`embedded_hal::digital::InputPin`] so the board wiring stays in
//! main.

use chronon_core::traits::KeyPad;
use embedded_hal::digital::InputPin;

pub struct Keys<P> {
    enter: P,
    plus: P,
    minus: P,
    esc: P,
}

impl<P: InputPin> Keys<P> {
    pub fn new(enter: P, plus: P, minus: P, esc: P) -> Self {
        Self {
            enter,
            plus,
            minus,
            esc,
        }
    }
}

fn pressed<P: InputPin>(pin: &mut P) -> bool {
    matches!(pin.is_low(), Ok(true))
}

impl<P: InputPin> KeyPad for Keys<P> {
    fn enter_pressed(&mut self) -> bool {
        pressed(&mut self.enter)
    }

    fn plus_pressed(&mut self) -> bool {
        pressed(&mut self.plus)
    }

    fn minus_pressed(&mut self) -> bool {
        pressed(&mut self.minus)
    }

    fn esc_pressed(&mut self) -> bool {
        pressed(&mut self.esc)
    }
}
