//! Keyboard abstraction
//!
//! Four independent momentary keys. Debounce is not the keypad's
//! job; the scheduler's lock latch handles that.

/// Momentary key inputs
pub trait KeyPad {
    /// Enter key currently pressed.
    fn enter_pressed(&mut self) -> bool;

    /// Plus key currently pressed.
    fn plus_pressed(&mut self) -> bool;

    /// Minus key currently pressed.
    fn minus_pressed(&mut self) -> bool;

    /// Esc key currently pressed.
    fn esc_pressed(&mut self) -> bool;

    /// All four keys read released in the same scan.
    fn all_released(&mut self) -> bool {
        !self.enter_pressed()
            && !self.plus_pressed()
            && !self.minus_pressed()
            && !self.esc_pressed()
    }
}
