//! Render sink abstraction
//!
//! The LED matrix rendering (segment encoding, SPI push) is an
//! external collaborator; the scheduler only guarantees that the
//! display state handed over is fully consistent at call time.

use crate::clock::DisplayState;

/// Display rendering collaborator
pub trait RenderSink {
    /// Push the current display contents.
    fn update_data(&mut self, state: &DisplayState);

    /// Push the current display configuration (intensity).
    fn update_config(&mut self, intensity: u8);
}
