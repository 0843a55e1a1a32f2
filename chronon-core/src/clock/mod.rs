//! Scheduler and clock mode state machine
//!
//! All user-visible behavior is a function of the current mode, the
//! key inputs, and the wrapping tick counter. The [`ClockContext`]
//! owns every piece of mutable state; devices are borrowed for the
//! duration of one tick.

mod context;
mod display;
mod keyboard;
mod mode;
pub mod step;
pub mod timing;

pub use context::ClockContext;
pub use display::{DisplayState, SpecialMode};
pub use keyboard::KeyboardLock;
pub use mode::ClockMode;
