//! Device abstraction traits
//!
//! The scheduler is written against these traits so its entire
//! behavior can be exercised on the host with fake devices. The
//! firmware crate implements all of them on one board struct, which
//! the scheduler borrows mutably for the duration of a tick.

mod display;
mod keys;
mod rtc;
mod sensor;
mod storage;
mod watchdog;

pub use display::RenderSink;
pub use keys::KeyPad;
pub use rtc::{Rtc, RtcSample};
pub use sensor::ExternalSensor;
pub use storage::SettingsStore;
pub use watchdog::Watchdog;
