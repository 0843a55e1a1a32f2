//! Scheduler timing constants
//!
//! Everything is derived from the 32 Hz hardware tick. The absolute
//! values are tunable; the relative ordering (sensor read after its
//! conversion window, debounce shorter than the save delay, save delay
//! shorter than the inactivity timeout) must be preserved.

/// Hardware tick rate
pub const TICK_HZ: u32 = 32;

/// Ticks in one full scheduler cycle (one second)
pub const CYCLE_TICKS: u8 = TICK_HZ as u8;

/// RTC re-read every 8th tick (4 Hz)
pub const RTC_READ_DIVISOR: u8 = 8;

/// Display data push every 4th tick (8 Hz)
pub const DISPLAY_DATA_DIVISOR: u8 = 4;

/// Display config push every 4th tick, offset from the data push
pub const DISPLAY_CONFIG_PHASE: u8 = 2;

/// Cycle position that triggers an external conversion
pub const SENSOR_TRIGGER_TICK: u8 = 1;

/// Cycle position that collects the conversion result.
/// A 12-bit conversion needs 750 ms; 26 ticks leave 812 ms.
pub const SENSOR_READ_TICK: u8 = 27;

/// Interior/exterior temperature alternation period (2 s)
pub const TEMP_CYCLE_TICKS: u8 = 64;

/// Settings write coalescing delay (2 s)
pub const SAVE_DELAY_TICKS: u16 = 64;

/// Set-mode inactivity timeout (10 s)
pub const INACTIVITY_TICKS: u16 = 320;

/// Keyboard debounce interval (250 ms)
pub const KEYBOARD_DEBOUNCE_TICKS: u16 = 8;
