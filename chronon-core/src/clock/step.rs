//! Bounded value adjustment helpers
//!
//! Two families: clamping (intensity stops at its extremes) and
//! wrapping (time/date fields jump to the opposite bound).

/// Increment, stopping at `max`.
pub const fn increment(value: u8, max: u8) -> u8 {
    if value < max {
        value + 1
    } else {
        value
    }
}

/// Decrement, stopping at `min`.
pub const fn decrement(value: u8, min: u8) -> u8 {
    if value > min {
        value - 1
    } else {
        value
    }
}

/// Increment, wrapping from `max` to `min`.
pub const fn increment_wrapping(value: u8, min: u8, max: u8) -> u8 {
    if value >= max {
        min
    } else {
        value + 1
    }
}

/// Decrement, wrapping from `min` to `max`.
pub const fn decrement_wrapping(value: u8, min: u8, max: u8) -> u8 {
    if value <= min {
        max
    } else {
        value - 1
    }
}
