//! Real-time clock abstraction

/// One complete calendar/time/temperature reading
///
/// A sample is populated atomically: a failed read never leaves a
/// partially updated sample behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RtcSample {
    /// Year within century, 0-99
    pub year: u8,
    /// Month, 1-12
    pub month: u8,
    /// Day of month, 1-31
    pub date: u8,
    /// Day of week, 1-7
    pub weekday: u8,
    /// Hour, 0-23 (24-hour mode)
    pub hour: u8,
    /// Minute, 0-59
    pub minute: u8,
    /// Second, 0-59
    pub second: u8,
    /// Chip temperature in whole degrees Celsius
    pub temperature: i8,
}

impl RtcSample {
    /// Midnight on the first day of month 1, the state the clock is
    /// reset to after a power loss.
    pub const fn power_on_default() -> Self {
        Self {
            year: 0,
            month: 1,
            date: 1,
            weekday: 1,
            hour: 0,
            minute: 0,
            second: 0,
            temperature: 0,
        }
    }
}

/// Real-time clock service
pub trait Rtc {
    /// Read the full calendar, time and temperature state.
    ///
    /// Returns `None` when any underlying transfer failed; the caller
    /// keeps its previous values.
    fn read_all(&mut self) -> Option<RtcSample>;

    /// Write the calendar and time fields (temperature is read-only).
    fn set_time(&mut self, sample: &RtcSample) -> bool;
}
