//! Shared display state
//!
//! The single source of truth for what is shown. Mutated only by the
//! scheduler and passed by reference to the render sink.

/// Tag selecting what the auxiliary display area shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpecialMode {
    /// Interior (RTC) temperature
    #[default]
    IntTemp,
    /// Exterior (one-wire sensor) temperature
    ExtTemp,
    /// Hour field being edited
    SetHour,
    /// Minute field being edited
    SetMinute,
    /// Second field being edited
    SetSecond,
    /// Date field being edited
    SetDate,
    /// Month field being edited
    SetMonth,
    /// Year field being edited
    SetYear,
    /// Intensity value shown while adjusting
    Intensity,
    /// Fixed error pattern in place of the time digits
    Demo,
}

/// Everything the render sink needs to draw one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayState {
    /// Hour, 0-23
    pub hour: u8,
    /// Minute, 0-59
    pub minute: u8,
    /// Second, 0-59
    pub second: u8,
    /// Day of month, 1-31
    pub date: u8,
    /// Month, 1-12
    pub month: u8,
    /// Year within century, 0-99
    pub year: u8,
    /// Colon between hours and minutes lit
    pub colon: bool,
    /// Interior temperature in whole degrees Celsius
    pub int_temperature: i8,
    /// Exterior temperature in whole degrees Celsius
    pub ext_temperature: i8,
    /// Display intensity, 0-15
    pub intensity: u8,
    /// Auxiliary area selector
    pub special: SpecialMode,
}

impl DisplayState {
    /// Power-on contents: midnight, first of month 1, colon lit.
    pub fn power_on(intensity: u8) -> Self {
        Self {
            hour: 0,
            minute: 0,
            second: 0,
            date: 1,
            month: 1,
            year: 0,
            colon: true,
            int_temperature: 0,
            ext_temperature: 0,
            intensity,
            special: SpecialMode::IntTemp,
        }
    }
}
