//! Clock mode definition

/// Operating modes
///
/// Exactly one mode is active; the scheduler owns it exclusively and
/// every other component only sees the display fields derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockMode {
    /// Time and temperature display
    #[default]
    Normal,
    /// Editing the hour field
    HourSet,
    /// Editing the minute field
    MinuteSet,
    /// Editing the second field (plus/minus zero it)
    SecondSet,
    /// Editing the day-of-month field
    DateSet,
    /// Editing the month field
    MonthSet,
    /// Editing the year field
    YearSet,
    /// Adjusting display intensity
    IntensitySet,
    /// Fixed test pattern in place of the time digits
    Demo,
}

impl ClockMode {
    /// Modes that edit time/date fields. These halt RTC reads and run
    /// the inactivity timeout.
    pub fn is_time_set(self) -> bool {
        matches!(
            self,
            ClockMode::HourSet
                | ClockMode::MinuteSet
                | ClockMode::SecondSet
                | ClockMode::DateSet
                | ClockMode::MonthSet
                | ClockMode::YearSet
        )
    }
}
