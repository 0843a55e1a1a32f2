//! DS3231 real-time clock
//!
//! Calendar, time and die temperature over the two-wire bus. The chip
//! keeps time through power loss on its backup supply; when even that
//! ran out it raises the oscillator-stop flag, and [`init`] answers by
//! rewriting the whole configuration and parking the clock at the
//! power-on default time.

use chronon_core::bcd::{from_bcd, to_bcd};
use chronon_core::traits::RtcSample;
use chronon_hal::{BusController, TickTimer};

use crate::bus::{BusEngine, BusResult};

/// 7-bit device address
pub const DS3231_ADDR: u8 = 0x68;

const REG_SECONDS: u8 = 0x00;
const REG_ALARM1: u8 = 0x07;
const REG_TEMP_MSB: u8 = 0x11;
const REG_STATUS: u8 = 0x0F;

/// Oscillator-stop flag in the status register
const STATUS_OSF: u8 = 0x80;

/// Alarm block (0x07-0x0D), control, status and aging registers,
/// contiguous from REG_ALARM1. All zero: oscillator on, alarms and
/// square-wave output off, flags cleared.
const SAFE_CONFIG_LEN: usize = 10;

const TIME_DATA_LEN: usize = 7;
const TEMP_DATA_LEN: usize = 2;

/// Check for a power loss deep enough to stop the oscillator and
/// recover from it.
pub fn init<C: BusController, T: TickTimer>(bus: &mut BusEngine<C, T>) -> BusResult {
    let status = bus.read_register(DS3231_ADDR, REG_STATUS)?;

    if status & STATUS_OSF != 0 {
        set_time(bus, &RtcSample::power_on_default())?;
    }

    Ok(())
}

/// Read the full calendar, time and temperature state.
pub fn read_all<C: BusController, T: TickTimer>(
    bus: &mut BusEngine<C, T>,
) -> BusResult<RtcSample> {
    let mut time = [0u8; TIME_DATA_LEN];
    bus.read(DS3231_ADDR, REG_SECONDS, &mut time)?;

    let mut temp = [0u8; TEMP_DATA_LEN];
    bus.read(DS3231_ADDR, REG_TEMP_MSB, &mut temp)?;

    Ok(RtcSample {
        second: from_bcd(time[0] & 0x7F),
        minute: from_bcd(time[1] & 0x7F),
        hour: from_bcd(time[2] & 0x3F),
        weekday: from_bcd(time[3] & 0x07),
        date: from_bcd(time[4] & 0x3F),
        month: from_bcd(time[5] & 0x1F),
        year: from_bcd(time[6]),
        // Whole degrees live in the signed MSB; the LSB holds
        // fractional bits the display never shows.
        temperature: temp[0] as i8,
    })
}

/// Write the calendar and time registers.
///
/// The safe configuration is re-applied first, so a clock set by the
/// user always leaves the chip with alarms off and flags cleared no
/// matter what state it powered up in.
pub fn set_time<C: BusController, T: TickTimer>(
    bus: &mut BusEngine<C, T>,
    sample: &RtcSample,
) -> BusResult {
    bus.write(DS3231_ADDR, REG_ALARM1, &[0u8; SAFE_CONFIG_LEN])?;

    let time = [
        to_bcd(sample.second) & 0x7F,
        to_bcd(sample.minute) & 0x7F,
        // Bit 6 low selects 24-hour mode.
        to_bcd(sample.hour) & 0x3F,
        to_bcd(sample.weekday) & 0x07,
        to_bcd(sample.date) & 0x3F,
        to_bcd(sample.month) & 0x1F,
        to_bcd(sample.year),
    ];

    bus.write(DS3231_ADDR, REG_SECONDS, &time)
}
