//! DS18B20 temperature sensor behind the one-wire bridge
//!
//! Single-drop bus, so every transaction skips ROM addressing. A
//! 12-bit conversion takes up to 750 ms; the scheduler triggers it at
//! one end of its one-second cycle and collects the scratchpad at the
//! other. The scratchpad checksum is the Dallas CRC-8 (reflected
//! polynomial 0x31, feedback 0x8C, seeded at 0).

use chronon_hal::{BusController, TickTimer};

use crate::bus::{BusEngine, BusError};
use crate::ds2482;

const CMD_SKIP_ROM: u8 = 0xCC;
const CMD_CONVERT_T: u8 = 0x44;
const CMD_WRITE_SCRATCHPAD: u8 = 0x4E;
const CMD_READ_SCRATCHPAD: u8 = 0xBE;

/// Alarm thresholds parked outside any reachable temperature
const ALARM_HIGH: u8 = 0x7F;
const ALARM_LOW: u8 = 0x80;

/// 12-bit resolution
const CONFIG_12BIT: u8 = 0x7F;

const SCRATCHPAD_LEN: usize = 9;

/// How a sensor operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Underlying bus transaction failed
    Bus(BusError),
    /// No presence pulse on the one-wire line
    NotPresent,
    /// Scratchpad checksum mismatch
    CrcMismatch,
}

impl From<BusError> for SensorError {
    fn from(err: BusError) -> Self {
        Self::Bus(err)
    }
}

/// Detect the sensor and write its configuration (alarms disabled,
/// 12-bit resolution).
pub fn init<C: BusController, T: TickTimer>(
    bus: &mut BusEngine<C, T>,
) -> Result<(), SensorError> {
    reset(bus)?;

    for byte in [
        CMD_SKIP_ROM,
        CMD_WRITE_SCRATCHPAD,
        ALARM_HIGH,
        ALARM_LOW,
        CONFIG_12BIT,
    ] {
        ds2482::write_byte(bus, byte)?;
    }

    Ok(())
}

/// Kick off a temperature conversion. The result is not ready for
/// another 750 ms.
pub fn start_conversion<C: BusController, T: TickTimer>(
    bus: &mut BusEngine<C, T>,
) -> Result<(), SensorError> {
    reset(bus)?;
    ds2482::write_byte(bus, CMD_SKIP_ROM)?;
    ds2482::write_byte(bus, CMD_CONVERT_T)?;

    Ok(())
}

/// Collect the result of a finished conversion in whole degrees
/// Celsius.
pub fn read_temperature<C: BusController, T: TickTimer>(
    bus: &mut BusEngine<C, T>,
) -> Result<i8, SensorError> {
    reset(bus)?;
    ds2482::write_byte(bus, CMD_SKIP_ROM)?;
    ds2482::write_byte(bus, CMD_READ_SCRATCHPAD)?;

    let mut scratchpad = [0u8; SCRATCHPAD_LEN];
    for slot in scratchpad.iter_mut() {
        *slot = ds2482::read_byte(bus)?;
    }

    if crc8(&scratchpad[..SCRATCHPAD_LEN - 1]) != scratchpad[SCRATCHPAD_LEN - 1] {
        return Err(SensorError::CrcMismatch);
    }

    let raw = i16::from_le_bytes([scratchpad[0], scratchpad[1]]);
    // Arithmetic shift drops the four fractional bits and keeps the
    // sign.
    Ok((raw >> 4) as i8)
}

fn reset<C: BusController, T: TickTimer>(bus: &mut BusEngine<C, T>) -> Result<(), SensorError> {
    if !ds2482::one_wire_reset(bus)? {
        return Err(SensorError::NotPresent);
    }
    Ok(())
}

/// Dallas CRC-8 over `data`.
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;

    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x01 != 0 {
                (crc >> 1) ^ 0x8C
            } else {
                crc >> 1
            };
        }
    }

    crc
}
