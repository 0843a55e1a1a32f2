//! DS2482-100 one-wire bridge
//!
//! Translates two-wire register traffic into one-wire line timing.
//! Every one-wire primitive is a command write followed by a status
//! poll until the one-wire-busy bit clears. The poll has no iteration
//! cap of its own: each status read is already bounded by the bus
//! engine's deadline, and one-wire slot times are far shorter than it.

use chronon_hal::{BusController, TickTimer};

use crate::bus::{BusEngine, BusError, BusResult};

/// 7-bit device address
pub const DS2482_ADDR: u8 = 0x18;

const CMD_DEVICE_RESET: u8 = 0xF0;
const CMD_WRITE_CONFIG: u8 = 0xD2;
const CMD_SET_READ_POINTER: u8 = 0xE1;
const CMD_ONE_WIRE_RESET: u8 = 0xB4;
const CMD_ONE_WIRE_WRITE_BYTE: u8 = 0xA5;
const CMD_ONE_WIRE_READ_BYTE: u8 = 0x96;

/// Read-pointer code for the read data register
const PTR_READ_DATA: u8 = 0xE1;

/// One-wire line busy
const STATUS_ONE_WIRE_BUSY: u8 = 0x01;
/// Presence pulse detected by the last one-wire reset
const STATUS_PRESENCE: u8 = 0x02;
/// One-wire line shorted low
const STATUS_SHORT: u8 = 0x04;

/// Active pull-up, standard speed. The upper nibble is the one's
/// complement of the lower on the wire; reads return the lower nibble
/// with the upper zeroed.
const CONFIG: u8 = 0xE1;

/// Bridge initialization outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeError {
    /// Underlying bus transaction failed
    Bus(BusError),
    /// Configuration read-back did not match what was written
    ConfigMismatch,
}

impl From<BusError> for BridgeError {
    fn from(err: BusError) -> Self {
        Self::Bus(err)
    }
}

/// Reset the bridge and program its configuration, verifying the
/// read-back.
pub fn init<C: BusController, T: TickTimer>(
    bus: &mut BusEngine<C, T>,
) -> Result<(), BridgeError> {
    bus.write_command(DS2482_ADDR, CMD_DEVICE_RESET)?;
    bus.delay_ms(1);

    bus.write_register(DS2482_ADDR, CMD_WRITE_CONFIG, CONFIG)?;

    let readback = bus.read_command(DS2482_ADDR)?;
    if readback != CONFIG & 0x0F {
        return Err(BridgeError::ConfigMismatch);
    }

    Ok(())
}

/// Generate a one-wire reset pulse.
///
/// Returns whether a device answered with a presence pulse on a
/// healthy (non-shorted) line.
pub fn one_wire_reset<C: BusController, T: TickTimer>(
    bus: &mut BusEngine<C, T>,
) -> BusResult<bool> {
    bus.write_command(DS2482_ADDR, CMD_ONE_WIRE_RESET)?;
    let status = wait_one_wire_idle(bus)?;

    Ok(status & STATUS_PRESENCE != 0 && status & STATUS_SHORT == 0)
}

/// Shift one byte out on the one-wire line.
pub fn write_byte<C: BusController, T: TickTimer>(
    bus: &mut BusEngine<C, T>,
    byte: u8,
) -> BusResult {
    bus.write_register(DS2482_ADDR, CMD_ONE_WIRE_WRITE_BYTE, byte)?;
    wait_one_wire_idle(bus)?;

    Ok(())
}

/// Shift one byte in from the one-wire line.
pub fn read_byte<C: BusController, T: TickTimer>(bus: &mut BusEngine<C, T>) -> BusResult<u8> {
    bus.write_command(DS2482_ADDR, CMD_ONE_WIRE_READ_BYTE)?;
    wait_one_wire_idle(bus)?;

    bus.write_register(DS2482_ADDR, CMD_SET_READ_POINTER, PTR_READ_DATA)?;
    bus.read_command(DS2482_ADDR)
}

/// Poll the status register until the one-wire line goes idle. After a
/// command the bridge leaves its read pointer on the status register,
/// so plain reads suffice.
fn wait_one_wire_idle<C: BusController, T: TickTimer>(
    bus: &mut BusEngine<C, T>,
) -> BusResult<u8> {
    loop {
        let status = bus.read_command(DS2482_ADDR)?;
        if status & STATUS_ONE_WIRE_BUSY == 0 {
            return Ok(status);
        }
    }
}
