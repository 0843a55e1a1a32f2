//! Two-wire bus transaction engine
//!
//! Builds complete addressed transfers out of the flag-level
//! [`BusController`] primitives. Every flag wait is bounded by the same
//! millisecond deadline; when it expires the engine runs the
//! peripheral recovery sequence (disable, confirm, re-enable) before
//! reporting the failure, so a wedged bus can never stall the 32 Hz
//! scheduler for more than one transaction.
//!
//! All paths in and out of a transaction converge on a flag clear, so
//! a failed transfer leaves nothing latched for the next one.

use chronon_hal::{BusController, Direction, StopMode, TickTimer};

/// Per-flag wait deadline in milliseconds
pub const BUS_TIMEOUT_MS: u32 = 5;

/// How a bus transaction failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// The peer did not acknowledge. The bus itself is healthy.
    Nack,
    /// A flag wait timed out or the controller latched a bus error.
    /// The recovery sequence has already run.
    BusFault,
}

/// Transaction result
pub type BusResult<T = ()> = Result<T, BusError>;

/// Bus transaction engine owning the controller and its deadline timer
pub struct BusEngine<C, T> {
    ctrl: C,
    timer: T,
}

impl<C: BusController, T: TickTimer> BusEngine<C, T> {
    pub fn new(ctrl: C, timer: T) -> Self {
        Self { ctrl, timer }
    }

    /// Address `addr7` with a zero-length write and report whether it
    /// acknowledged.
    pub fn probe(&mut self, addr7: u8) -> bool {
        self.ctrl.clear_flags();
        self.ctrl
            .start_transfer(addr7, 0, Direction::Write, StopMode::AutoEnd);

        let stopped = self.poll_until(|c| c.stop_detected());
        let present = stopped && !self.ctrl.nack_received();

        self.ctrl.clear_flags();
        present
    }

    /// Write `data` to the peer's register `reg`.
    pub fn write(&mut self, addr7: u8, reg: u8, data: &[u8]) -> BusResult {
        let result = self.write_inner(addr7, reg, data);
        self.ctrl.clear_flags();
        result
    }

    /// Read `buf.len()` bytes starting at the peer's register `reg`.
    ///
    /// Two transfers joined by a repeated start: a one-byte write that
    /// sets the peer's register pointer, then the read itself.
    pub fn read(&mut self, addr7: u8, reg: u8, buf: &mut [u8]) -> BusResult {
        let result = self.read_inner(addr7, reg, buf);
        self.ctrl.clear_flags();
        result
    }

    /// Send a single command byte with no payload.
    pub fn write_command(&mut self, addr7: u8, command: u8) -> BusResult {
        let result = self.write_command_inner(addr7, command);
        self.ctrl.clear_flags();
        result
    }

    /// Read a single byte from wherever the peer's register pointer
    /// currently points.
    pub fn read_command(&mut self, addr7: u8) -> BusResult<u8> {
        let result = self.read_command_inner(addr7);
        self.ctrl.clear_flags();
        result
    }

    /// Write one byte to the peer's register `reg`.
    pub fn write_register(&mut self, addr7: u8, reg: u8, value: u8) -> BusResult {
        self.write(addr7, reg, &[value])
    }

    /// Read one byte from the peer's register `reg`.
    pub fn read_register(&mut self, addr7: u8, reg: u8) -> BusResult<u8> {
        let mut buf = [0u8; 1];
        self.read(addr7, reg, &mut buf)?;
        Ok(buf[0])
    }

    /// Busy-wait for `ms` milliseconds on the deadline timer.
    pub fn delay_ms(&mut self, ms: u32) {
        let mut elapsed = 0;

        self.timer.restart();
        while elapsed < ms {
            if self.timer.tick_elapsed() {
                elapsed += 1;
            }
        }
    }

    fn write_inner(&mut self, addr7: u8, reg: u8, data: &[u8]) -> BusResult {
        self.ctrl.clear_flags();

        if !self.poll_until(|c| c.tx_empty()) {
            return Err(BusError::BusFault);
        }

        // Preload the register address so transmission starts the
        // moment the address phase completes.
        self.ctrl.write_byte(reg);
        self.ctrl.start_transfer(
            addr7,
            data.len() as u8 + 1,
            Direction::Write,
            StopMode::AutoEnd,
        );

        for &byte in data {
            self.wait_tx_ready()?;
            self.ctrl.write_byte(byte);
        }

        if !self.poll_until(|c| c.stop_detected()) {
            return Err(BusError::BusFault);
        }
        if self.ctrl.nack_received() {
            return Err(BusError::Nack);
        }

        Ok(())
    }

    fn read_inner(&mut self, addr7: u8, reg: u8, buf: &mut [u8]) -> BusResult {
        self.ctrl.clear_flags();

        if !self.poll_until(|c| c.tx_empty()) {
            return Err(BusError::BusFault);
        }

        self.ctrl.write_byte(reg);
        self.ctrl
            .start_transfer(addr7, 1, Direction::Write, StopMode::SoftEnd);

        if !self.poll_until(|c| c.transfer_complete() || c.nack_received() || c.bus_error()) {
            return Err(BusError::BusFault);
        }
        if !self.ctrl.transfer_complete() {
            return if self.ctrl.bus_error() {
                Err(BusError::BusFault)
            } else {
                Err(BusError::Nack)
            };
        }

        self.ctrl
            .start_transfer(addr7, buf.len() as u8, Direction::Read, StopMode::AutoEnd);

        for slot in buf.iter_mut() {
            *slot = self.wait_rx_byte()?;
        }

        if !self.poll_until(|c| c.stop_detected()) {
            return Err(BusError::BusFault);
        }

        Ok(())
    }

    fn write_command_inner(&mut self, addr7: u8, command: u8) -> BusResult {
        self.ctrl.clear_flags();

        if !self.poll_until(|c| c.tx_empty()) {
            return Err(BusError::BusFault);
        }

        self.ctrl.write_byte(command);
        self.ctrl
            .start_transfer(addr7, 1, Direction::Write, StopMode::AutoEnd);

        if !self.poll_until(|c| c.stop_detected()) {
            return Err(BusError::BusFault);
        }
        if self.ctrl.nack_received() {
            return Err(BusError::Nack);
        }

        Ok(())
    }

    fn read_command_inner(&mut self, addr7: u8) -> BusResult<u8> {
        self.ctrl.clear_flags();

        self.ctrl
            .start_transfer(addr7, 1, Direction::Read, StopMode::AutoEnd);

        let byte = self.wait_rx_byte()?;

        if !self.poll_until(|c| c.stop_detected()) {
            return Err(BusError::BusFault);
        }

        Ok(byte)
    }

    /// Wait for the transmitter to want the next byte, classifying a
    /// NACK-terminated transfer separately from a dead bus.
    fn wait_tx_ready(&mut self) -> BusResult {
        if !self.poll_until(|c| c.tx_ready() || c.nack_received() || c.bus_error()) {
            return Err(BusError::BusFault);
        }
        if self.ctrl.bus_error() {
            return Err(BusError::BusFault);
        }
        if !self.ctrl.tx_ready() {
            return Err(BusError::Nack);
        }
        Ok(())
    }

    fn wait_rx_byte(&mut self) -> BusResult<u8> {
        if !self.poll_until(|c| c.rx_ready() || c.nack_received() || c.bus_error()) {
            return Err(BusError::BusFault);
        }
        if self.ctrl.bus_error() {
            return Err(BusError::BusFault);
        }
        if !self.ctrl.rx_ready() {
            return Err(BusError::Nack);
        }
        Ok(self.ctrl.read_byte())
    }

    /// Spin until `cond` holds, bounded by [`BUS_TIMEOUT_MS`]. On
    /// expiry the controller recovery sequence runs and the poll
    /// reports failure.
    fn poll_until(&mut self, cond: impl Fn(&C) -> bool) -> bool {
        let mut elapsed = 0;

        self.timer.restart();
        while !cond(&self.ctrl) {
            if self.timer.tick_elapsed() {
                elapsed += 1;
            }
            if elapsed >= BUS_TIMEOUT_MS {
                self.recover();
                return false;
            }
        }

        true
    }

    /// Disable the peripheral, confirm it went down, re-enable it.
    /// Aborts whatever transfer was wedged and releases the lines.
    fn recover(&mut self) {
        self.ctrl.disable();
        while self.ctrl.is_enabled() {
            self.ctrl.disable();
        }
        self.ctrl.enable();
    }
}

#[cfg(test)]
impl<C, T> BusEngine<C, T> {
    pub(crate) fn controller(&mut self) -> &mut C {
        &mut self.ctrl
    }
}
