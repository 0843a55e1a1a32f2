//! Two-wire bus controller abstraction
//!
//! Models the bus peripheral at the flag level rather than the
//! transaction level. The transaction engine in `chronon-drivers`
//! builds complete addressed transfers out of these primitives, which
//! keeps the timeout and bus-recovery policy in exactly one place and
//! lets host tests simulate a stuck bus.

/// Direction of an addressed transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Controller transmits to the peer
    Write,
    /// Controller receives from the peer
    Read,
}

/// How the transfer ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopMode {
    /// Hardware generates STOP after the last byte
    AutoEnd,
    /// Transfer complete flag raised instead; a repeated start follows
    SoftEnd,
}

/// Flag-level two-wire bus controller
///
/// Implementations map directly onto the peripheral's status and
/// control registers. All methods are non-blocking; waiting is the
/// transaction engine's job.
pub trait BusController {
    /// Clear every latched status flag (STOP, NACK, bus error,
    /// arbitration lost, overrun) and flush the transmit register.
    fn clear_flags(&mut self);

    /// Arm an addressed transfer of `len` bytes.
    ///
    /// `addr7` is the 7-bit peer address; the implementation places the
    /// R/W bit. Does not wait for anything.
    fn start_transfer(&mut self, addr7: u8, len: u8, dir: Direction, stop: StopMode);

    /// Put one byte into the transmit register.
    fn write_byte(&mut self, byte: u8);

    /// Take one byte out of the receive register.
    fn read_byte(&mut self) -> u8;

    /// Transmit register empty and ready for preload (TXE).
    fn tx_empty(&self) -> bool;

    /// Transmit register wants the next byte (TXIS). Not raised after
    /// a NACK.
    fn tx_ready(&self) -> bool;

    /// Receive register holds a byte (RXNE).
    fn rx_ready(&self) -> bool;

    /// Soft-end transfer finished, repeated start may follow (TC).
    fn transfer_complete(&self) -> bool;

    /// STOP condition seen on the bus.
    fn stop_detected(&self) -> bool;

    /// Peer did not acknowledge.
    fn nack_received(&self) -> bool;

    /// Arbitration lost or bus error latched.
    fn bus_error(&self) -> bool;

    /// Disable the peripheral (first step of the recovery sequence).
    fn disable(&mut self);

    /// Peripheral enable state.
    fn is_enabled(&self) -> bool;

    /// Re-enable the peripheral.
    fn enable(&mut self);
}
