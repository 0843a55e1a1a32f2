//! Packed-decimal (BCD) codec
//!
//! Every time and date register on the RTC stores one decimal digit
//! per nibble. Values outside 0-99 cannot be represented.

/// Encode a binary value 0-99 as packed decimal.
pub const fn to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

/// Decode a packed-decimal byte back to binary.
pub const fn from_bcd(value: u8) -> u8 {
    ((value >> 4) * 10) + (value & 0x0F)
}
