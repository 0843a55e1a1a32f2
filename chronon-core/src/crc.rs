//! CRC-32 over the settings record
//!
//! Byte-wise, non-reflected CRC-32: initial value 0xFFFFFFFF,
//! polynomial 0x04C11DB7, no input or output bit reversal, no final
//! XOR. This is bit-exact with the STM32 hardware CRC unit fed one
//! byte at a time with reversal disabled, so records written by either
//! computation verify under the other.

const POLYNOMIAL: u32 = 0x04C1_1DB7;
const INITIAL: u32 = 0xFFFF_FFFF;

/// Compute the CRC-32 of `data`.
pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = INITIAL;

    for &byte in data {
        crc ^= (byte as u32) << 24;

        for _ in 0..8 {
            crc = if crc & 0x8000_0000 != 0 {
                (crc << 1) ^ POLYNOMIAL
            } else {
                crc << 1
            };
        }
    }

    crc
}
