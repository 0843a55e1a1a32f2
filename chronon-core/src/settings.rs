//! Persistent settings record
//!
//! One fixed-size record in a reserved non-volatile page:
//!
//! ```text
//! offset 0  u16  identifying tag (little-endian)
//! offset 2  u8   display intensity
//! offset 3  u8   reserved, zeroed on write
//! offset 4  u32  CRC-32 over bytes 0..4 (little-endian)
//! ```
//!
//! A record is trusted only after the tag, the CRC, and the value
//! ranges all check out; anything else is replaced by defaults before
//! it can propagate. The codec here is pure so it can be verified on
//! the host; the erase/program cycle lives in the drivers crate.

use crate::crc::crc32;

/// Identifying tag of a valid record
pub const SETTINGS_TAG: u16 = 0x7EC9;

/// Stored record length in bytes
pub const RECORD_LEN: usize = 8;

/// Lowest display intensity
pub const MIN_INTENSITY: u8 = 0x0;

/// Highest display intensity
pub const MAX_INTENSITY: u8 = 0xF;

/// Number of bytes covered by the trailing CRC field
const CRC_COVERED_LEN: usize = RECORD_LEN - 4;

/// User-adjustable persistent settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    /// Display intensity, MIN_INTENSITY..=MAX_INTENSITY
    pub intensity: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            intensity: (MAX_INTENSITY + MIN_INTENSITY) / 2,
        }
    }
}

impl Settings {
    /// Serialize into the stored layout, stamping the tag, zeroing the
    /// reserved byte and recomputing the CRC.
    pub fn to_record(&self) -> [u8; RECORD_LEN] {
        let mut record = [0u8; RECORD_LEN];

        record[0..2].copy_from_slice(&SETTINGS_TAG.to_le_bytes());
        record[2] = self.intensity;
        record[3] = 0;

        let crc = crc32(&record[..CRC_COVERED_LEN]);
        record[4..8].copy_from_slice(&crc.to_le_bytes());

        record
    }

    /// Deserialize and verify a stored record.
    ///
    /// Returns `None` on tag mismatch, CRC mismatch, or an intensity
    /// outside its range. The extremes of the range are legal values
    /// and verify successfully.
    pub fn from_record(record: &[u8; RECORD_LEN]) -> Option<Self> {
        let tag = u16::from_le_bytes([record[0], record[1]]);
        if tag != SETTINGS_TAG {
            return None;
        }

        let stored_crc = u32::from_le_bytes([record[4], record[5], record[6], record[7]]);
        if stored_crc != crc32(&record[..CRC_COVERED_LEN]) {
            return None;
        }

        let intensity = record[2];
        if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&intensity) {
            return None;
        }

        Some(Self { intensity })
    }
}
