//! Board-agnostic core logic for the desk clock firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Device abstraction traits (RTC, external sensor, keys, render sink)
//! - The scheduler context and clock mode state machine
//! - Keyboard debounce latch
//! - Settings record codec and verification
//! - Packed-decimal (BCD) codec
//! - CRC-32 over the settings record

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod bcd;
pub mod clock;
pub mod crc;
pub mod settings;
pub mod traits;
