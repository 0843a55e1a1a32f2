//! Peripheral drivers for the Chronon desk clock
//!
//! Everything here is generic over the flag-level traits in
//! `chronon-hal`, so the whole crate runs in host tests against mock
//! peripherals:
//!
//! - Two-wire bus transaction engine with timeout recovery
//! - DS3231 real-time clock service
//! - DS2482 one-wire bridge and DS18B20 temperature sensor
//! - Flash-backed settings store

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod bus;
pub mod ds18b20;
pub mod ds2482;
pub mod ds3231;
pub mod storage;

#[cfg(test)]
mod testutil;
