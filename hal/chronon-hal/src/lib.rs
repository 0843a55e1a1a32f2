//! Chronon Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the driver and
//! core crates are written against. The firmware crate implements them
//! on the actual STM32F0 peripherals; host tests implement them with
//! mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (chronon-firmware)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  chronon-drivers (bus engine, chips)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  chronon-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`bus::BusController`] - Flag-level two-wire bus controller
//! - [`flash::FlashBank`] - Settings page in non-volatile memory
//! - [`time::TickTimer`] - Millisecond-granularity elapsed-time source

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod flash;
pub mod time;

// Re-export key traits at crate root for convenience
pub use bus::{BusController, Direction, StopMode};
pub use flash::{FlashBank, PROGRAM_UNIT};
pub use time::TickTimer;
