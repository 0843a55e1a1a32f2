//! Chronon - LED matrix desk clock firmware
//!
//! STM32F030 binary. All behavior lives in `chronon-core`'s scheduler
//! context; this crate wires the board together and runs the 32 Hz
//! tick loop.
//!
//! Named after the chronon, the proposed indivisible quantum of time -
//! fitting for a clock whose entire behavior advances in fixed
//! 31.25 ms scheduler ticks.

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::spi;
use embassy_stm32::time::Hertz;
use embassy_time::{Duration, Ticker};
use {defmt_rtt as _, panic_probe as _};

use chronon_core::clock::timing::TICK_HZ;
use chronon_core::clock::ClockContext;
use chronon_drivers::bus::BusEngine;
use chronon_drivers::storage::FlashSettingsStore;

mod board;
mod bus_ctrl;
mod display;
mod flash_bank;
mod keys;
mod tick;
mod watchdog;

use board::ClockBoard;
use bus_ctrl::BusPeripheral;
use display::MatrixLink;
use flash_bank::SettingsFlash;
use keys::Keys;
use tick::MillisTimer;
use watchdog::ClockWatchdog;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Chronon firmware starting...");

    let p = embassy_stm32::init(Default::default());

    let bus = BusEngine::new(
        BusPeripheral::new(p.I2C1, p.PB6, p.PB7),
        MillisTimer::new(),
    );
    let store = FlashSettingsStore::new(SettingsFlash::new(p.FLASH), MillisTimer::new());

    let keys = Keys::new(
        Input::new(p.PA0, Pull::Up), // Enter
        Input::new(p.PA1, Pull::Up), // Plus
        Input::new(p.PA2, Pull::Up), // Minus
        Input::new(p.PA3, Pull::Up), // Esc
    );

    let mut spi_config = spi::Config::default();
    spi_config.frequency = Hertz(1_000_000);
    let display = MatrixLink::new(
        spi::Spi::new_blocking_txonly(p.SPI1, p.PA5, p.PA7, spi_config),
        Output::new(p.PB0, Level::Low, Speed::Low),
    );

    let watchdog = ClockWatchdog::new(p.IWDG);

    let mut board = ClockBoard::new(bus, store, keys, display, watchdog);
    let (settings, sensor_present) = board.power_up();
    info!(
        "intensity {}, external sensor {}",
        settings.intensity, sensor_present
    );

    let mut ctx = ClockContext::new(settings, sensor_present);

    let mut ticker = Ticker::every(Duration::from_hz(TICK_HZ as u64));
    loop {
        ticker.next().await;
        ctx.on_tick(&mut board);
    }
}
