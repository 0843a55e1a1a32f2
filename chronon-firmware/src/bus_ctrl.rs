//! Flag-level bus controller over the I2C1 peripheral
//!
//! The transaction engine owns all waiting and recovery policy; this
//! type only maps the [`BusController`] primitives onto the peripheral
//! registers, the way the reference manual's flag diagrams describe
//! them.

use chronon_hal::{BusController, Direction, StopMode};
use embassy_stm32::pac::{self, i2c};
use embassy_stm32::peripherals::{I2C1, PB6, PB7};

/// 100 kHz timing for the 8 MHz HSI kernel clock, from the reference
/// manual's timing table.
const TIMING_100KHZ_8MHZ: u32 = 0x1042_0F13;

const SCL_PIN: usize = 6;
const SDA_PIN: usize = 7;

pub struct BusPeripheral {
    regs: i2c::I2c,
}

impl BusPeripheral {
    /// Claim I2C1 with PB6/PB7 and bring it up at 100 kHz.
    pub fn new(_peri: I2C1, _scl: PB6, _sda: PB7) -> Self {
        pac::RCC.ahbenr().modify(|w| w.set_gpioben(true));
        pac::RCC.apb1enr().modify(|w| w.set_i2c1en(true));

        // PB6/PB7 as open-drain AF1
        for pin in [SCL_PIN, SDA_PIN] {
            pac::GPIOB
                .otyper()
                .modify(|w| w.set_ot(pin, pac::gpio::vals::Ot::OPENDRAIN));
            pac::GPIOB.afr(pin / 8).modify(|w| w.set_afr(pin % 8, 1));
            pac::GPIOB
                .moder()
                .modify(|w| w.set_moder(pin, pac::gpio::vals::Moder::ALTERNATE));
        }

        let regs = pac::I2C1;
        regs.cr1().modify(|w| w.set_pe(false));
        regs.timingr().write(|w| w.0 = TIMING_100KHZ_8MHZ);
        regs.cr1().modify(|w| w.set_pe(true));

        Self { regs }
    }
}

impl BusController for BusPeripheral {
    fn clear_flags(&mut self) {
        self.regs.icr().write(|w| {
            w.set_stopcf(true);
            w.set_nackcf(true);
            w.set_berrcf(true);
            w.set_arlocf(true);
            w.set_ovrcf(true);
        });

        // Flush a stale transmit byte.
        if !self.regs.isr().read().txe() {
            self.regs.isr().modify(|w| w.set_txe(true));
        }
    }

    fn start_transfer(&mut self, addr7: u8, len: u8, dir: Direction, stop: StopMode) {
        self.regs.cr2().write(|w| {
            w.set_sadd((addr7 as u16) << 1);
            w.set_dir(match dir {
                Direction::Write => i2c::vals::Dir::WRITE,
                Direction::Read => i2c::vals::Dir::READ,
            });
            w.set_nbytes(len);
            w.set_autoend(matches!(stop, StopMode::AutoEnd));
            w.set_start(true);
        });
    }

    fn write_byte(&mut self, byte: u8) {
        self.regs.txdr().write(|w| w.set_txdata(byte));
    }

    fn read_byte(&mut self) -> u8 {
        self.regs.rxdr().read().rxdata()
    }

    fn tx_empty(&self) -> bool {
        self.regs.isr().read().txe()
    }

    fn tx_ready(&self) -> bool {
        self.regs.isr().read().txis()
    }

    fn rx_ready(&self) -> bool {
        self.regs.isr().read().rxne()
    }

    fn transfer_complete(&self) -> bool {
        self.regs.isr().read().tc()
    }

    fn stop_detected(&self) -> bool {
        self.regs.isr().read().stopf()
    }

    fn nack_received(&self) -> bool {
        self.regs.isr().read().nackf()
    }

    fn bus_error(&self) -> bool {
        let isr = self.regs.isr().read();
        isr.berr() || isr.arlo()
    }

    fn disable(&mut self) {
        self.regs.cr1().modify(|w| w.set_pe(false));
    }

    fn is_enabled(&self) -> bool {
        self.regs.cr1().read().pe()
    }

    fn enable(&mut self) {
        self.regs.cr1().modify(|w| w.set_pe(true));
    }
}
