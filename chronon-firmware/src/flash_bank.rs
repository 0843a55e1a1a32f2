//! Settings page flash controller
//!
//! The last flash page is reserved by memory.x for the settings
//! record. This type exposes the controller's unlock / erase / program
//! primitives over that one page; all sequencing and timeouts live in
//! the settings store.

#![allow(unsafe_code)] // raw pointer access to the reserved page

use chronon_hal::FlashBank;
use embassy_stm32::pac;
use embassy_stm32::peripherals::FLASH;

/// First byte of the reserved settings page
const SETTINGS_PAGE_ADDR: u32 = 0x0800_FC00;

const UNLOCK_KEY1: u32 = 0x4567_0123;
const UNLOCK_KEY2: u32 = 0xCDEF_89AB;

pub struct SettingsFlash {
    _peri: FLASH,
}

impl SettingsFlash {
    pub fn new(peri: FLASH) -> Self {
        Self { _peri: peri }
    }
}

impl FlashBank for SettingsFlash {
    fn read_record(&mut self, buf: &mut [u8]) {
        for (offset, slot) in buf.iter_mut().enumerate() {
            let addr = (SETTINGS_PAGE_ADDR as usize + offset) as *const u8;
            *slot = unsafe { addr.read_volatile() };
        }
    }

    fn busy(&self) -> bool {
        pac::FLASH.sr().read().bsy()
    }

    fn take_end_of_op(&mut self) -> bool {
        if pac::FLASH.sr().read().eop() {
            // Write-one-to-clear.
            pac::FLASH.sr().write(|w| w.set_eop(true));
            true
        } else {
            false
        }
    }

    fn locked(&self) -> bool {
        pac::FLASH.cr().read().lock()
    }

    fn unlock(&mut self) {
        pac::FLASH.keyr().write_value(UNLOCK_KEY1);
        pac::FLASH.keyr().write_value(UNLOCK_KEY2);
    }

    fn lock(&mut self) {
        pac::FLASH.cr().modify(|w| w.set_lock(true));
    }

    fn start_page_erase(&mut self) {
        pac::FLASH.cr().modify(|w| w.set_per(true));
        pac::FLASH.ar().write_value(SETTINGS_PAGE_ADDR);
        pac::FLASH.cr().modify(|w| w.set_strt(true));
    }

    fn end_page_erase(&mut self) {
        pac::FLASH.cr().modify(|w| w.set_per(false));
    }

    fn begin_program(&mut self) {
        pac::FLASH.cr().modify(|w| w.set_pg(true));
    }

    fn program_halfword(&mut self, offset: usize, value: u16) {
        let addr = (SETTINGS_PAGE_ADDR as usize + offset) as *mut u16;
        unsafe { addr.write_volatile(value) };
    }

    fn end_program(&mut self) {
        pac::FLASH.cr().modify(|w| w.set_pg(false));
    }
}
