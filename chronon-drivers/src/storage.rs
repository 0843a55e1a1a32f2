//! Flash-backed settings store
//!
//! The record codec and verification live in `chronon-core`; this
//! module sequences the erase/program cycle over the reserved page.
//! Every flash wait is bounded, a failed step abandons the write, and
//! write protection is re-engaged on every path out.

use chronon_core::settings::{Settings, RECORD_LEN};
use chronon_core::traits::SettingsStore;
use chronon_hal::{FlashBank, TickTimer, PROGRAM_UNIT};

/// Unlock wait deadline in milliseconds
pub const UNLOCK_TIMEOUT_MS: u32 = 2;

/// Page erase wait deadline in milliseconds
pub const ERASE_TIMEOUT_MS: u32 = 50;

/// Per-half-word program wait deadline in milliseconds
pub const PROGRAM_TIMEOUT_MS: u32 = 50;

// The program loop moves the record one half-word at a time.
const _: () = assert!(RECORD_LEN % PROGRAM_UNIT == 0);

/// Settings store over a reserved flash page
pub struct FlashSettingsStore<F, T> {
    flash: F,
    timer: T,
}

impl<F: FlashBank, T: TickTimer> FlashSettingsStore<F, T> {
    pub fn new(flash: F, timer: T) -> Self {
        Self { flash, timer }
    }

    fn write_record(&mut self, record: &[u8; RECORD_LEN]) {
        if self.unlock() && self.erase_page() {
            self.program(record);
        }

        // Protection re-engages even after a failed write.
        self.flash.lock();
    }

    fn unlock(&mut self) -> bool {
        if !self.wait_not_busy(UNLOCK_TIMEOUT_MS) {
            return false;
        }

        if self.flash.locked() {
            self.flash.unlock();
        }

        true
    }

    fn erase_page(&mut self) -> bool {
        self.flash.start_page_erase();

        let finished = self.wait_not_busy(ERASE_TIMEOUT_MS) && self.flash.take_end_of_op();
        self.flash.end_page_erase();

        finished
    }

    fn program(&mut self, record: &[u8; RECORD_LEN]) -> bool {
        self.flash.begin_program();

        let mut finished = true;
        for (index, chunk) in record.chunks_exact(PROGRAM_UNIT).enumerate() {
            let value = u16::from_le_bytes([chunk[0], chunk[1]]);
            self.flash.program_halfword(index * PROGRAM_UNIT, value);

            if !self.wait_not_busy(PROGRAM_TIMEOUT_MS) || !self.flash.take_end_of_op() {
                finished = false;
                break;
            }
        }

        self.flash.end_program();
        finished
    }

    fn wait_not_busy(&mut self, timeout_ms: u32) -> bool {
        let mut elapsed = 0;

        self.timer.restart();
        while self.flash.busy() {
            if self.timer.tick_elapsed() {
                elapsed += 1;
            }
            if elapsed >= timeout_ms {
                return false;
            }
        }

        true
    }
}

impl<F: FlashBank, T: TickTimer> SettingsStore for FlashSettingsStore<F, T> {
    fn load(&mut self) -> Settings {
        let mut record = [0u8; RECORD_LEN];
        self.flash.read_record(&mut record);

        match Settings::from_record(&record) {
            Some(settings) => settings,
            None => {
                // First boot or corruption: repair the page before the
                // defaults can be adjusted and saved over it.
                let defaults = Settings::default();
                self.save(&defaults);
                defaults
            }
        }
    }

    fn save(&mut self, settings: &Settings) {
        self.write_record(&settings.to_record());
    }
}
