//! Independent watchdog refresh

use chronon_core::traits::Watchdog;
use embassy_stm32::peripherals::IWDG;
use embassy_stm32::wdg::IndependentWatchdog;

/// Watchdog period, generously above the 31.25 ms tick
const TIMEOUT_US: u32 = 500_000;

pub struct ClockWatchdog {
    wdg: IndependentWatchdog<'static, IWDG>,
}

impl ClockWatchdog {
    pub fn new(peri: IWDG) -> Self {
        let mut wdg = IndependentWatchdog::new(peri, TIMEOUT_US);
        wdg.unleash();
        Self { wdg }
    }
}

impl Watchdog for ClockWatchdog {
    fn feed(&mut self) {
        self.wdg.pet();
    }
}
