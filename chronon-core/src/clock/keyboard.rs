//! Keyboard debounce latch
//!
//! Once an accepted key action locks the keyboard, it unlocks only
//! after the debounce interval has elapsed with every key released in
//! the same scan; a key still held when the interval expires restarts
//! the interval.

use super::timing::KEYBOARD_DEBOUNCE_TICKS;

/// Debounce latch plus its free-running tick counter
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardLock {
    locked: bool,
    ticks: u16,
}

impl KeyboardLock {
    /// Unlocked latch, counter cleared.
    pub const fn new() -> Self {
        Self {
            locked: false,
            ticks: 0,
        }
    }

    /// Whether key input is currently ignored.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Latch after an accepted key action.
    pub fn lock(&mut self) {
        self.locked = true;
        self.ticks = 0;
    }

    /// Advance the debounce counter one tick.
    ///
    /// `all_released` must reflect a single simultaneous scan of every
    /// key.
    pub fn on_tick(&mut self, all_released: bool) {
        if !self.locked {
            return;
        }

        self.ticks = self.ticks.saturating_add(1);

        if self.ticks > KEYBOARD_DEBOUNCE_TICKS {
            if all_released {
                self.locked = false;
            } else {
                self.ticks = 0;
            }
        }
    }
}
