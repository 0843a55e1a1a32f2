//! Mock peripherals for host tests
//!
//! `MockController` emulates the flag progression of a real two-wire
//! controller well enough to drive the transaction engine through its
//! happy paths, NACK classification and stuck-bus recovery.

use std::collections::VecDeque;
use std::vec::Vec;

use chronon_hal::{BusController, Direction, FlashBank, StopMode, TickTimer};

/// Gross behavior of the mocked bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockMode {
    /// Every transfer completes; reads come from the script.
    Healthy,
    /// No flag ever rises after a transfer is armed.
    Stuck,
    /// Every address phase is NACKed.
    NackAddress,
}

pub struct MockController {
    pub mode: MockMode,
    /// Every byte the engine transmitted, register addresses included
    pub written: Vec<u8>,
    /// Completed recovery sequences
    pub resets: u32,
    read_script: VecDeque<u8>,
    xfer_dir: Option<Direction>,
    xfer_len: u8,
    xfer_stop: StopMode,
    moved: u8,
    preload: Option<u8>,
    stop: bool,
    tc: bool,
    nack: bool,
    enabled: bool,
}

impl MockController {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            written: Vec::new(),
            resets: 0,
            read_script: VecDeque::new(),
            xfer_dir: None,
            xfer_len: 0,
            xfer_stop: StopMode::AutoEnd,
            moved: 0,
            preload: None,
            stop: false,
            tc: false,
            nack: false,
            enabled: true,
        }
    }

    /// Queue bytes to be returned by subsequent read transfers.
    pub fn script_reads(&mut self, bytes: &[u8]) {
        self.read_script.extend(bytes.iter().copied());
    }

    /// No latched flag and no stale preload survive.
    pub fn flags_clear(&self) -> bool {
        !self.stop && !self.tc && !self.nack && self.preload.is_none()
    }

    fn end_of_transfer(&mut self) {
        match self.xfer_stop {
            StopMode::AutoEnd => self.stop = true,
            StopMode::SoftEnd => self.tc = true,
        }
        self.xfer_dir = None;
    }
}

impl BusController for MockController {
    fn clear_flags(&mut self) {
        self.stop = false;
        self.tc = false;
        self.nack = false;
        self.preload = None;
    }

    fn start_transfer(&mut self, _addr7: u8, len: u8, dir: Direction, stop: StopMode) {
        self.stop = false;
        self.tc = false;
        self.xfer_len = len;
        self.xfer_stop = stop;
        self.moved = 0;

        match self.mode {
            MockMode::Stuck => {
                self.xfer_dir = None;
            }
            MockMode::NackAddress => {
                self.xfer_dir = None;
                self.nack = true;
                self.stop = true;
            }
            MockMode::Healthy => {
                self.xfer_dir = Some(dir);
                if dir == Direction::Write {
                    if let Some(byte) = self.preload.take() {
                        if len > 0 {
                            self.written.push(byte);
                            self.moved = 1;
                        }
                    }
                }
                if self.moved == self.xfer_len {
                    self.end_of_transfer();
                }
            }
        }
    }

    fn write_byte(&mut self, byte: u8) {
        if self.xfer_dir == Some(Direction::Write) && self.moved < self.xfer_len {
            self.written.push(byte);
            self.moved += 1;
            if self.moved == self.xfer_len {
                self.end_of_transfer();
            }
        } else {
            self.preload = Some(byte);
        }
    }

    fn read_byte(&mut self) -> u8 {
        let byte = self.read_script.pop_front().unwrap_or(0xFF);
        self.moved += 1;
        if self.moved == self.xfer_len {
            self.end_of_transfer();
        }
        byte
    }

    fn tx_empty(&self) -> bool {
        self.preload.is_none()
    }

    fn tx_ready(&self) -> bool {
        self.xfer_dir == Some(Direction::Write) && self.moved < self.xfer_len
    }

    fn rx_ready(&self) -> bool {
        self.xfer_dir == Some(Direction::Read)
            && self.moved < self.xfer_len
            && !self.read_script.is_empty()
    }

    fn transfer_complete(&self) -> bool {
        self.tc
    }

    fn stop_detected(&self) -> bool {
        self.stop
    }

    fn nack_received(&self) -> bool {
        self.nack
    }

    fn bus_error(&self) -> bool {
        false
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn enable(&mut self) {
        self.enabled = true;
        self.resets += 1;
    }
}

/// Timer where every poll iteration counts as one elapsed millisecond
pub struct MockTimer {
    /// Ticks consumed since the last restart
    pub ticks: u32,
}

impl MockTimer {
    pub fn new() -> Self {
        Self { ticks: 0 }
    }
}

impl TickTimer for MockTimer {
    fn restart(&mut self) {
        self.ticks = 0;
    }

    fn tick_elapsed(&mut self) -> bool {
        self.ticks += 1;
        true
    }
}

/// In-memory flash bank with scriptable busy behavior
pub struct MockFlash {
    /// Stored page contents
    pub page: Vec<u8>,
    /// Completed erase cycles
    pub erases: u32,
    /// Report busy forever, wedging every operation
    pub stuck_busy: bool,
    locked: bool,
    eop: bool,
    programming: bool,
}

impl MockFlash {
    pub fn new(page: &[u8]) -> Self {
        Self {
            page: page.to_vec(),
            erases: 0,
            stuck_busy: false,
            locked: true,
            eop: false,
            programming: false,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

impl FlashBank for MockFlash {
    fn read_record(&mut self, buf: &mut [u8]) {
        buf.copy_from_slice(&self.page[..buf.len()]);
    }

    fn busy(&self) -> bool {
        self.stuck_busy
    }

    fn take_end_of_op(&mut self) -> bool {
        let was_set = self.eop;
        self.eop = false;
        was_set
    }

    fn locked(&self) -> bool {
        self.locked
    }

    fn unlock(&mut self) {
        self.locked = false;
    }

    fn lock(&mut self) {
        self.locked = true;
    }

    fn start_page_erase(&mut self) {
        if !self.locked && !self.stuck_busy {
            self.page.fill(0xFF);
            self.erases += 1;
            self.eop = true;
        }
    }

    fn end_page_erase(&mut self) {}

    fn begin_program(&mut self) {
        self.programming = true;
    }

    fn program_halfword(&mut self, offset: usize, value: u16) {
        if self.programming && !self.locked && !self.stuck_busy {
            self.page[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
            self.eop = true;
        }
    }

    fn end_program(&mut self) {
        self.programming = false;
    }
}
