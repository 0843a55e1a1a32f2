//! Link to the LED matrix display controller
//!
//! Rendering (segment encoding, scan timing) happens in the display
//! controller on the other end of the SPI link; this side only pushes
//! consistent snapshots of the display state. Two frame kinds: data
//! (what to show) and config (intensity).

use chronon_core::clock::{DisplayState, SpecialMode};
use chronon_core::traits::RenderSink;
use defmt::warn;
use embassy_stm32::gpio::Output;
use embassy_stm32::mode::Blocking;
use embassy_stm32::spi::Spi;

const DATA_FRAME: u8 = 0x01;
const CONFIG_FRAME: u8 = 0x02;

pub struct MatrixLink {
    spi: Spi<'static, Blocking>,
    latch: Output<'static>,
}

impl MatrixLink {
    pub fn new(spi: Spi<'static, Blocking>, latch: Output<'static>) -> Self {
        Self { spi, latch }
    }

    fn push(&mut self, frame: &[u8]) {
        if self.spi.blocking_write(frame).is_err() {
            warn!("display push failed");
            return;
        }

        self.latch.set_high();
        self.latch.set_low();
    }
}

fn special_code(mode: SpecialMode) -> u8 {
    match mode {
        SpecialMode::IntTemp => 0,
        SpecialMode::ExtTemp => 1,
        SpecialMode::SetHour => 2,
        SpecialMode::SetMinute => 3,
        SpecialMode::SetSecond => 4,
        SpecialMode::SetDate => 5,
        SpecialMode::SetMonth => 6,
        SpecialMode::SetYear => 7,
        SpecialMode::Intensity => 8,
        SpecialMode::Demo => 9,
    }
}

impl RenderSink for MatrixLink {
    fn update_data(&mut self, state: &DisplayState) {
        let frame = [
            DATA_FRAME,
            state.hour,
            state.minute,
            state.second,
            state.colon as u8,
            state.date,
            state.month,
            state.year,
            state.int_temperature as u8,
            state.ext_temperature as u8,
            special_code(state.special),
        ];
        self.push(&frame);
    }

    fn update_config(&mut self, intensity: u8) {
        self.push(&[CONFIG_FRAME, intensity]);
    }
}
