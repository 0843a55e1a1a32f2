//! Board wiring: one struct implementing every device trait
//!
//! The scheduler borrows the whole board mutably for the duration of
//! a tick, which is what lets every service share the single bus
//! engine without further ownership ceremony.

use chronon_core::settings::Settings;
use chronon_core::traits::{
    ExternalSensor, KeyPad, RenderSink, Rtc, RtcSample, SettingsStore, Watchdog,
};
use chronon_drivers::bus::BusEngine;
use chronon_drivers::storage::FlashSettingsStore;
use chronon_drivers::{ds18b20, ds2482, ds3231};
use defmt::{info, warn};
use embedded_hal::digital::InputPin;

use crate::bus_ctrl::BusPeripheral;
use crate::display::MatrixLink;
use crate::flash_bank::SettingsFlash;
use crate::keys::Keys;
use crate::tick::MillisTimer;
use crate::watchdog::ClockWatchdog;

pub struct ClockBoard<P> {
    bus: BusEngine<BusPeripheral, MillisTimer>,
    store: FlashSettingsStore<SettingsFlash, MillisTimer>,
    keys: Keys<P>,
    display: MatrixLink,
    watchdog: ClockWatchdog,
}

impl<P: InputPin> ClockBoard<P> {
    pub fn new(
        bus: BusEngine<BusPeripheral, MillisTimer>,
        store: FlashSettingsStore<SettingsFlash, MillisTimer>,
        keys: Keys<P>,
        display: MatrixLink,
        watchdog: ClockWatchdog,
    ) -> Self {
        Self {
            bus,
            store,
            keys,
            display,
            watchdog,
        }
    }

    /// One-time power-up: recover the RTC if it lost time, probe the
    /// one-wire side, load settings.
    pub fn power_up(&mut self) -> (Settings, bool) {
        if let Err(err) = ds3231::init(&mut self.bus) {
            warn!("rtc init failed: {}", err);
        }

        let sensor_present = match ds2482::init(&mut self.bus) {
            Ok(()) => match ds18b20::init(&mut self.bus) {
                Ok(()) => true,
                Err(err) => {
                    info!("no external sensor: {}", err);
                    false
                }
            },
            Err(err) => {
                info!("no one-wire bridge: {}", err);
                false
            }
        };

        let settings = self.store.load();
        (settings, sensor_present)
    }
}

impl<P: InputPin> Rtc for ClockBoard<P> {
    fn read_all(&mut self) -> Option<RtcSample> {
        ds3231::read_all(&mut self.bus).ok()
    }

    fn set_time(&mut self, sample: &RtcSample) -> bool {
        match ds3231::set_time(&mut self.bus, sample) {
            Ok(()) => true,
            Err(err) => {
                warn!("rtc set failed: {}", err);
                false
            }
        }
    }
}

impl<P: InputPin> ExternalSensor for ClockBoard<P> {
    fn start_conversion(&mut self) -> bool {
        ds18b20::start_conversion(&mut self.bus).is_ok()
    }

    fn read_temperature(&mut self) -> Option<i8> {
        ds18b20::read_temperature(&mut self.bus).ok()
    }
}

impl<P: InputPin> SettingsStore for ClockBoard<P> {
    fn load(&mut self) -> Settings {
        self.store.load()
    }

    fn save(&mut self, settings: &Settings) {
        self.store.save(settings);
    }
}

impl<P: InputPin> KeyPad for ClockBoard<P> {
    fn enter_pressed(&mut self) -> bool {
        self.keys.enter_pressed()
    }

    fn plus_pressed(&mut self) -> bool {
        self.keys.plus_pressed()
    }

    fn minus_pressed(&mut self) -> bool {
        self.keys.minus_pressed()
    }

    fn esc_pressed(&mut self) -> bool {
        self.keys.esc_pressed()
    }
}

impl<P: InputPin> RenderSink for ClockBoard<P> {
    fn update_data(&mut self, state: &chronon_core::clock::DisplayState) {
        self.display.update_data(state);
    }

    fn update_config(&mut self, intensity: u8) {
        self.display.update_config(intensity);
    }
}

impl<P: InputPin> Watchdog for ClockBoard<P> {
    fn feed(&mut self) {
        self.watchdog.feed();
    }
}
