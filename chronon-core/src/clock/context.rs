//! Scheduler context
//!
//! One instance owns the complete mutable state of the clock: the
//! active mode, the display contents, the settings copy, the keyboard
//! latch and every countdown. [`ClockContext::on_tick`] is called once
//! per 32 Hz hardware tick with a mutable borrow of the board; all
//! sub-tasks of a tick complete before the call returns, so ordering
//! within a tick is deterministic.

use crate::settings::{Settings, MAX_INTENSITY, MIN_INTENSITY};
use crate::traits::{ExternalSensor, KeyPad, RenderSink, Rtc, RtcSample, SettingsStore, Watchdog};

use super::display::{DisplayState, SpecialMode};
use super::keyboard::KeyboardLock;
use super::mode::ClockMode;
use super::step;
use super::timing::{
    CYCLE_TICKS, DISPLAY_CONFIG_PHASE, DISPLAY_DATA_DIVISOR, INACTIVITY_TICKS, RTC_READ_DIVISOR,
    SAVE_DELAY_TICKS, SENSOR_READ_TICK, SENSOR_TRIGGER_TICK, TEMP_CYCLE_TICKS,
};

/// Everything the scheduler needs from the hardware for one tick
pub trait Board:
    Rtc + ExternalSensor + SettingsStore + KeyPad + RenderSink + Watchdog
{
}

impl<B> Board for B where
    B: Rtc + ExternalSensor + SettingsStore + KeyPad + RenderSink + Watchdog
{
}

/// Scheduler and mode state machine
#[derive(Debug)]
pub struct ClockContext {
    mode: ClockMode,
    display: DisplayState,
    settings: Settings,
    keyboard: KeyboardLock,
    /// Position within the one-second cycle, 0..CYCLE_TICKS
    tick: u8,
    /// Interior/exterior alternation counter
    temp_cycle: u8,
    show_exterior: bool,
    /// Whether the external sensor answered at boot
    sensor_present: bool,
    /// Pending settings write, 0 = disarmed
    save_countdown: u16,
    /// Set-mode abort countdown, 0 = disarmed
    inactivity_countdown: u16,
}

impl ClockContext {
    /// Create the context from the verified boot-time settings and the
    /// result of the external sensor probe.
    pub fn new(settings: Settings, sensor_present: bool) -> Self {
        Self {
            mode: ClockMode::Normal,
            display: DisplayState::power_on(settings.intensity),
            settings,
            keyboard: KeyboardLock::new(),
            tick: 0,
            temp_cycle: 0,
            show_exterior: false,
            sensor_present,
            save_countdown: 0,
            inactivity_countdown: 0,
        }
    }

    /// Active mode.
    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    /// Current display contents.
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Current settings copy (possibly not yet persisted).
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Process one hardware tick.
    pub fn on_tick<B: Board>(&mut self, board: &mut B) {
        board.feed();

        self.run_periodic(board);
        self.dispatch_mode(board);
        self.keyboard.on_tick(board.all_released());
        self.run_save_timer(board);
        self.run_inactivity_timer();

        self.tick = (self.tick + 1) % CYCLE_TICKS;

        board.feed();
    }

    /// Sub-period work derived from the cycle position: RTC re-read,
    /// external conversion trigger/collect, temperature alternation,
    /// display pushes.
    fn run_periodic<B: Board>(&mut self, board: &mut B) {
        // Time-set modes edit the displayed fields in place; an RTC
        // read would clobber the edit buffer.
        if self.tick % RTC_READ_DIVISOR == 0 && !self.mode.is_time_set() {
            if let Some(sample) = board.read_all() {
                self.apply_sample(&sample);
            }
        }

        if self.sensor_present {
            if self.tick == SENSOR_TRIGGER_TICK {
                // A failed trigger makes the later read fail too;
                // nothing to do about it this cycle.
                let _ = board.start_conversion();
            } else if self.tick == SENSOR_READ_TICK {
                if let Some(celsius) = board.read_temperature() {
                    self.display.ext_temperature = celsius;
                }
            }
        }

        self.temp_cycle += 1;
        if self.temp_cycle >= TEMP_CYCLE_TICKS {
            self.temp_cycle = 0;
            self.show_exterior = self.sensor_present && !self.show_exterior;
        }

        if self.tick % DISPLAY_DATA_DIVISOR == 0 {
            board.update_data(&self.display);
        }
        if self.tick % DISPLAY_DATA_DIVISOR == DISPLAY_CONFIG_PHASE {
            board.update_config(self.display.intensity);
        }
    }

    fn apply_sample(&mut self, sample: &RtcSample) {
        self.display.second = sample.second;
        self.display.minute = sample.minute;
        self.display.hour = sample.hour;
        self.display.date = sample.date;
        self.display.month = sample.month;
        self.display.year = sample.year;
        self.display.int_temperature = sample.temperature;

        // Colon blinks at 0.5 Hz, lit on even seconds.
        self.display.colon = sample.second % 2 == 0;
    }

    fn dispatch_mode<B: Board>(&mut self, board: &mut B) {
        match self.mode {
            ClockMode::Normal => self.normal_mode(board),
            ClockMode::IntensitySet => self.intensity_set_mode(board),
            ClockMode::Demo => self.demo_mode(board),
            ClockMode::HourSet
            | ClockMode::MinuteSet
            | ClockMode::SecondSet
            | ClockMode::DateSet
            | ClockMode::MonthSet
            | ClockMode::YearSet => self.time_set_mode(board),
        }
    }

    fn normal_mode<B: Board>(&mut self, board: &mut B) {
        self.display.special = if self.show_exterior {
            SpecialMode::ExtTemp
        } else {
            SpecialMode::IntTemp
        };

        if self.keyboard.is_locked() {
            return;
        }

        if board.enter_pressed() {
            self.mode = ClockMode::HourSet;
            self.inactivity_countdown = INACTIVITY_TICKS;
            self.keyboard.lock();
        } else if board.plus_pressed() {
            self.enter_intensity_set(step::increment(self.settings.intensity, MAX_INTENSITY));
        } else if board.minus_pressed() {
            self.enter_intensity_set(step::decrement(self.settings.intensity, MIN_INTENSITY));
        } else if board.esc_pressed() {
            self.mode = ClockMode::Demo;
            self.keyboard.lock();
        }
    }

    fn enter_intensity_set(&mut self, intensity: u8) {
        self.settings.intensity = intensity;
        self.display.intensity = intensity;
        self.mode = ClockMode::IntensitySet;
        self.save_countdown = SAVE_DELAY_TICKS;
        self.keyboard.lock();
    }

    fn intensity_set_mode<B: Board>(&mut self, board: &mut B) {
        self.display.special = SpecialMode::Intensity;

        if self.keyboard.is_locked() {
            return;
        }

        if board.plus_pressed() {
            self.adjust_intensity(step::increment(self.settings.intensity, MAX_INTENSITY));
        } else if board.minus_pressed() {
            self.adjust_intensity(step::decrement(self.settings.intensity, MIN_INTENSITY));
        } else if board.enter_pressed() || board.esc_pressed() {
            // Navigation leaves the mode; the armed save still fires.
            self.mode = ClockMode::Normal;
            self.keyboard.lock();
        }
    }

    fn adjust_intensity(&mut self, intensity: u8) {
        self.settings.intensity = intensity;
        self.display.intensity = intensity;
        self.save_countdown = SAVE_DELAY_TICKS;
        self.keyboard.lock();
    }

    fn demo_mode<B: Board>(&mut self, board: &mut B) {
        self.display.special = SpecialMode::Demo;

        if self.keyboard.is_locked() {
            return;
        }

        if board.esc_pressed() {
            self.mode = ClockMode::Normal;
            self.keyboard.lock();
        }
    }

    fn time_set_mode<B: Board>(&mut self, board: &mut B) {
        self.display.special = match self.mode {
            ClockMode::HourSet => SpecialMode::SetHour,
            ClockMode::MinuteSet => SpecialMode::SetMinute,
            ClockMode::SecondSet => SpecialMode::SetSecond,
            ClockMode::DateSet => SpecialMode::SetDate,
            ClockMode::MonthSet => SpecialMode::SetMonth,
            _ => SpecialMode::SetYear,
        };

        if self.keyboard.is_locked() {
            return;
        }

        if board.enter_pressed() {
            self.advance_set_chain(board);
            self.accept_set_action();
        } else if board.plus_pressed() {
            self.adjust_edited_field(true);
            self.accept_set_action();
        } else if board.minus_pressed() {
            self.adjust_edited_field(false);
            self.accept_set_action();
        } else if board.esc_pressed() {
            // Abort without committing; next RTC read restores the
            // displayed time.
            self.mode = ClockMode::Normal;
            self.keyboard.lock();
        }
    }

    /// Lock the keyboard and restart the inactivity countdown after an
    /// accepted set-mode action.
    fn accept_set_action(&mut self) {
        if self.mode.is_time_set() {
            self.inactivity_countdown = INACTIVITY_TICKS;
        }
        self.keyboard.lock();
    }

    fn advance_set_chain<B: Board>(&mut self, board: &mut B) {
        self.mode = match self.mode {
            ClockMode::HourSet => ClockMode::MinuteSet,
            ClockMode::MinuteSet => ClockMode::SecondSet,
            ClockMode::SecondSet => ClockMode::DateSet,
            ClockMode::DateSet => ClockMode::MonthSet,
            ClockMode::MonthSet => ClockMode::YearSet,
            _ => {
                // End of the chain: commit the edited fields. On a bus
                // failure the RTC keeps its previous time and the next
                // periodic read shows it.
                let _ = board.set_time(&self.edited_sample());
                ClockMode::Normal
            }
        };
    }

    fn edited_sample(&self) -> RtcSample {
        RtcSample {
            year: self.display.year,
            month: self.display.month,
            date: self.display.date,
            weekday: 1,
            hour: self.display.hour,
            minute: self.display.minute,
            second: self.display.second,
            temperature: self.display.int_temperature,
        }
    }

    fn adjust_edited_field(&mut self, up: bool) {
        let d = &mut self.display;
        match self.mode {
            ClockMode::HourSet => {
                d.hour = wrap_step(d.hour, 0, 23, up);
            }
            ClockMode::MinuteSet => {
                d.minute = wrap_step(d.minute, 0, 59, up);
            }
            ClockMode::SecondSet => {
                // Seconds are zeroed rather than stepped.
                d.second = 0;
            }
            ClockMode::DateSet => {
                d.date = wrap_step(d.date, 1, 31, up);
            }
            ClockMode::MonthSet => {
                d.month = wrap_step(d.month, 1, 12, up);
            }
            _ => {
                d.year = wrap_step(d.year, 0, 99, up);
            }
        }
    }

    fn run_save_timer<B: Board>(&mut self, board: &mut B) {
        if self.save_countdown == 0 {
            return;
        }

        self.save_countdown -= 1;
        if self.save_countdown == 0 {
            board.save(&self.settings);
            if self.mode == ClockMode::IntensitySet {
                self.mode = ClockMode::Normal;
            }
        }
    }

    fn run_inactivity_timer(&mut self) {
        if !self.mode.is_time_set() || self.inactivity_countdown == 0 {
            return;
        }

        self.inactivity_countdown -= 1;
        if self.inactivity_countdown == 0 {
            self.mode = ClockMode::Normal;
        }
    }
}

fn wrap_step(value: u8, min: u8, max: u8, up: bool) -> u8 {
    if up {
        step::increment_wrapping(value, min, max)
    } else {
        step::decrement_wrapping(value, min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::timing::KEYBOARD_DEBOUNCE_TICKS;

    #[derive(Default)]
    struct FakeBoard {
        sample: Option<RtcSample>,
        rtc_reads: u32,
        committed: Option<RtcSample>,
        set_time_ok: bool,
        conversions: u32,
        sensor_value: Option<i8>,
        sensor_reads: u32,
        saved: Option<Settings>,
        saves: u32,
        data_pushes: u32,
        config_pushes: u32,
        feeds: u32,
        enter: bool,
        plus: bool,
        minus: bool,
        esc: bool,
    }

    impl FakeBoard {
        fn new() -> Self {
            Self {
                set_time_ok: true,
                ..Self::default()
            }
        }

        fn release_all(&mut self) {
            self.enter = false;
            self.plus = false;
            self.minus = false;
            self.esc = false;
        }
    }

    impl Rtc for FakeBoard {
        fn read_all(&mut self) -> Option<RtcSample> {
            self.rtc_reads += 1;
            self.sample
        }

        fn set_time(&mut self, sample: &RtcSample) -> bool {
            self.committed = Some(*sample);
            self.set_time_ok
        }
    }

    impl ExternalSensor for FakeBoard {
        fn start_conversion(&mut self) -> bool {
            self.conversions += 1;
            true
        }

        fn read_temperature(&mut self) -> Option<i8> {
            self.sensor_reads += 1;
            self.sensor_value
        }
    }

    impl SettingsStore for FakeBoard {
        fn load(&mut self) -> Settings {
            Settings::default()
        }

        fn save(&mut self, settings: &Settings) {
            self.saved = Some(*settings);
            self.saves += 1;
        }
    }

    impl KeyPad for FakeBoard {
        fn enter_pressed(&mut self) -> bool {
            self.enter
        }
        fn plus_pressed(&mut self) -> bool {
            self.plus
        }
        fn minus_pressed(&mut self) -> bool {
            self.minus
        }
        fn esc_pressed(&mut self) -> bool {
            self.esc
        }
    }

    impl RenderSink for FakeBoard {
        fn update_data(&mut self, _state: &DisplayState) {
            self.data_pushes += 1;
        }

        fn update_config(&mut self, _intensity: u8) {
            self.config_pushes += 1;
        }
    }

    impl Watchdog for FakeBoard {
        fn feed(&mut self) {
            self.feeds += 1;
        }
    }

    fn ctx() -> ClockContext {
        ClockContext::new(Settings::default(), false)
    }

    fn ctx_with_sensor() -> ClockContext {
        ClockContext::new(Settings::default(), true)
    }

    /// Run ticks with all keys released until the debounce latch has
    /// certainly cleared.
    fn settle(ctx: &mut ClockContext, board: &mut FakeBoard) {
        board.release_all();
        for _ in 0..=KEYBOARD_DEBOUNCE_TICKS + 1 {
            ctx.on_tick(board);
        }
    }

    fn press_enter(ctx: &mut ClockContext, board: &mut FakeBoard) {
        board.enter = true;
        ctx.on_tick(board);
        settle(ctx, board);
    }

    fn press_plus(ctx: &mut ClockContext, board: &mut FakeBoard) {
        board.plus = true;
        ctx.on_tick(board);
        settle(ctx, board);
    }

    fn press_minus(ctx: &mut ClockContext, board: &mut FakeBoard) {
        board.minus = true;
        ctx.on_tick(board);
        settle(ctx, board);
    }

    fn press_esc(ctx: &mut ClockContext, board: &mut FakeBoard) {
        board.esc = true;
        ctx.on_tick(board);
        settle(ctx, board);
    }

    #[test]
    fn enter_in_normal_starts_set_chain_and_locks() {
        let mut ctx = ctx();
        let mut board = FakeBoard::new();

        board.enter = true;
        ctx.on_tick(&mut board);
        assert_eq!(ctx.mode(), ClockMode::HourSet);

        // Keyboard is locked: a held key does not advance further.
        ctx.on_tick(&mut board);
        ctx.on_tick(&mut board);
        assert_eq!(ctx.mode(), ClockMode::HourSet);
    }

    #[test]
    fn set_chain_walks_to_year_and_commits() {
        let mut ctx = ctx();
        let mut board = FakeBoard::new();

        let chain = [
            ClockMode::HourSet,
            ClockMode::MinuteSet,
            ClockMode::SecondSet,
            ClockMode::DateSet,
            ClockMode::MonthSet,
            ClockMode::YearSet,
        ];
        for expected in chain {
            press_enter(&mut ctx, &mut board);
            assert_eq!(ctx.mode(), expected);
        }

        press_enter(&mut ctx, &mut board);
        assert_eq!(ctx.mode(), ClockMode::Normal);

        let committed = board.committed.expect("time committed to RTC");
        assert_eq!(committed.hour, ctx.display().hour);
        assert_eq!(committed.date, 1);
        assert_eq!(committed.weekday, 1);
    }

    #[test]
    fn esc_reaches_normal_from_every_mode() {
        for target in [
            ClockMode::HourSet,
            ClockMode::MinuteSet,
            ClockMode::SecondSet,
            ClockMode::DateSet,
            ClockMode::MonthSet,
            ClockMode::YearSet,
        ] {
            let mut ctx = ctx();
            let mut board = FakeBoard::new();
            while ctx.mode() != target {
                press_enter(&mut ctx, &mut board);
            }
            press_esc(&mut ctx, &mut board);
            assert_eq!(ctx.mode(), ClockMode::Normal);
            assert!(board.committed.is_none());
        }
    }

    #[test]
    fn esc_toggles_demo() {
        let mut ctx = ctx();
        let mut board = FakeBoard::new();

        press_esc(&mut ctx, &mut board);
        assert_eq!(ctx.mode(), ClockMode::Demo);
        assert_eq!(ctx.display().special, SpecialMode::Demo);

        press_esc(&mut ctx, &mut board);
        assert_eq!(ctx.mode(), ClockMode::Normal);
    }

    #[test]
    fn plus_in_normal_enters_intensity_set_and_defers_save() {
        let mut ctx = ctx();
        let mut board = FakeBoard::new();

        board.plus = true;
        ctx.on_tick(&mut board);
        board.release_all();

        assert_eq!(ctx.mode(), ClockMode::IntensitySet);
        assert_eq!(ctx.settings().intensity, 8);
        assert_eq!(ctx.display().intensity, 8);
        assert_eq!(board.saves, 0);

        // The save fires SAVE_DELAY_TICKS after the adjustment, and
        // the mode drops back to Normal with it.
        for _ in 0..SAVE_DELAY_TICKS - 2 {
            ctx.on_tick(&mut board);
        }
        assert_eq!(board.saves, 0);
        assert_eq!(ctx.mode(), ClockMode::IntensitySet);

        ctx.on_tick(&mut board);
        assert_eq!(board.saves, 1);
        assert_eq!(board.saved.unwrap().intensity, 8);
        assert_eq!(ctx.mode(), ClockMode::Normal);
    }

    #[test]
    fn further_adjustment_rearms_save_timer() {
        let mut ctx = ctx();
        let mut board = FakeBoard::new();

        press_plus(&mut ctx, &mut board);
        press_plus(&mut ctx, &mut board);
        assert_eq!(ctx.settings().intensity, 9);
        assert_eq!(board.saves, 0);

        for _ in 0..SAVE_DELAY_TICKS {
            ctx.on_tick(&mut board);
        }
        assert_eq!(board.saves, 1);
        assert_eq!(board.saved.unwrap().intensity, 9);
    }

    #[test]
    fn intensity_clamps_at_bounds() {
        let mut ctx = ctx();
        let mut board = FakeBoard::new();

        for _ in 0..MAX_INTENSITY + 3 {
            press_plus(&mut ctx, &mut board);
        }
        assert_eq!(ctx.settings().intensity, MAX_INTENSITY);

        for _ in 0..2 * MAX_INTENSITY {
            press_minus(&mut ctx, &mut board);
        }
        assert_eq!(ctx.settings().intensity, MIN_INTENSITY);
    }

    #[test]
    fn time_fields_wrap_at_domain_bounds() {
        let mut ctx = ctx();
        let mut board = FakeBoard::new();

        press_enter(&mut ctx, &mut board); // HourSet, hour starts at 0
        press_minus(&mut ctx, &mut board);
        assert_eq!(ctx.display().hour, 23);
        press_plus(&mut ctx, &mut board);
        assert_eq!(ctx.display().hour, 0);

        press_enter(&mut ctx, &mut board); // MinuteSet
        press_minus(&mut ctx, &mut board);
        assert_eq!(ctx.display().minute, 59);
    }

    #[test]
    fn second_set_always_zeroes() {
        let mut ctx = ctx();
        let mut board = FakeBoard::new();
        board.sample = Some(RtcSample {
            second: 42,
            ..RtcSample::power_on_default()
        });

        ctx.on_tick(&mut board); // pick up the sample
        board.sample = None;
        assert_eq!(ctx.display().second, 42);

        press_enter(&mut ctx, &mut board);
        press_enter(&mut ctx, &mut board);
        press_enter(&mut ctx, &mut board);
        assert_eq!(ctx.mode(), ClockMode::SecondSet);

        press_plus(&mut ctx, &mut board);
        assert_eq!(ctx.display().second, 0);
    }

    #[test]
    fn inactivity_forces_return_to_normal() {
        let mut ctx = ctx();
        let mut board = FakeBoard::new();

        board.enter = true;
        ctx.on_tick(&mut board);
        board.release_all();
        assert_eq!(ctx.mode(), ClockMode::HourSet);

        for _ in 0..INACTIVITY_TICKS - 2 {
            ctx.on_tick(&mut board);
        }
        assert_eq!(ctx.mode(), ClockMode::HourSet);

        ctx.on_tick(&mut board);
        assert_eq!(ctx.mode(), ClockMode::Normal);
        assert!(board.committed.is_none());
    }

    #[test]
    fn set_mode_key_resets_inactivity() {
        let mut ctx = ctx();
        let mut board = FakeBoard::new();

        board.enter = true;
        ctx.on_tick(&mut board);
        board.release_all();

        for _ in 0..INACTIVITY_TICKS / 2 {
            ctx.on_tick(&mut board);
        }
        press_plus(&mut ctx, &mut board);

        // More than the original deadline, less than the refreshed one.
        for _ in 0..INACTIVITY_TICKS - 64 {
            ctx.on_tick(&mut board);
        }
        assert_eq!(ctx.mode(), ClockMode::HourSet);
    }

    #[test]
    fn rtc_read_cadence_is_4hz() {
        let mut ctx = ctx();
        let mut board = FakeBoard::new();

        for _ in 0..CYCLE_TICKS {
            ctx.on_tick(&mut board);
        }
        assert_eq!(board.rtc_reads, 4);
        assert_eq!(board.data_pushes, 8);
        assert_eq!(board.config_pushes, 8);
    }

    #[test]
    fn set_modes_halt_rtc_reads() {
        let mut ctx = ctx();
        let mut board = FakeBoard::new();

        board.enter = true;
        ctx.on_tick(&mut board);
        board.release_all();
        let reads_at_entry = board.rtc_reads;

        for _ in 0..CYCLE_TICKS {
            ctx.on_tick(&mut board);
        }
        assert_eq!(board.rtc_reads, reads_at_entry);
    }

    #[test]
    fn successful_read_updates_display_and_colon() {
        let mut ctx = ctx();
        let mut board = FakeBoard::new();
        board.sample = Some(RtcSample {
            year: 25,
            month: 10,
            date: 24,
            weekday: 5,
            hour: 13,
            minute: 37,
            second: 11,
            temperature: 21,
        });

        ctx.on_tick(&mut board);
        let d = ctx.display();
        assert_eq!((d.hour, d.minute, d.second), (13, 37, 11));
        assert_eq!((d.date, d.month, d.year), (24, 10, 25));
        assert_eq!(d.int_temperature, 21);
        assert!(!d.colon); // odd second
    }

    #[test]
    fn failed_read_retains_previous_display() {
        let mut ctx = ctx();
        let mut board = FakeBoard::new();
        board.sample = Some(RtcSample {
            hour: 9,
            minute: 30,
            ..RtcSample::power_on_default()
        });

        ctx.on_tick(&mut board);
        board.sample = None;

        for _ in 0..CYCLE_TICKS {
            ctx.on_tick(&mut board);
        }
        assert_eq!(ctx.display().hour, 9);
        assert_eq!(ctx.display().minute, 30);
    }

    #[test]
    fn sensor_conversion_precedes_read_in_cycle() {
        let mut ctx = ctx_with_sensor();
        let mut board = FakeBoard::new();
        board.sensor_value = Some(-5);

        // Up to and including SENSOR_TRIGGER_TICK: conversion armed,
        // nothing collected yet.
        for _ in 0..=SENSOR_TRIGGER_TICK {
            ctx.on_tick(&mut board);
        }
        assert_eq!(board.conversions, 1);
        assert_eq!(board.sensor_reads, 0);

        for _ in SENSOR_TRIGGER_TICK..SENSOR_READ_TICK {
            ctx.on_tick(&mut board);
        }
        assert_eq!(board.sensor_reads, 1);
        assert_eq!(ctx.display().ext_temperature, -5);
    }

    #[test]
    fn absent_sensor_is_never_polled() {
        let mut ctx = ctx();
        let mut board = FakeBoard::new();

        for _ in 0..2 * CYCLE_TICKS as u32 {
            ctx.on_tick(&mut board);
        }
        assert_eq!(board.conversions, 0);
        assert_eq!(board.sensor_reads, 0);
    }

    #[test]
    fn failed_sensor_read_keeps_previous_value() {
        let mut ctx = ctx_with_sensor();
        let mut board = FakeBoard::new();
        board.sensor_value = Some(17);

        for _ in 0..CYCLE_TICKS {
            ctx.on_tick(&mut board);
        }
        assert_eq!(ctx.display().ext_temperature, 17);

        board.sensor_value = None; // checksum mismatch from here on
        for _ in 0..CYCLE_TICKS {
            ctx.on_tick(&mut board);
        }
        assert_eq!(ctx.display().ext_temperature, 17);
    }

    #[test]
    fn temperature_display_alternates_with_sensor() {
        let mut ctx = ctx_with_sensor();
        let mut board = FakeBoard::new();

        for _ in 0..TEMP_CYCLE_TICKS {
            ctx.on_tick(&mut board);
        }
        assert_eq!(ctx.display().special, SpecialMode::ExtTemp);

        for _ in 0..TEMP_CYCLE_TICKS {
            ctx.on_tick(&mut board);
        }
        assert_eq!(ctx.display().special, SpecialMode::IntTemp);
    }

    #[test]
    fn temperature_display_stays_interior_without_sensor() {
        let mut ctx = ctx();
        let mut board = FakeBoard::new();

        for _ in 0..2 * TEMP_CYCLE_TICKS as u32 {
            ctx.on_tick(&mut board);
        }
        assert_eq!(ctx.display().special, SpecialMode::IntTemp);
    }

    #[test]
    fn watchdog_fed_every_tick() {
        let mut ctx = ctx();
        let mut board = FakeBoard::new();

        for _ in 0..10 {
            ctx.on_tick(&mut board);
        }
        assert_eq!(board.feeds, 20); // entry and exit of every tick
    }

    #[test]
    fn set_mode_special_tags_track_the_edited_field() {
        let mut ctx = ctx();
        let mut board = FakeBoard::new();

        let expected = [
            SpecialMode::SetHour,
            SpecialMode::SetMinute,
            SpecialMode::SetSecond,
            SpecialMode::SetDate,
            SpecialMode::SetMonth,
            SpecialMode::SetYear,
        ];
        for tag in expected {
            press_enter(&mut ctx, &mut board);
            assert_eq!(ctx.display().special, tag);
        }
    }
}
