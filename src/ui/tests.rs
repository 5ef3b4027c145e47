//! Unit tests for the tick-driven UI and the button handlers.
//!
//! These tests run on the host (not embedded) against recording fakes
//! of the display, keypad, pins and actuators.

use super::buttons::{ColorCycleButton, EdgeHandler, MotorDirectionButton};
use super::code_entry::{CodeEntry, EntryState};
use super::display::{DisplayController, Screen};
use super::indicators::Indicators;
use super::UserInterface;
use crate::config::{
    CODE_NUMBER_OF_KEYS, COLOR_PRESETS, DISPLAY_REFRESH_TIME_ALARM_MS,
    DISPLAY_REFRESH_TIME_REPORT_MS,
};
use crate::drivers::bitmaps::{Bitmap, CLEAR_SCREEN, FIRE_ALARM_FRAMES};
use crate::hal::{
    AlarmSource, DisplayDriver, DisplayMode, MatrixKeypad, Motor, MotorDirection, RgbChannel,
    RgbLed, TextOutput,
};
use crate::sensors::Readings;
use crate::state::SharedState;
use core::convert::Infallible;
use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

const TICK_MS: u32 = 100;

// ═══════════════════════════════════════════════════════════════════════════
// Fakes
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
enum Op {
    Init,
    Clear,
    Mode(DisplayMode),
    Cursor(u8, u8),
    Text(String),
    /// Index into `FIRE_ALARM_FRAMES`, or `None` for the blank screen.
    Bitmap(Option<usize>),
}

#[derive(Default)]
struct RecordingDisplay {
    ops: Vec<Op>,
    /// Panel transfers, kept apart from `ops` so draw sequences stay comparable.
    flushes: usize,
}

impl RecordingDisplay {
    fn take(&mut self) -> Vec<Op> {
        core::mem::take(&mut self.ops)
    }
}

impl DisplayDriver for RecordingDisplay {
    fn init(&mut self) {
        self.ops.push(Op::Init);
    }

    fn clear(&mut self) {
        self.ops.push(Op::Clear);
    }

    fn set_mode(&mut self, mode: DisplayMode) {
        self.ops.push(Op::Mode(mode));
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        self.ops.push(Op::Cursor(col, row));
    }

    fn write_str(&mut self, text: &str) {
        self.ops.push(Op::Text(text.to_string()));
    }

    fn write_bitmap(&mut self, bitmap: &Bitmap) {
        let frame = FIRE_ALARM_FRAMES.iter().position(|f| f == bitmap);
        assert!(frame.is_some() || *bitmap == CLEAR_SCREEN, "unknown bitmap");
        self.ops.push(Op::Bitmap(frame));
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}

struct Alarm {
    active: bool,
}

impl AlarmSource for Alarm {
    fn is_active(&self) -> bool {
        self.active
    }
}

#[derive(Default)]
struct ScriptedKeypad {
    keys: VecDeque<char>,
    init_tick: Rc<Cell<Option<u32>>>,
}

impl MatrixKeypad for ScriptedKeypad {
    fn init(&mut self, tick_ms: u32) {
        self.init_tick.set(Some(tick_ms));
    }

    fn update(&mut self) -> Option<char> {
        self.keys.pop_front()
    }
}

/// Output pin whose level is observable from the test.
#[derive(Clone, Default)]
struct FakePin {
    high: Rc<Cell<bool>>,
}

impl ErrorType for FakePin {
    type Error = Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.high.set(true);
        Ok(())
    }
}

impl StatefulOutputPin for FakePin {
    fn is_set_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.high.get())
    }

    fn is_set_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.high.get())
    }
}

#[derive(Clone)]
struct Recorder<T> {
    calls: Rc<RefCell<Vec<T>>>,
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<T: Clone> Recorder<T> {
    fn calls(&self) -> Vec<T> {
        self.calls.borrow().clone()
    }
}

impl TextOutput for Recorder<String> {
    fn write_line(&mut self, line: &str) {
        self.calls.borrow_mut().push(line.to_string());
    }
}

impl Motor for Recorder<MotorDirection> {
    fn set_direction(&mut self, direction: MotorDirection) {
        self.calls.borrow_mut().push(direction);
    }
}

impl RgbLed for Recorder<(RgbChannel, f32)> {
    fn set_duty_cycle(&mut self, channel: RgbChannel, ratio: f32) {
        self.calls.borrow_mut().push((channel, ratio));
    }
}

fn text(s: &str) -> Op {
    Op::Text(s.to_string())
}

fn report_labels() -> Vec<Op> {
    vec![
        Op::Mode(DisplayMode::Char),
        Op::Clear,
        Op::Cursor(0, 0),
        text("Temperature:"),
        Op::Cursor(0, 1),
        text("Gas:"),
        Op::Cursor(0, 2),
        text("Alarm:"),
    ]
}

fn report_fields(temperature: &str, gas: &str) -> Vec<Op> {
    vec![
        Op::Cursor(12, 0),
        text(temperature),
        Op::Cursor(15, 0),
        text("'C"),
        Op::Cursor(4, 1),
        text(gas),
        Op::Cursor(6, 2),
        text("OFF"),
    ]
}

fn alarm_entry() -> Vec<Op> {
    vec![Op::Clear, Op::Mode(DisplayMode::Graphic)]
}

/// Ticks between refreshes: the accumulator climbs to the period, then
/// one more tick renders.
fn ticks_per_refresh(period_ms: u32) -> usize {
    (period_ms / TICK_MS) as usize + 1
}

// ═══════════════════════════════════════════════════════════════════════════
// Code Entry Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn keys_ignored_while_alarm_inactive() {
    let mut entry = CodeEntry::new();
    let mut state = SharedState::new();

    for key in ['1', '2', '#', '4', '5', '6'] {
        entry.process(Some(key), false, &mut state);
        assert_eq!(state.code().len(), 0);
    }
    assert!(!state.code_complete());
}

#[test]
fn keys_ignored_while_blocked() {
    let mut entry = CodeEntry::new();
    let mut state = SharedState::new();
    state.set_system_blocked(true);

    for key in ['1', '2', '3', '4', '5'] {
        entry.process(Some(key), true, &mut state);
        assert_eq!(state.code().len(), 0);
    }
    assert!(!state.code_complete());
}

#[test]
fn full_code_completes_exactly_once() {
    let mut entry = CodeEntry::new();
    let mut state = SharedState::new();
    let code = ['1', '8', '0', '5'];

    for (i, &key) in code.iter().enumerate() {
        assert!(!state.code_complete());
        entry.process(Some(key), true, &mut state);
        if i + 1 < CODE_NUMBER_OF_KEYS {
            assert_eq!(state.code().len(), i + 1);
        }
    }

    assert!(state.code_complete());
    assert_eq!(state.code().len(), 0);
    assert_eq!(state.code().keys(), &code);
}

#[test]
fn keys_keep_accumulating_while_code_pending() {
    let mut entry = CodeEntry::new();
    let mut state = SharedState::new();
    for key in ['1', '2', '3', '4'] {
        entry.process(Some(key), true, &mut state);
    }
    assert_eq!(EntryState::of(&state), EntryState::Complete);

    entry.process(Some('9'), true, &mut state);
    assert_eq!(state.code().len(), 1);
    assert_eq!(state.code().keys()[0], '9');
    assert!(state.code_complete());
}

#[test]
fn no_key_is_a_no_op() {
    let mut entry = CodeEntry::new();
    let mut state = SharedState::new();
    entry.process(Some('1'), true, &mut state);
    let before = state.clone();

    for _ in 0..10 {
        entry.process(None, true, &mut state);
    }
    assert_eq!(state, before);
}

#[test]
fn locked_single_hash_only_counts() {
    let mut entry = CodeEntry::new();
    let mut state = SharedState::new();
    entry.process(Some('1'), true, &mut state);
    state.set_code_complete(true);
    state.set_incorrect_code(true);

    entry.process(Some('#'), true, &mut state);

    assert!(state.incorrect_code());
    assert!(state.code_complete());
    assert_eq!(state.code().len(), 1);
    assert_eq!(entry.reset_presses(), 1);
}

#[test]
fn locked_other_keys_ignored() {
    let mut entry = CodeEntry::new();
    let mut state = SharedState::new();
    state.set_incorrect_code(true);

    for key in ['1', '*', 'A', '0'] {
        entry.process(Some(key), true, &mut state);
    }

    assert_eq!(EntryState::of(&state), EntryState::LockedIncorrect);
    assert_eq!(state.code().len(), 0);
    assert!(!state.code_complete());
    assert_eq!(entry.reset_presses(), 0);
}

#[test]
fn locked_double_hash_resets_everything() {
    let mut entry = CodeEntry::new();
    let mut state = SharedState::new();
    entry.process(Some('3'), true, &mut state);
    state.set_code_complete(true);
    state.set_incorrect_code(true);

    entry.process(Some('#'), true, &mut state);
    entry.process(Some('5'), true, &mut state);
    entry.process(Some('#'), true, &mut state);

    assert!(!state.incorrect_code());
    assert!(!state.code_complete());
    assert_eq!(state.code().len(), 0);
    assert_eq!(entry.reset_presses(), 0);
    assert_eq!(EntryState::of(&state), EntryState::Collecting);
}

#[test]
fn hash_is_an_ordinary_key_when_not_locked() {
    let mut entry = CodeEntry::new();
    let mut state = SharedState::new();

    entry.process(Some('#'), true, &mut state);
    entry.process(Some('#'), true, &mut state);

    assert_eq!(state.code().len(), 2);
    assert_eq!(entry.reset_presses(), 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Indicator Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn indicators_mirror_flags() {
    let incorrect = FakePin::default();
    let blocked = FakePin::default();
    let mut indicators = Indicators::new(incorrect.clone(), blocked.clone());
    let mut state = SharedState::new();

    for (ic, sb) in [(true, false), (false, true), (true, true), (false, false)] {
        state.set_incorrect_code(ic);
        state.set_system_blocked(sb);
        indicators.update(&state);
        assert_eq!(incorrect.high.get(), ic);
        assert_eq!(blocked.high.get(), sb);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Display State Machine Tests
// ═══════════════════════════════════════════════════════════════════════════

fn tick(
    controller: &mut DisplayController,
    display: &mut RecordingDisplay,
    alarm: &Alarm,
    readings: &mut Readings,
    ticks: usize,
) {
    for _ in 0..ticks {
        controller.update(display, alarm, readings);
    }
}

#[test]
fn init_shows_report_labels() {
    let mut display = RecordingDisplay::default();
    let mut controller = DisplayController::new(TICK_MS);

    controller.init(&mut display);

    let mut expected = vec![Op::Init];
    expected.extend(report_labels());
    assert_eq!(display.take(), expected);
    assert_eq!(controller.screen(), Some(Screen::Report));
    assert_eq!(controller.refresh_ms(), DISPLAY_REFRESH_TIME_REPORT_MS);
}

#[test]
fn report_refreshes_once_per_period() {
    let mut display = RecordingDisplay::default();
    let mut controller = DisplayController::new(TICK_MS);
    let alarm = Alarm { active: false };
    let mut readings = Readings::new(22.6, false);
    controller.init(&mut display);
    display.take();

    // 10 ticks bring the accumulator to 1000 ms without rendering.
    tick(&mut controller, &mut display, &alarm, &mut readings, 10);
    assert!(display.take().is_empty());

    tick(&mut controller, &mut display, &alarm, &mut readings, 1);
    assert_eq!(display.take(), report_fields("23 ", "Not Detected"));

    let period = ticks_per_refresh(DISPLAY_REFRESH_TIME_REPORT_MS);
    tick(&mut controller, &mut display, &alarm, &mut readings, period - 1);
    assert!(display.take().is_empty());
    tick(&mut controller, &mut display, &alarm, &mut readings, 1);
    assert_eq!(display.take(), report_fields("23 ", "Not Detected"));
}

#[test]
fn report_pads_short_fields() {
    let mut display = RecordingDisplay::default();
    let mut controller = DisplayController::new(TICK_MS);
    let alarm = Alarm { active: false };
    let mut readings = Readings::new(7.2, true);
    controller.init(&mut display);
    display.take();

    let period = ticks_per_refresh(DISPLAY_REFRESH_TIME_REPORT_MS);
    tick(&mut controller, &mut display, &alarm, &mut readings, period);

    assert_eq!(display.take(), report_fields("7  ", "Detected    "));
}

#[test]
fn report_temperature_stays_left_of_unit() {
    let cases = [
        (100.0, "100"),
        (149.6, "150"),
        (1234.0, "999"),
        (-15.0, "-15"),
        (-150.0, "-99"),
    ];
    let period = ticks_per_refresh(DISPLAY_REFRESH_TIME_REPORT_MS);

    for (celsius, shown) in cases {
        let mut display = RecordingDisplay::default();
        let mut controller = DisplayController::new(TICK_MS);
        let alarm = Alarm { active: false };
        let mut readings = Readings::new(celsius, false);
        controller.init(&mut display);
        display.take();

        tick(&mut controller, &mut display, &alarm, &mut readings, period);
        assert_eq!(display.take(), report_fields(shown, "Not Detected"), "{celsius}");
    }
}

#[test]
fn display_flushes_once_per_refresh() {
    let mut display = RecordingDisplay::default();
    let mut controller = DisplayController::new(TICK_MS);
    let mut alarm = Alarm { active: false };
    let mut readings = Readings::new(40.0, false);

    controller.init(&mut display);
    assert_eq!(display.flushes, 1);

    // Accumulating ticks never touch the panel.
    tick(&mut controller, &mut display, &alarm, &mut readings, 10);
    assert_eq!(display.flushes, 1);

    // Report refresh plus the switch to the alarm screen: one transfer.
    alarm.active = true;
    tick(&mut controller, &mut display, &alarm, &mut readings, 1);
    assert_eq!(controller.screen(), Some(Screen::Alarm));
    assert_eq!(display.flushes, 2);

    // Every rendering update flushes exactly once, idle ones not at all.
    let period = ticks_per_refresh(DISPLAY_REFRESH_TIME_ALARM_MS);
    for refresh in 1..=4 {
        tick(&mut controller, &mut display, &alarm, &mut readings, period - 1);
        assert_eq!(display.flushes, 1 + refresh);
        tick(&mut controller, &mut display, &alarm, &mut readings, 1);
        assert_eq!(display.flushes, 2 + refresh);
    }
}

#[test]
fn alarm_switches_to_animation_after_report_refresh() {
    let mut display = RecordingDisplay::default();
    let mut controller = DisplayController::new(TICK_MS);
    let mut alarm = Alarm { active: false };
    let mut readings = Readings::new(60.0, true);
    controller.init(&mut display);
    display.take();

    // Alarm goes active mid-period: nothing changes until the next refresh.
    tick(&mut controller, &mut display, &alarm, &mut readings, 5);
    alarm.active = true;
    tick(&mut controller, &mut display, &alarm, &mut readings, 5);
    assert!(display.take().is_empty());
    assert_eq!(controller.screen(), Some(Screen::Report));

    tick(&mut controller, &mut display, &alarm, &mut readings, 1);

    // Still says OFF: the report screen never shows the alarm as on.
    let mut expected = report_fields("60 ", "Detected    ");
    expected.extend(alarm_entry());
    assert_eq!(display.take(), expected);
    assert_eq!(controller.screen(), Some(Screen::Alarm));
    assert_eq!(controller.refresh_ms(), DISPLAY_REFRESH_TIME_ALARM_MS);
    assert_eq!(controller.alarm_frame(), 0);
}

#[test]
fn alarm_animation_cycles_frames() {
    let mut display = RecordingDisplay::default();
    let mut controller = DisplayController::new(TICK_MS);
    let alarm = Alarm { active: true };
    let mut readings = Readings::new(60.0, true);
    controller.init(&mut display);
    tick(
        &mut controller,
        &mut display,
        &alarm,
        &mut readings,
        ticks_per_refresh(DISPLAY_REFRESH_TIME_REPORT_MS),
    );
    display.take();

    let period = ticks_per_refresh(DISPLAY_REFRESH_TIME_ALARM_MS);
    let mut drawn = Vec::new();
    for _ in 0..6 {
        tick(&mut controller, &mut display, &alarm, &mut readings, period - 1);
        assert!(display.take().is_empty());
        tick(&mut controller, &mut display, &alarm, &mut readings, 1);
        match display.take().as_slice() {
            [Op::Bitmap(Some(frame))] => drawn.push(*frame),
            other => panic!("expected one frame, got {other:?}"),
        }
    }

    assert_eq!(drawn, vec![0, 1, 2, 3, 0, 1]);
}

#[test]
fn alarm_clearing_returns_to_report() {
    let mut display = RecordingDisplay::default();
    let mut controller = DisplayController::new(TICK_MS);
    let mut alarm = Alarm { active: true };
    let mut readings = Readings::new(30.0, false);
    controller.init(&mut display);
    tick(
        &mut controller,
        &mut display,
        &alarm,
        &mut readings,
        ticks_per_refresh(DISPLAY_REFRESH_TIME_REPORT_MS),
    );
    display.take();

    alarm.active = false;
    tick(
        &mut controller,
        &mut display,
        &alarm,
        &mut readings,
        ticks_per_refresh(DISPLAY_REFRESH_TIME_ALARM_MS),
    );

    // The pending frame is still drawn before the report comes back.
    let mut expected = vec![Op::Bitmap(Some(0))];
    expected.extend(report_labels());
    assert_eq!(display.take(), expected);
    assert_eq!(controller.screen(), Some(Screen::Report));
    assert_eq!(controller.refresh_ms(), DISPLAY_REFRESH_TIME_REPORT_MS);
}

#[test]
fn out_of_range_frame_clears_and_restarts_at_one() {
    let mut display = RecordingDisplay::default();
    let mut controller = DisplayController::new(TICK_MS);
    let alarm = Alarm { active: true };
    let mut readings = Readings::new(60.0, true);
    controller.init(&mut display);
    tick(
        &mut controller,
        &mut display,
        &alarm,
        &mut readings,
        ticks_per_refresh(DISPLAY_REFRESH_TIME_REPORT_MS),
    );
    display.take();

    controller.set_alarm_frame(9);
    let period = ticks_per_refresh(DISPLAY_REFRESH_TIME_ALARM_MS);
    tick(&mut controller, &mut display, &alarm, &mut readings, period);
    assert_eq!(display.take(), vec![Op::Bitmap(None)]);
    assert_eq!(controller.alarm_frame(), 1);

    tick(&mut controller, &mut display, &alarm, &mut readings, period);
    assert_eq!(display.take(), vec![Op::Bitmap(Some(1))]);
}

#[test]
fn update_before_init_falls_back_to_report() {
    let mut display = RecordingDisplay::default();
    let mut controller = DisplayController::new(TICK_MS);
    let alarm = Alarm { active: true };
    let mut readings = Readings::new(20.0, false);
    assert_eq!(controller.screen(), None);

    tick(
        &mut controller,
        &mut display,
        &alarm,
        &mut readings,
        ticks_per_refresh(DISPLAY_REFRESH_TIME_REPORT_MS),
    );

    assert_eq!(display.take(), report_labels());
    assert_eq!(controller.screen(), Some(Screen::Report));
}

// ═══════════════════════════════════════════════════════════════════════════
// Button Handler Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn motor_button_logs_count_toggles_led_and_drives_motor() {
    let console = Recorder::<String>::default();
    let led = FakePin::default();
    let motor = Recorder::<MotorDirection>::default();
    let mut button = MotorDirectionButton::new(console.clone(), led.clone(), motor.clone());

    button.on_falling_edge();
    assert!(led.high.get());
    button.on_falling_edge();
    assert!(!led.high.get());
    button.on_falling_edge();

    assert_eq!(console.calls(), vec!["n=0", "n=1", "n=2"]);
    assert_eq!(motor.calls(), vec![MotorDirection::Direction1; 3]);
    assert_eq!(button.presses(), 3);
}

#[test]
fn colour_button_applies_each_preset_once() {
    let led = Recorder::<(RgbChannel, f32)>::default();
    let mut button = ColorCycleButton::new(led.clone());

    for (red, green, blue) in COLOR_PRESETS {
        led.calls.borrow_mut().clear();
        button.on_falling_edge();
        assert_eq!(
            led.calls(),
            vec![
                (RgbChannel::Red, red),
                (RgbChannel::Green, green),
                (RgbChannel::Blue, blue),
            ]
        );
    }

    led.calls.borrow_mut().clear();
    button.on_falling_edge();
    button.on_falling_edge();
    assert!(led.calls().is_empty());
    assert_eq!(button.preset(), 5);
}

// ═══════════════════════════════════════════════════════════════════════════
// UserInterface Tests
// ═══════════════════════════════════════════════════════════════════════════

type TestUi = UserInterface<ScriptedKeypad, RecordingDisplay, FakePin, FakePin>;

fn ui_with_keypad(keypad: ScriptedKeypad) -> (TestUi, FakePin, FakePin) {
    let incorrect = FakePin::default();
    let blocked = FakePin::default();
    let ui = UserInterface::new(
        keypad,
        RecordingDisplay::default(),
        Indicators::new(incorrect.clone(), blocked.clone()),
        TICK_MS,
    );
    (ui, incorrect, blocked)
}

#[test]
fn init_clears_indicators_and_shows_report() {
    let keypad = ScriptedKeypad::default();
    let init_tick = keypad.init_tick.clone();
    let (mut ui, incorrect, blocked) = ui_with_keypad(keypad);
    incorrect.high.set(true);
    blocked.high.set(true);

    ui.init(&SharedState::new());

    assert!(!incorrect.high.get());
    assert!(!blocked.high.get());
    assert_eq!(init_tick.get(), Some(TICK_MS));
    assert_eq!(ui.display().ops[0], Op::Init);
    assert_eq!(ui.controller().screen(), Some(Screen::Report));
}

#[test]
fn reset_gesture_reaches_indicator_in_same_tick() {
    let keypad = ScriptedKeypad {
        keys: "##".chars().collect(),
        ..Default::default()
    };
    let (mut ui, incorrect, _) = ui_with_keypad(keypad);
    let mut state = SharedState::new();
    let alarm = Alarm { active: true };
    let mut readings = Readings::new(60.0, true);
    ui.init(&state);
    state.set_incorrect_code(true);

    ui.update(&mut state, &alarm, &mut readings);
    assert!(incorrect.high.get());
    assert_eq!(ui.code_entry().reset_presses(), 1);

    ui.update(&mut state, &alarm, &mut readings);
    assert!(!state.incorrect_code());
    assert!(!incorrect.high.get());
}
