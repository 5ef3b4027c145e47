//! Report / alarm display state machine.
//!
//! Two screens share the display, each with its own refresh period:
//!
//! - **Report** (every `DISPLAY_REFRESH_TIME_REPORT_MS`): temperature, gas
//!   and alarm fields in char mode.
//! - **Alarm** (every `DISPLAY_REFRESH_TIME_ALARM_MS`): a 4-frame bitmap
//!   animation in graphic mode.
//!
//! A single accumulator counts tick time. When it reaches the active
//! screen's period it is zeroed and the screen refreshes; the refresh then
//! samples the alarm state and may switch screens. Entering a screen sets a
//! new period but leaves the accumulator alone, so a switch can shift the
//! phase of the next refresh by up to one tick.

use core::fmt::Write;

use crate::config::{DISPLAY_REFRESH_TIME_ALARM_MS, DISPLAY_REFRESH_TIME_REPORT_MS};
use crate::drivers::bitmaps::{CLEAR_SCREEN, FIRE_ALARM_FRAMES};
use crate::hal::{AlarmSource, DisplayDriver, DisplayMode, SensorReadings};

/// Screens (views) the display can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Live sensor readings as text.
    Report,
    /// Cyclic alarm animation.
    Alarm,
}

/// Field positions on the report screen, as (col, row).
const TEMPERATURE_LABEL: (u8, u8) = (0, 0);
const TEMPERATURE_VALUE: (u8, u8) = (12, 0);
const TEMPERATURE_UNIT: (u8, u8) = (15, 0);
const GAS_LABEL: (u8, u8) = (0, 1);
const GAS_VALUE: (u8, u8) = (4, 1);
const ALARM_LABEL: (u8, u8) = (0, 2);
const ALARM_VALUE: (u8, u8) = (6, 2);

/// Range that fits the 3-cell temperature field.
const TEMPERATURE_SHOWN_C: (f32, f32) = (-99.0, 999.0);

// Both gas values are 12 chars wide so either fully overwrites the other.
const GAS_DETECTED: &str = "Detected    ";
const GAS_NOT_DETECTED: &str = "Not Detected";

pub struct DisplayController {
    /// `None` until a screen has been entered.
    screen: Option<Screen>,
    refresh_ms: u32,
    accumulated_ms: u32,
    tick_ms: u32,
    alarm_frame: u8,
}

impl DisplayController {
    pub const fn new(tick_ms: u32) -> Self {
        Self {
            screen: None,
            refresh_ms: DISPLAY_REFRESH_TIME_REPORT_MS,
            accumulated_ms: 0,
            tick_ms,
            alarm_frame: 0,
        }
    }

    /// Initialise the display hardware and enter the report screen.
    pub fn init(&mut self, display: &mut impl DisplayDriver) {
        display.init();
        self.enter_report(display);
        display.flush();
    }

    /// Advance one tick.
    pub fn update(
        &mut self,
        display: &mut impl DisplayDriver,
        alarm: &impl AlarmSource,
        sensors: &mut impl SensorReadings,
    ) {
        if self.accumulated_ms < self.refresh_ms {
            self.accumulated_ms += self.tick_ms;
            return;
        }

        self.accumulated_ms = 0;

        match self.screen {
            Some(Screen::Report) => {
                self.refresh_report(display, sensors);
                if alarm.is_active() {
                    self.enter_alarm(display);
                }
            }
            Some(Screen::Alarm) => {
                self.refresh_alarm(display);
                if !alarm.is_active() {
                    self.enter_report(display);
                }
            }
            None => {
                warn!("Display: no active screen, entering report");
                self.enter_report(display);
            }
        }

        // One panel transfer per refresh, screen switch included.
        display.flush();
    }

    pub fn screen(&self) -> Option<Screen> {
        self.screen
    }

    pub fn refresh_ms(&self) -> u32 {
        self.refresh_ms
    }

    pub fn alarm_frame(&self) -> u8 {
        self.alarm_frame
    }

    #[cfg(test)]
    pub(crate) fn set_alarm_frame(&mut self, frame: u8) {
        self.alarm_frame = frame;
    }

    fn enter_report(&mut self, display: &mut impl DisplayDriver) {
        info!("Display: report screen");
        self.screen = Some(Screen::Report);
        self.refresh_ms = DISPLAY_REFRESH_TIME_REPORT_MS;

        display.set_mode(DisplayMode::Char);
        display.clear();

        write_at(display, TEMPERATURE_LABEL, "Temperature:");
        write_at(display, GAS_LABEL, "Gas:");
        write_at(display, ALARM_LABEL, "Alarm:");
    }

    fn refresh_report(
        &mut self,
        display: &mut impl DisplayDriver,
        sensors: &mut impl SensorReadings,
    ) {
        let (min, max) = TEMPERATURE_SHOWN_C;
        let celsius = sensors.temperature_celsius().clamp(min, max);
        let mut temperature: heapless::String<8> = heapless::String::new();
        if write!(temperature, "{:<3.0}", celsius).is_err() {
            temperature.clear();
            let _ = temperature.push_str("--");
        }
        write_at(display, TEMPERATURE_VALUE, &temperature);
        write_at(display, TEMPERATURE_UNIT, "'C");

        let gas = if sensors.gas_detected() {
            GAS_DETECTED
        } else {
            GAS_NOT_DETECTED
        };
        write_at(display, GAS_VALUE, gas);

        // The report screen is only ever shown with the alarm off.
        write_at(display, ALARM_VALUE, "OFF");
    }

    fn enter_alarm(&mut self, display: &mut impl DisplayDriver) {
        info!("Display: alarm screen");
        self.screen = Some(Screen::Alarm);
        self.refresh_ms = DISPLAY_REFRESH_TIME_ALARM_MS;

        display.clear();
        display.set_mode(DisplayMode::Graphic);

        self.alarm_frame = 0;
    }

    fn refresh_alarm(&mut self, display: &mut impl DisplayDriver) {
        match self.alarm_frame {
            frame @ 0..=2 => {
                display.write_bitmap(&FIRE_ALARM_FRAMES[usize::from(frame)]);
                self.alarm_frame += 1;
            }
            3 => {
                display.write_bitmap(&FIRE_ALARM_FRAMES[3]);
                self.alarm_frame = 0;
            }
            _ => {
                warn!("Display: alarm frame {} out of range", self.alarm_frame);
                display.write_bitmap(&CLEAR_SCREEN);
                self.alarm_frame = 1;
            }
        }
    }
}

fn write_at(display: &mut impl DisplayDriver, (col, row): (u8, u8), text: &str) {
    display.set_cursor(col, row);
    display.write_str(text);
}
