//! Collaborator traits required by the UI core.
//!
//! The keypad primitive, display, sensors, alarm owner, actuators and
//! serial console are black boxes to the UI. The same logic runs on the
//! nRF52840 (see `board` and `drivers`) and against recording fakes in
//! the host tests. Status LEDs use `embedded_hal::digital` pins directly.

use crate::drivers::bitmaps::Bitmap;

/// Keypad primitive that reports one released key per call.
pub trait MatrixKeypad {
    /// Prepare the keypad. `tick_ms` is the period at which `update` will be called.
    fn init(&mut self, tick_ms: u32);

    /// Advance the keypad by one tick. Returns the key released during this
    /// call, if any.
    fn update(&mut self) -> Option<char>;
}

/// Rendering mode of the display controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Character cells addressed by (column, row).
    Char,
    /// Full-screen bitmaps.
    Graphic,
}

/// Character/graphic display.
pub trait DisplayDriver {
    fn init(&mut self);
    fn clear(&mut self);
    fn set_mode(&mut self, mode: DisplayMode);
    /// Move the text cursor to character cell (`col`, `row`).
    fn set_cursor(&mut self, col: u8, row: u8);
    /// Write text at the cursor.
    fn write_str(&mut self, text: &str);
    fn write_bitmap(&mut self, bitmap: &Bitmap);
    /// Push everything drawn since the last flush to the panel. Called at
    /// most once per tick.
    fn flush(&mut self);
}

/// Latest sensor values.
pub trait SensorReadings {
    fn temperature_celsius(&mut self) -> f32;
    fn gas_detected(&mut self) -> bool;
}

/// Owner of the siren / alarm state. Read-only from the UI.
pub trait AlarmSource {
    fn is_active(&self) -> bool;
}

/// Motor drive direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorDirection {
    Stopped,
    Direction1,
    Direction2,
}

pub trait Motor {
    fn set_direction(&mut self, direction: MotorDirection);
}

/// Channel of the RGB status LED.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RgbChannel {
    Red,
    Green,
    Blue,
}

pub trait RgbLed {
    /// Set a channel's duty cycle, `ratio` in `[0, 1]`.
    fn set_duty_cycle(&mut self, channel: RgbChannel, ratio: f32);
}

/// Line-oriented text output (serial console).
pub trait TextOutput {
    fn write_line(&mut self, line: &str);
}
