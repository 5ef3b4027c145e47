//! Falling-edge button handlers.
//!
//! Two buttons (active-low with internal pull-up):
//!   - MOTOR - logs a press count, toggles the alarm LED, drives the motor
//!   - COLOUR - steps the RGB LED through the red/green/blue presets
//!
//! Handlers run outside the main tick, each owning its counter and its
//! outputs. They share nothing with the tick-driven UI, so no locking is
//! needed; every field they touch is private to one handler.

use core::fmt::Write;

use crate::config::COLOR_PRESETS;
use crate::hal::{Motor, MotorDirection, RgbChannel, RgbLed, TextOutput};
use embedded_hal::digital::StatefulOutputPin;

/// Reaction to a falling edge on one input line.
pub trait EdgeHandler {
    fn on_falling_edge(&mut self);
}

/// Logs `n=<count>`, toggles the alarm LED and drives the motor forward.
pub struct MotorDirectionButton<T, L, M> {
    presses: u32,
    console: T,
    alarm_led: L,
    motor: M,
}

impl<T, L, M> MotorDirectionButton<T, L, M>
where
    T: TextOutput,
    L: StatefulOutputPin,
    M: Motor,
{
    pub fn new(console: T, alarm_led: L, motor: M) -> Self {
        Self {
            presses: 0,
            console,
            alarm_led,
            motor,
        }
    }

    /// Presses handled so far.
    pub fn presses(&self) -> u32 {
        self.presses
    }
}

impl<T, L, M> EdgeHandler for MotorDirectionButton<T, L, M>
where
    T: TextOutput,
    L: StatefulOutputPin,
    M: Motor,
{
    fn on_falling_edge(&mut self) {
        let mut line: heapless::String<16> = heapless::String::new();
        if write!(line, "n={}", self.presses).is_ok() {
            self.console.write_line(&line);
        }
        self.presses = self.presses.wrapping_add(1);

        let _ = self.alarm_led.toggle();
        self.motor.set_direction(MotorDirection::Direction1);
    }
}

/// Steps the RGB LED through `COLOR_PRESETS`, once each.
///
/// The preset index keeps counting after the last preset; further presses
/// leave the LED unchanged.
pub struct ColorCycleButton<R> {
    preset: u8,
    led: R,
}

impl<R: RgbLed> ColorCycleButton<R> {
    pub fn new(led: R) -> Self {
        Self { preset: 0, led }
    }

    /// Index of the preset the next press applies.
    pub fn preset(&self) -> u8 {
        self.preset
    }
}

impl<R: RgbLed> EdgeHandler for ColorCycleButton<R> {
    fn on_falling_edge(&mut self) {
        if let Some(&(red, green, blue)) = COLOR_PRESETS.get(usize::from(self.preset)) {
            self.led.set_duty_cycle(RgbChannel::Red, red);
            self.led.set_duty_cycle(RgbChannel::Green, green);
            self.led.set_duty_cycle(RgbChannel::Blue, blue);
        }
        self.preset = self.preset.saturating_add(1);
    }
}
