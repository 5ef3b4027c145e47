//! Application-wide constants and compile-time configuration.
//!
//! All timing parameters, code-entry policy, sensor thresholds and pin
//! assignments live here so they can be tuned in one place.

// System tick

/// Period of the cooperative main loop (ms). Every tick-driven component
/// accumulates time in multiples of this value.
pub const TICK_PERIOD_MS: u32 = 10;

// Code entry

/// Number of keys in a disarm code.
pub const CODE_NUMBER_OF_KEYS: usize = 4;

/// Key that, pressed twice while an incorrect code is latched, clears the lock.
pub const CODE_RESET_KEY: char = '#';

/// Number of reset-key releases that clear an incorrect-code lock.
pub const CODE_RESET_PRESSES: u8 = 2;

/// Code that deactivates the alarm.
pub const DISARM_CODE: [char; CODE_NUMBER_OF_KEYS] = ['1', '8', '0', '5'];

/// Wrong codes accepted before the system blocks further entry.
pub const MAX_WRONG_CODE_ATTEMPTS: u8 = 5;

// Display

/// Report screen refresh period (ms).
pub const DISPLAY_REFRESH_TIME_REPORT_MS: u32 = 1000;

/// Alarm animation frame period (ms). Shorter than the report period so the
/// animation runs visibly faster.
pub const DISPLAY_REFRESH_TIME_ALARM_MS: u32 = 300;

/// Graphic display width in pixels.
pub const GLCD_WIDTH: usize = 128;

/// Graphic display height in pixels.
pub const GLCD_HEIGHT: usize = 64;

// Matrix keypad

/// Time a key must stay pressed before it counts (ms).
pub const KEYPAD_DEBOUNCE_MS: u32 = 40;

pub const KEYPAD_ROWS: usize = 4;
pub const KEYPAD_COLS: usize = 4;

/// Character produced by each (row, col) of the keypad.
pub const KEYPAD_LAYOUT: [[char; KEYPAD_COLS]; KEYPAD_ROWS] = [
    ['1', '2', '3', 'A'],
    ['4', '5', '6', 'B'],
    ['7', '8', '9', 'C'],
    ['*', '0', '#', 'D'],
];

// Sensors

/// Temperature above which the alarm activates (°C).
pub const OVER_TEMPERATURE_LEVEL_C: f32 = 50.0;

/// Number of LM35 samples in the moving average.
pub const LM35_AVERAGE_SAMPLES: usize = 10;

/// SAADC full-scale voltage with the default gain (1/6) and 0.6 V reference.
pub const ADC_FULL_SCALE_VOLTS: f32 = 3.6;

/// SAADC resolution in counts (12-bit).
pub const ADC_MAX_COUNTS: f32 = 4096.0;

// RGB LED

/// Duty-cycle presets cycled by the colour button, as (red, green, blue).
pub const COLOR_PRESETS: [(f32, f32, f32); 3] = [
    (0.6, 0.05, 0.05),  // red dominant
    (0.05, 0.6, 0.05),  // green dominant
    (0.005, 0.05, 0.6), // blue dominant
];

/// PWM counter top for the RGB LED (duty 1.0 == this value).
pub const RGB_PWM_MAX_DUTY: u16 = 1000;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; the `embassy_nrf::peripherals::*` pins are
// selected in `main.rs`.  Adjust for your custom board.
//
//   Alarm LED            → P0.13 (LED1)
//   System blocked LED   → P0.14 (LED2)
//   Incorrect code LED   → P0.15 (LED3)
//   Motor button         → P0.11 (Button 1)
//   Colour button        → P0.12 (Button 2)
//   Keypad rows          → P1.01 .. P1.04
//   Keypad columns       → P1.05 .. P1.08
//   LM35 output          → P0.02 (AIN0)
//   Gas detector DO      → P0.03 (active low)
//   I²C SDA / SCL        → P0.26 / P0.27
//   Motor M1 / M2        → P1.10 / P1.11
//   RGB LED R / G / B    → P1.12 / P1.13 / P1.14
//   Serial TX            → P0.06 (VCOM)
