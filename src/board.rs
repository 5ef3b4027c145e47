//! nRF52840 implementations of the collaborator traits.
//!
//! Everything here owns its peripheral outright: the motor, RGB LED and
//! console belong to the button handlers, the keypad and display to the
//! tick loop. Nothing is shared between tasks.

use crate::config::RGB_PWM_MAX_DUTY;
use crate::drivers::glcd::Glcd;
use crate::drivers::matrix_keypad::{DebouncedKeypad, PinMatrix};
use crate::error::Error;
use crate::hal::{Motor, MotorDirection, RgbChannel, RgbLed, TextOutput};
use crate::ui::buttons::{ColorCycleButton, MotorDirectionButton};
use crate::ui::indicators::Indicators;
use crate::ui::UserInterface;
use embassy_nrf::gpio::{Input, Output};
use embassy_nrf::peripherals::{PWM0, TWISPI0, UARTE0};
use embassy_nrf::pwm::SimplePwm;
use embassy_nrf::twim::Twim;
use embassy_nrf::uarte::UarteTx;

/// Concrete UI type for this board.
pub type BoardUi = UserInterface<
    DebouncedKeypad<PinMatrix<Output<'static>, Input<'static>>>,
    Glcd<Twim<'static, TWISPI0>>,
    Output<'static>,
    Output<'static>,
>;

pub type BoardIndicators = Indicators<Output<'static>, Output<'static>>;

pub type BoardMotorButton = MotorDirectionButton<UartConsole, Output<'static>, PinMotor>;

pub type BoardColorButton = ColorCycleButton<PwmRgbLed>;

/// DC motor on two direction lines.
pub struct PinMotor {
    m1: Output<'static>,
    m2: Output<'static>,
}

impl PinMotor {
    /// Both lines start high (stopped).
    pub fn new(m1: Output<'static>, m2: Output<'static>) -> Self {
        let mut motor = Self { m1, m2 };
        motor.set_direction(MotorDirection::Stopped);
        motor
    }
}

impl Motor for PinMotor {
    fn set_direction(&mut self, direction: MotorDirection) {
        debug!("Motor: {:?}", direction);
        match direction {
            MotorDirection::Direction1 => {
                self.m2.set_high();
                self.m1.set_low();
            }
            MotorDirection::Direction2 => {
                self.m1.set_high();
                self.m2.set_low();
            }
            MotorDirection::Stopped => {
                self.m1.set_high();
                self.m2.set_high();
            }
        }
    }
}

/// RGB LED on the three channels of PWM0.
pub struct PwmRgbLed {
    pwm: SimplePwm<'static, PWM0>,
}

impl PwmRgbLed {
    pub fn new(mut pwm: SimplePwm<'static, PWM0>) -> Self {
        pwm.set_max_duty(RGB_PWM_MAX_DUTY);
        Self { pwm }
    }
}

impl RgbLed for PwmRgbLed {
    fn set_duty_cycle(&mut self, channel: RgbChannel, ratio: f32) {
        let index = match channel {
            RgbChannel::Red => 0,
            RgbChannel::Green => 1,
            RgbChannel::Blue => 2,
        };
        let duty = (ratio.clamp(0.0, 1.0) * f32::from(RGB_PWM_MAX_DUTY)) as u16;
        self.pwm.set_duty(index, duty);
    }
}

/// Serial console on UARTE0 (TX only).
pub struct UartConsole {
    tx: UarteTx<'static, UARTE0>,
}

impl UartConsole {
    pub fn new(tx: UarteTx<'static, UARTE0>) -> Self {
        Self { tx }
    }
}

impl TextOutput for UartConsole {
    fn write_line(&mut self, line: &str) {
        // EasyDMA only reads RAM, so stage the line (and CRLF) on the stack.
        let mut buf: heapless::Vec<u8, 64> = heapless::Vec::new();
        if buf.extend_from_slice(line.as_bytes()).is_err()
            || buf.extend_from_slice(b"\r\n").is_err()
        {
            warn!("Console: line too long: {:?}", Error::Format);
            return;
        }
        if self.tx.blocking_write(&buf).is_err() {
            warn!("Console: write failed: {:?}", Error::Serial);
        }
    }
}
