//! fire-alarm-ui firmware for the nRF52840-DK.
//!
//! One cooperative tick loop samples the sensors, runs the alarm/code
//! validator and then the UI. The two buttons each run in their own task
//! and react to falling edges between ticks.
//!
//! Build: `cargo build --release --features embedded --target thumbv7em-none-eabihf`

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{AnyPin, Input, Level, Output, OutputDrive, Pin, Pull};
use embassy_nrf::pwm::SimplePwm;
use embassy_nrf::saadc::{self, ChannelConfig, Saadc};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::uarte::{self, UarteTx};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{Duration, Ticker};
use fire_alarm_ui::board::{
    BoardColorButton, BoardIndicators, BoardMotorButton, BoardUi, PinMotor, PwmRgbLed, UartConsole,
};
use fire_alarm_ui::config::TICK_PERIOD_MS;
use fire_alarm_ui::drivers::edge::edge_task;
use fire_alarm_ui::drivers::glcd::Glcd;
use fire_alarm_ui::drivers::matrix_keypad::{DebouncedKeypad, PinMatrix};
use fire_alarm_ui::sensors::{Readings, TemperatureFilter};
use fire_alarm_ui::ui::buttons::{ColorCycleButton, MotorDirectionButton};
use fire_alarm_ui::{FireAlarm, SharedState, UserInterface};
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    UARTE0 => uarte::InterruptHandler<peripherals::UARTE0>;
});

#[embassy_executor::task]
async fn motor_button_task(pin: AnyPin, mut handler: BoardMotorButton) {
    edge_task(pin, &mut handler).await
}

#[embassy_executor::task]
async fn color_button_task(pin: AnyPin, mut handler: BoardColorButton) {
    edge_task(pin, &mut handler).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("fire-alarm-ui starting");

    // Button handlers: own their console, LED and actuators.
    let mut uart_config = uarte::Config::default();
    uart_config.baudrate = uarte::Baudrate::BAUD115200;
    let console = UartConsole::new(UarteTx::new(p.UARTE0, Irqs, p.P0_06, uart_config));
    let alarm_led = Output::new(p.P0_13, Level::High, OutputDrive::Standard);
    let motor = PinMotor::new(
        Output::new(p.P1_10, Level::High, OutputDrive::Standard),
        Output::new(p.P1_11, Level::High, OutputDrive::Standard),
    );
    let rgb = PwmRgbLed::new(SimplePwm::new_3ch(p.PWM0, p.P1_12, p.P1_13, p.P1_14));

    spawner.must_spawn(motor_button_task(
        p.P0_11.degrade(),
        MotorDirectionButton::new(console, alarm_led, motor),
    ));
    spawner.must_spawn(color_button_task(
        p.P0_12.degrade(),
        ColorCycleButton::new(rgb),
    ));

    // Tick-driven UI.
    let rows = [
        Output::new(p.P1_01, Level::High, OutputDrive::Standard),
        Output::new(p.P1_02, Level::High, OutputDrive::Standard),
        Output::new(p.P1_03, Level::High, OutputDrive::Standard),
        Output::new(p.P1_04, Level::High, OutputDrive::Standard),
    ];
    let cols = [
        Input::new(p.P1_05, Pull::Up),
        Input::new(p.P1_06, Pull::Up),
        Input::new(p.P1_07, Pull::Up),
        Input::new(p.P1_08, Pull::Up),
    ];
    let keypad = DebouncedKeypad::new(PinMatrix::new(rows, cols));

    // Fast-mode I²C: a full 1 KiB frame push takes ~25 ms instead of ~100 ms.
    let mut i2c_config = twim::Config::default();
    i2c_config.frequency = twim::Frequency::K400;
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, i2c_config);
    let display = Glcd::new(i2c);

    let indicators: BoardIndicators = BoardIndicators::new(
        Output::new(p.P0_15, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_14, Level::Low, OutputDrive::Standard),
    );

    let mut ui: BoardUi = UserInterface::new(keypad, display, indicators, TICK_PERIOD_MS);
    let mut shared = SharedState::new();
    let mut fire_alarm = FireAlarm::new();
    ui.init(&shared);

    // Sensors.
    let mut saadc = Saadc::new(
        p.SAADC,
        Irqs,
        saadc::Config::default(),
        [ChannelConfig::single_ended(p.P0_02)],
    );
    saadc.calibrate().await;
    let gas = Input::new(p.P0_03, Pull::Up);
    let mut temperature = TemperatureFilter::new();

    info!("fire-alarm-ui running, tick {} ms", TICK_PERIOD_MS);

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(TICK_PERIOD_MS)));
    loop {
        let mut sample = [0i16; 1];
        saadc.sample(&mut sample).await;
        temperature.push(sample[0]);

        let mut readings = Readings::new(temperature.celsius(), gas.is_low());
        fire_alarm.update(&mut readings, &mut shared);
        ui.update(&mut shared, &fire_alarm, &mut readings);

        ticker.next().await;
    }
}
