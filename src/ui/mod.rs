//! User interface subsystem - keypad, status LEDs, display and buttons.
//!
//! `UserInterface::update` is called once per tick and runs, in order:
//!
//! 1. **Keypad**: poll for a released key
//! 2. **Code entry**: feed the key into the disarm-code buffer
//! 3. **Indicators**: mirror the incorrect-code / system-blocked flags
//! 4. **Display**: refresh the report or alarm screen when due
//!
//! The two edge-triggered buttons (`buttons`) run outside this sequence.

pub mod buttons;
pub mod code_entry;
pub mod display;
pub mod indicators;
pub mod keypad;

#[cfg(test)]
mod tests;

use crate::hal::{AlarmSource, DisplayDriver, MatrixKeypad, SensorReadings};
use crate::state::SharedState;
use code_entry::CodeEntry;
use display::DisplayController;
use embedded_hal::digital::OutputPin;
use indicators::Indicators;
use keypad::KeypadInput;

/// The tick-driven part of the UI.
pub struct UserInterface<K, D, IC, SB> {
    keypad: KeypadInput<K>,
    code_entry: CodeEntry,
    indicators: Indicators<IC, SB>,
    display: D,
    controller: DisplayController,
    tick_ms: u32,
}

impl<K, D, IC, SB> UserInterface<K, D, IC, SB>
where
    K: MatrixKeypad,
    D: DisplayDriver,
    IC: OutputPin,
    SB: OutputPin,
{
    /// Assemble the UI. `tick_ms` is the period at which `update` will be called.
    pub fn new(keypad: K, display: D, indicators: Indicators<IC, SB>, tick_ms: u32) -> Self {
        Self {
            keypad: KeypadInput::new(keypad),
            code_entry: CodeEntry::new(),
            indicators,
            display,
            controller: DisplayController::new(tick_ms),
            tick_ms,
        }
    }

    /// Bring up the keypad and display and show the report screen.
    pub fn init(&mut self, state: &SharedState) {
        info!("UI: init, tick {} ms", self.tick_ms);
        self.indicators.update(state);
        self.keypad.init(self.tick_ms);
        self.controller.init(&mut self.display);
    }

    /// Run one tick.
    pub fn update(
        &mut self,
        state: &mut SharedState,
        alarm: &impl AlarmSource,
        sensors: &mut impl SensorReadings,
    ) {
        let key = self.keypad.poll();
        self.code_entry.process(key, alarm.is_active(), state);
        self.indicators.update(state);
        self.controller.update(&mut self.display, alarm, sensors);
    }

    pub fn controller(&self) -> &DisplayController {
        &self.controller
    }

    pub fn code_entry(&self) -> &CodeEntry {
        &self.code_entry
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}
