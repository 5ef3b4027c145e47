//! Fire alarm state owner and disarm-code validator.
//!
//! Runs once per tick, before the UI, and talks to it only through
//! `SharedState`: it consumes `code_complete`, latches `incorrect_code`
//! and, after too many wrong codes, `system_blocked`.

use crate::config::{DISARM_CODE, MAX_WRONG_CODE_ATTEMPTS, OVER_TEMPERATURE_LEVEL_C};
use crate::hal::{AlarmSource, SensorReadings};
use crate::state::SharedState;

pub struct FireAlarm {
    active: bool,
    wrong_attempts: u8,
}

impl FireAlarm {
    pub const fn new() -> Self {
        Self {
            active: false,
            wrong_attempts: 0,
        }
    }

    /// Sample the sensors and check any completed code.
    pub fn update(&mut self, sensors: &mut impl SensorReadings, state: &mut SharedState) {
        let gas = sensors.gas_detected();
        let over_temperature = sensors.temperature_celsius() > OVER_TEMPERATURE_LEVEL_C;
        if (gas || over_temperature) && !self.active {
            info!("Alarm: activated (gas={}, over_temp={})", gas, over_temperature);
            self.active = true;
        }

        if state.code_complete() {
            state.set_code_complete(false);
            self.check_code(state);
        }
    }

    fn check_code(&mut self, state: &mut SharedState) {
        if !self.active {
            return;
        }

        if *state.code().keys() == DISARM_CODE {
            info!("Alarm: correct code, deactivated");
            self.active = false;
            self.wrong_attempts = 0;
            state.set_incorrect_code(false);
            return;
        }

        self.wrong_attempts = self.wrong_attempts.saturating_add(1);
        warn!("Alarm: incorrect code ({} attempts)", self.wrong_attempts);
        state.set_incorrect_code(true);
        if self.wrong_attempts >= MAX_WRONG_CODE_ATTEMPTS {
            warn!("Alarm: system blocked");
            state.set_system_blocked(true);
        }
    }

    pub fn wrong_attempts(&self) -> u8 {
        self.wrong_attempts
    }
}

impl Default for FireAlarm {
    fn default() -> Self {
        Self::new()
    }
}

impl AlarmSource for FireAlarm {
    fn is_active(&self) -> bool {
        self.active
    }
}
