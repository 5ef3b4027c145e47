//! Status LEDs mirroring the shared flags.

use crate::state::SharedState;
use embedded_hal::digital::{OutputPin, PinState};

pub struct Indicators<IC, SB> {
    incorrect_code: IC,
    system_blocked: SB,
}

impl<IC: OutputPin, SB: OutputPin> Indicators<IC, SB> {
    pub fn new(incorrect_code: IC, system_blocked: SB) -> Self {
        Self {
            incorrect_code,
            system_blocked,
        }
    }

    /// Copy both flags onto their LEDs. Runs every tick.
    pub fn update(&mut self, state: &SharedState) {
        let _ = self
            .incorrect_code
            .set_state(PinState::from(state.incorrect_code()));
        let _ = self
            .system_blocked
            .set_state(PinState::from(state.system_blocked()));
    }
}
