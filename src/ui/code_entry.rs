//! Disarm-code entry.
//!
//! Keys are accepted only while the alarm is active and the system is not
//! blocked. Once the validator latches `incorrect_code`, every key except
//! `#` is ignored; two `#` releases clear the lock and start over.

use crate::config::{CODE_RESET_KEY, CODE_RESET_PRESSES};
use crate::state::SharedState;

/// Where code entry stands, derived from the shared flags each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryState {
    /// Accepting keys towards a code.
    Collecting,
    /// A full code is waiting for the validator. Keys still accumulate.
    Complete,
    /// Last code was wrong; only the `#` reset gesture is accepted.
    LockedIncorrect,
}

impl EntryState {
    pub fn of(state: &SharedState) -> Self {
        if state.incorrect_code() {
            EntryState::LockedIncorrect
        } else if state.code_complete() {
            EntryState::Complete
        } else {
            EntryState::Collecting
        }
    }
}

#[derive(Default)]
pub struct CodeEntry {
    /// Reset-key releases seen while locked.
    reset_presses: u8,
}

impl CodeEntry {
    pub const fn new() -> Self {
        Self { reset_presses: 0 }
    }

    /// Feed this tick's key event.
    pub fn process(&mut self, key: Option<char>, alarm_active: bool, state: &mut SharedState) {
        let Some(key) = key else {
            return;
        };

        if !alarm_active || state.system_blocked() {
            return;
        }

        match EntryState::of(state) {
            EntryState::Collecting | EntryState::Complete => {
                if state.code_mut().push(key) {
                    info!("Code entry: code complete");
                    state.set_code_complete(true);
                }
            }
            EntryState::LockedIncorrect => {
                if key != CODE_RESET_KEY {
                    return;
                }
                self.reset_presses += 1;
                if self.reset_presses >= CODE_RESET_PRESSES {
                    info!("Code entry: incorrect-code lock cleared");
                    self.reset_presses = 0;
                    state.code_mut().reset();
                    state.set_code_complete(false);
                    state.set_incorrect_code(false);
                }
            }
        }
    }

    /// Reset-key releases counted towards clearing the lock.
    pub fn reset_presses(&self) -> u8 {
        self.reset_presses
    }
}
