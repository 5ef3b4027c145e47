//! State shared between the UI core and the code validator.
//!
//! Replaces ambient global flags with one struct passed by `&mut` to both
//! sides. Writers per field:
//!
//! | field            | UI core (inside `update`)   | validator (between ticks) |
//! |------------------|-----------------------------|---------------------------|
//! | `code`           | appends / resets            | reads                     |
//! | `code_complete`  | sets, clears on `#` reset   | clears after checking     |
//! | `incorrect_code` | clears on `#` reset         | sets on mismatch          |
//! | `system_blocked` | reads                       | sets                      |
//!
//! Edge handlers never see this struct.

use crate::config::CODE_NUMBER_OF_KEYS;

/// Fixed-capacity buffer of entered code keys.
///
/// The length resets to zero once the buffer fills, but the keys stay in
/// place so the validator can read the completed code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBuffer {
    keys: [char; CODE_NUMBER_OF_KEYS],
    len: usize,
}

impl CodeBuffer {
    pub const fn new() -> Self {
        Self {
            keys: ['\0'; CODE_NUMBER_OF_KEYS],
            len: 0,
        }
    }

    /// Number of keys entered towards the current code.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All key slots, including those of the last completed code.
    pub fn keys(&self) -> &[char; CODE_NUMBER_OF_KEYS] {
        &self.keys
    }

    /// Append a key. Returns `true` when this key completed the code, in
    /// which case the length is back at zero.
    pub(crate) fn push(&mut self, key: char) -> bool {
        self.keys[self.len] = key;
        self.len += 1;
        if self.len >= CODE_NUMBER_OF_KEYS {
            self.len = 0;
            return true;
        }
        false
    }

    pub(crate) fn reset(&mut self) {
        self.len = 0;
    }
}

impl Default for CodeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Flags and code buffer exchanged with the validator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SharedState {
    incorrect_code: bool,
    system_blocked: bool,
    code_complete: bool,
    code: CodeBuffer,
}

impl SharedState {
    /// All flags off, empty code.
    pub const fn new() -> Self {
        Self {
            incorrect_code: false,
            system_blocked: false,
            code_complete: false,
            code: CodeBuffer::new(),
        }
    }

    pub fn incorrect_code(&self) -> bool {
        self.incorrect_code
    }

    pub fn set_incorrect_code(&mut self, state: bool) {
        self.incorrect_code = state;
    }

    pub fn system_blocked(&self) -> bool {
        self.system_blocked
    }

    pub fn set_system_blocked(&mut self, state: bool) {
        self.system_blocked = state;
    }

    /// `true` once a full code has been entered and not yet consumed.
    pub fn code_complete(&self) -> bool {
        self.code_complete
    }

    pub fn set_code_complete(&mut self, state: bool) {
        self.code_complete = state;
    }

    pub fn code(&self) -> &CodeBuffer {
        &self.code
    }

    pub(crate) fn code_mut(&mut self) -> &mut CodeBuffer {
        &mut self.code
    }
}
