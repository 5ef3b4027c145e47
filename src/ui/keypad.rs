//! Keypad input adapter: one released key per tick at most.

use crate::hal::MatrixKeypad;

pub struct KeypadInput<K> {
    keypad: K,
}

impl<K: MatrixKeypad> KeypadInput<K> {
    pub fn new(keypad: K) -> Self {
        Self { keypad }
    }

    /// Initialise the keypad primitive for the given tick period.
    pub fn init(&mut self, tick_ms: u32) {
        self.keypad.init(tick_ms);
    }

    /// Advance the keypad one tick. A missed edge is simply not reported.
    pub fn poll(&mut self) -> Option<char> {
        self.keypad.update()
    }
}
