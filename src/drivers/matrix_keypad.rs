//! 4×4 matrix keypad with tick-driven debouncing.
//!
//! Rows are driven outputs, columns are pulled-up inputs. A scan drives one
//! row low at a time and reports the first column that reads low.
//!
//! The debounce FSM runs once per tick:
//!
//! ```text
//! Scanning ──key seen──▶ Debounce ──same key after KEYPAD_DEBOUNCE_MS──▶ HoldPressed
//!    ▲                      │                                              │
//!    └──────other key───────┘◀──────────────released / changed─────────────┘
//! ```
//!
//! A key is reported once, on the tick it is released from `HoldPressed`.

use crate::config::{KEYPAD_COLS, KEYPAD_DEBOUNCE_MS, KEYPAD_LAYOUT, KEYPAD_ROWS};
use crate::error::Error;
use crate::hal::MatrixKeypad;
use embedded_hal::digital::{InputPin, OutputPin};

/// Source of raw (undebounced) key readings.
pub trait KeyMatrix {
    /// Return the key currently held down, if any.
    fn scan(&mut self) -> Result<Option<char>, Error>;
}

/// Row/column pin matrix.
pub struct PinMatrix<R, C> {
    rows: [R; KEYPAD_ROWS],
    cols: [C; KEYPAD_COLS],
}

impl<R: OutputPin, C: InputPin> PinMatrix<R, C> {
    pub fn new(rows: [R; KEYPAD_ROWS], cols: [C; KEYPAD_COLS]) -> Self {
        Self { rows, cols }
    }

    fn release_rows(&mut self) -> Result<(), Error> {
        for row in self.rows.iter_mut() {
            row.set_high().map_err(|_| Error::Keypad)?;
        }
        Ok(())
    }
}

impl<R: OutputPin, C: InputPin> KeyMatrix for PinMatrix<R, C> {
    fn scan(&mut self) -> Result<Option<char>, Error> {
        for r in 0..KEYPAD_ROWS {
            self.release_rows()?;
            self.rows[r].set_low().map_err(|_| Error::Keypad)?;

            for c in 0..KEYPAD_COLS {
                if self.cols[c].is_low().map_err(|_| Error::Keypad)? {
                    return Ok(Some(KEYPAD_LAYOUT[r][c]));
                }
            }
        }
        Ok(None)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum DebounceState {
    Scanning,
    Debounce,
    HoldPressed,
}

/// Debounced keypad reporting key releases.
pub struct DebouncedKeypad<M> {
    matrix: M,
    state: DebounceState,
    last_key: Option<char>,
    debounce_ms: u32,
    tick_ms: u32,
}

impl<M: KeyMatrix> DebouncedKeypad<M> {
    pub fn new(matrix: M) -> Self {
        Self {
            matrix,
            state: DebounceState::Scanning,
            last_key: None,
            debounce_ms: 0,
            tick_ms: 0,
        }
    }
}

impl<M: KeyMatrix> MatrixKeypad for DebouncedKeypad<M> {
    fn init(&mut self, tick_ms: u32) {
        self.tick_ms = tick_ms;
        self.state = DebounceState::Scanning;
        self.last_key = None;
        self.debounce_ms = 0;
    }

    fn update(&mut self) -> Option<char> {
        let detected = match self.matrix.scan() {
            Ok(key) => key,
            Err(e) => {
                warn!("Keypad scan failed: {:?}", e);
                None
            }
        };

        let mut released = None;

        match self.state {
            DebounceState::Scanning => {
                if detected.is_some() {
                    self.last_key = detected;
                    self.debounce_ms = 0;
                    self.state = DebounceState::Debounce;
                }
            }
            DebounceState::Debounce => {
                if self.debounce_ms >= KEYPAD_DEBOUNCE_MS {
                    self.state = if detected == self.last_key {
                        DebounceState::HoldPressed
                    } else {
                        DebounceState::Scanning
                    };
                }
                self.debounce_ms += self.tick_ms;
            }
            DebounceState::HoldPressed => {
                if detected != self.last_key {
                    if detected.is_none() {
                        released = self.last_key;
                        debug!("Keypad: released {:?}", released);
                    }
                    self.state = DebounceState::Scanning;
                }
            }
        }

        released
    }
}
