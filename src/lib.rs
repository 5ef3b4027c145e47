//! User-interaction layer of a fire-alarm controller.
//!
//! The pure logic modules (code entry, display state machine, keypad
//! debouncing, validator) and the SSD1306 adapter build for the host so
//! they can be tested without hardware:
//!
//! Usage: `cargo test --lib` / `cargo test`
//!
//! The nRF52840 binary (`main.rs`) needs `--features embedded`, which also
//! compiles the nRF adapters in `board` and `drivers::edge`.

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

pub mod alarm;
pub mod config;
pub mod drivers;
pub mod error;
pub mod hal;
pub mod sensors;
pub mod state;
pub mod ui;

#[cfg(feature = "embedded")]
pub mod board;

pub use alarm::FireAlarm;
pub use error::Error;
pub use state::{CodeBuffer, SharedState};
pub use ui::UserInterface;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
