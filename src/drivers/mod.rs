//! Peripheral drivers behind the `hal` traits.
//!
//! `bitmaps`, `matrix_keypad` and `glcd` are generic over `embedded-hal`
//! and build on the host; `edge` needs the nRF52840 GPIOTE.

pub mod bitmaps;
pub mod glcd;
pub mod matrix_keypad;

#[cfg(feature = "embedded")]
pub mod edge;
