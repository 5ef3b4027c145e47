//! Unified error type for fire-alarm-ui.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! The UI core itself never fails; these errors come from the hardware
//! adapters, which log them and keep running.

/// Top-level error type used by the hardware adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Keypad
    /// A keypad row or column pin could not be driven or read.
    Keypad,

    // Display
    /// I²C transaction to the display failed.
    Display,

    // Serial
    /// The console UART rejected a write.
    Serial,

    // Generic
    /// A formatted string did not fit its fixed-size buffer.
    Format,
}

// Convenience conversions

impl From<core::fmt::Error> for Error {
    fn from(_: core::fmt::Error) -> Self {
        Error::Format
    }
}
