//! Hardware sink trait
//!
//! The TM1650 exposes five single-byte registers: one system command
//! register and one register per digit. Each flush writes exactly one byte
//! to one of them.

use crate::state::{DigitPosition, DIGIT_COUNT};

/// A register on the display controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Endpoint {
    /// System command register (power, brightness)
    Control,
    /// Digit register at a position
    Digit(DigitPosition),
}

impl Endpoint {
    /// Number of endpoints
    pub const COUNT: usize = DIGIT_COUNT + 1;

    /// All endpoints: control first, then digits left to right
    pub const ALL: [Self; Self::COUNT] = [
        Endpoint::Control,
        Endpoint::Digit(DigitPosition::ALL[0]),
        Endpoint::Digit(DigitPosition::ALL[1]),
        Endpoint::Digit(DigitPosition::ALL[2]),
        Endpoint::Digit(DigitPosition::ALL[3]),
    ];

    /// Index into [`Endpoint::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Endpoint::Control => 0,
            Endpoint::Digit(position) => position.get() as usize,
        }
    }
}

/// Synchronous one-byte writer for display registers
///
/// Implementations own the bus and the endpoint addressing. A write either
/// completes or fails before returning.
pub trait HardwareSink {
    /// Error type for failed writes
    type Error;

    /// Write one byte to an endpoint
    fn write(&mut self, endpoint: Endpoint, value: u8) -> Result<(), Self::Error>;
}

impl<T: HardwareSink + ?Sized> HardwareSink for &mut T {
    type Error = T::Error;

    fn write(&mut self, endpoint: Endpoint, value: u8) -> Result<(), Self::Error> {
        (**self).write(endpoint, value)
    }
}
