//! Error types for the display engine

use crate::traits::Endpoint;

/// Faults that are rendered as "Err!" on the digits
///
/// These never reach the client that wrote the request; the engine
/// reports them so the caller can log them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayFault {
    /// Character outside the glyph alphabet
    UnsupportedCharacter(u8),
    /// More than four glyphs in one display write
    Overflow,
    /// Brightness value outside 0-7
    InvalidBrightness(i32),
    /// Control write matching no command keyword
    UnknownCommand,
}

/// A write to the hardware sink failed
///
/// Slots flushed before the failing endpoint keep their new value; the
/// rest of the hardware is stale until the next successful write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlushError<E> {
    /// Endpoint whose write failed
    pub endpoint: Endpoint,
    /// Error reported by the sink
    pub error: E,
}
