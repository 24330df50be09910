//! Character to segment encoding
//!
//! Segment bits as laid out in the TM1650 digit registers:
//!
//! ```text
//!     A            0x01
//!   F   B      0x20    0x02
//!     G            0x40
//!   E   C      0x10    0x04
//!     D   DP       0x08    0x80
//! ```

/// Segment pattern for one digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segments(u8);

impl Segments {
    /// Decimal point
    pub const DECIMAL: u8 = 0b_1000_0000;

    /// No segments lit
    pub const BLANK: Self = Self(0);

    /// Raw register bits
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// The same pattern with the decimal point lit
    pub const fn with_decimal_point(self) -> Self {
        Self(self.0 | Self::DECIMAL)
    }

    /// Check if the decimal point bit is set
    pub const fn has_decimal_point(self) -> bool {
        self.0 & Self::DECIMAL != 0
    }
}

/// Encode one ASCII character
///
/// Returns `None` for characters outside the supported alphabet: space,
/// `! + - . / = ? [ \ ] _`, digits and letters. The decimal point bit is
/// never set here, so `.` encodes to a blank pattern; the layout lights the
/// dot itself.
pub const fn encode(c: u8) -> Option<Segments> {
    let bits = match c {
        // symbols
        b' ' => 0x00,
        b'!' => 0x6B,
        b'+' => 0x46,
        b'-' => 0x40,
        b'.' => 0x00,
        b'/' => 0x52,
        b'=' => 0x48,
        b'?' => 0x4B,
        b'[' => 0x39,
        b'\\' => 0x64,
        b']' => 0x0F,
        b'_' => 0x08,

        // digits
        b'0' => 0x3F,
        b'1' => 0x06,
        b'2' => 0x5B,
        b'3' => 0x4F,
        b'4' => 0x66,
        b'5' => 0x6D,
        b'6' => 0x7D,
        b'7' => 0x07,
        b'8' => 0x7F,
        b'9' => 0x6F,

        // upper case
        b'A' => 0x77,
        b'B' => 0x7F,
        b'C' => 0x39,
        b'D' => 0x1F,
        b'E' => 0x79,
        b'F' => 0x71,
        b'G' => 0x3D,
        b'H' => 0x76,
        b'I' => 0x30,
        b'J' => 0x1E,
        b'K' => 0x75,
        b'L' => 0x38,
        b'M' => 0x2B,
        b'N' => 0x37,
        b'O' => 0x3F,
        b'P' => 0x73,
        b'Q' => 0x6B,
        b'R' => 0x7B,
        b'S' => 0x6D,
        b'T' => 0x31,
        b'U' => 0x3E,
        b'V' => 0x2E,
        b'W' => 0x1D,
        b'X' => 0x49,
        b'Y' => 0x6A,
        b'Z' => 0x5B,

        // lower case, closest seven-segment shapes
        b'a' => 0x5F,
        b'b' => 0x7C,
        b'c' => 0x58,
        b'd' => 0x5E,
        b'e' => 0x79,
        b'f' => 0x71,
        b'g' => 0x3D,
        b'h' => 0x74,
        b'i' => 0x11,
        b'j' => 0x0D,
        b'k' => 0x69,
        b'l' => 0x30,
        b'm' => 0x55,
        b'n' => 0x54,
        b'o' => 0x5C,
        b'p' => 0x73,
        b'q' => 0x76,
        b'r' => 0x50,
        b's' => 0x2D,
        b't' => 0x78,
        b'u' => 0x1C,
        b'v' => 0x2A,
        b'w' => 0x6A,
        b'x' => 0x14,
        b'y' => 0x6E,
        b'z' => 0x1B,

        _ => return None,
    };
    Some(Segments(bits))
}

/// Check if a character can be shown
pub const fn is_supported(c: u8) -> bool {
    encode(c).is_some()
}
