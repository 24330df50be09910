//! In-memory model of the display
//!
//! The display is one control register plus four digit slots. Slot
//! positions are numbered 1..=4 from the leftmost physical digit.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::DisplayFault;
use crate::glyph::{encode, Segments};

/// Number of digit positions on the display
pub const DIGIT_COUNT: usize = 4;

/// Brightness level (0-7)
///
/// Level 0 is the register's default after power-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Brightness(u8);

impl Brightness {
    /// Highest accepted level
    pub const MAX: Self = Self(7);

    /// Create a brightness level, `None` if above [`Brightness::MAX`]
    pub const fn new(level: u8) -> Option<Self> {
        if level <= Self::MAX.0 {
            Some(Self(level))
        } else {
            None
        }
    }

    /// The level as a number
    pub const fn level(self) -> u8 {
        self.0
    }
}

impl TryFrom<i32> for Brightness {
    type Error = DisplayFault;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(DisplayFault::InvalidBrightness(value))
    }
}

/// The TM1650 system command register
///
/// ```text
/// B7 B6 B5 B4 B3 B2 B1 B0
///  x [brightness] x  x  x  power
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlRegister {
    /// Display on/off
    pub powered: bool,
    /// Brightness level
    pub brightness: Brightness,
}

impl ControlRegister {
    const POWER_BIT: u8 = 0x01;
    const BRIGHTNESS_SHIFT: u8 = 4;

    /// Create a register value
    pub const fn new(powered: bool, brightness: Brightness) -> Self {
        Self {
            powered,
            brightness,
        }
    }

    /// Encode as the byte written to the control endpoint
    pub const fn to_byte(self) -> u8 {
        let power = if self.powered { Self::POWER_BIT } else { 0 };
        (self.brightness.0 << Self::BRIGHTNESS_SHIFT) | power
    }
}

/// Position of a digit on the display (1 = leftmost)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitPosition(u8);

impl DigitPosition {
    /// All positions, left to right
    pub const ALL: [Self; DIGIT_COUNT] = [Self(1), Self(2), Self(3), Self(4)];

    /// Create a position from its 1-based number
    pub const fn new(position: u8) -> Option<Self> {
        if position >= 1 && position as usize <= DIGIT_COUNT {
            Some(Self(position))
        } else {
            None
        }
    }

    /// 1-based position number
    pub const fn get(self) -> u8 {
        self.0
    }

    /// 0-based index into the slot array
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }
}

/// A character drawn in a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph {
    /// Source character as written by the client
    pub character: u8,
    /// Encoded pattern, without the decimal point
    pub segments: Segments,
    /// Decimal point lit
    pub dot: bool,
}

impl Glyph {
    /// Byte written to the digit endpoint
    pub const fn to_byte(self) -> u8 {
        if self.dot {
            self.segments.with_decimal_point().bits()
        } else {
            self.segments.bits()
        }
    }
}

/// Content of one digit position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitSlot {
    /// Nothing drawn (distinct from a space glyph)
    #[default]
    Filler,
    /// A glyph occupies this position
    Glyph(Glyph),
}

impl DigitSlot {
    /// Check if a glyph occupies the slot
    pub const fn is_occupied(&self) -> bool {
        matches!(self, DigitSlot::Glyph(_))
    }

    /// The glyph in this slot, if any
    pub const fn glyph(&self) -> Option<&Glyph> {
        match self {
            DigitSlot::Glyph(glyph) => Some(glyph),
            DigitSlot::Filler => None,
        }
    }

    /// Byte written to the digit endpoint; filler is all segments off
    pub const fn to_byte(&self) -> u8 {
        match self {
            DigitSlot::Glyph(glyph) => glyph.to_byte(),
            DigitSlot::Filler => 0,
        }
    }
}

const fn error_slot(c: u8) -> DigitSlot {
    let segments = match encode(c) {
        Some(segments) => segments,
        None => Segments::BLANK,
    };
    DigitSlot::Glyph(Glyph {
        character: c,
        segments,
        dot: false,
    })
}

/// The "Err!" fallback shown on any rendered fault
pub const ERROR_PATTERN: [DigitSlot; DIGIT_COUNT] = [
    error_slot(b'E'),
    error_slot(b'r'),
    error_slot(b'r'),
    error_slot(b'!'),
];

/// Complete display state: control register and digit slots
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayState {
    /// Power and brightness
    pub control: ControlRegister,
    slots: [DigitSlot; DIGIT_COUNT],
}

impl DisplayState {
    /// Create a powered-off state with all slots empty
    pub const fn new(brightness: Brightness) -> Self {
        Self {
            control: ControlRegister::new(false, brightness),
            slots: [DigitSlot::Filler; DIGIT_COUNT],
        }
    }

    /// All slots, left to right
    pub fn slots(&self) -> &[DigitSlot; DIGIT_COUNT] {
        &self.slots
    }

    /// Slot at a position
    pub fn slot(&self, position: DigitPosition) -> DigitSlot {
        self.slots[position.index()]
    }

    /// Replace all slots at once
    pub fn set_slots(&mut self, slots: [DigitSlot; DIGIT_COUNT]) {
        self.slots = slots;
    }

    /// Set every slot to filler
    pub fn clear_digits(&mut self) {
        self.slots = [DigitSlot::Filler; DIGIT_COUNT];
    }

    /// Show "Err!" on the digits; the control register is untouched
    pub fn show_error_pattern(&mut self) {
        self.slots = ERROR_PATTERN;
    }

    /// Check if no slot is occupied
    pub fn is_blank(&self) -> bool {
        self.slots.iter().all(|slot| !slot.is_occupied())
    }
}
