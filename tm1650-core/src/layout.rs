//! Text layout for the digit slots
//!
//! Turns one line of client text into slot contents:
//!
//! 1. Scan up to the first line feed.
//! 2. Encode each character into the next free slot. A `.` following a
//!    glyph without a dot lights that glyph's decimal point instead of
//!    taking a slot of its own.
//! 3. An unsupported character, or a glyph that needs a fifth slot, replaces
//!    the whole line with the error pattern.
//! 4. Right-justify: shift the occupied slots until position 4 is occupied.

use crate::error::DisplayFault;
use crate::glyph::encode;
use crate::state::{DigitSlot, Glyph, DIGIT_COUNT, ERROR_PATTERN};

/// Scanning stops at this byte
pub const LINE_TERMINATOR: u8 = b'\n';

const DOT: u8 = b'.';

/// Result of laying out one line of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Layout {
    /// Slot contents, left to right
    pub slots: [DigitSlot; DIGIT_COUNT],
    /// Fault that replaced the text with the error pattern
    pub fault: Option<DisplayFault>,
}

/// Lay out a line of text
pub fn layout_text(input: &[u8]) -> Layout {
    let mut slots = [DigitSlot::Filler; DIGIT_COUNT];
    let mut placed = 0;
    let mut fault = None;

    for &c in input.iter().take_while(|&&c| c != LINE_TERMINATOR) {
        if c == DOT && merge_dot(&mut slots, placed) {
            continue;
        }

        let Some(slot) = slots.get_mut(placed) else {
            fault = Some(DisplayFault::Overflow);
            break;
        };

        let Some(segments) = encode(c) else {
            fault = Some(DisplayFault::UnsupportedCharacter(c));
            break;
        };

        *slot = DigitSlot::Glyph(Glyph {
            character: c,
            segments,
            // A dot in its own slot lights only the decimal point
            dot: c == DOT,
        });
        placed += 1;
    }

    if fault.is_some() {
        slots = ERROR_PATTERN;
    }
    right_justify(&mut slots);

    Layout { slots, fault }
}

/// Light the decimal point of the most recently placed glyph
///
/// Returns false when nothing is placed yet or that glyph already has a dot.
fn merge_dot(slots: &mut [DigitSlot; DIGIT_COUNT], placed: usize) -> bool {
    let last = placed.checked_sub(1).and_then(|i| slots.get_mut(i));
    match last {
        Some(DigitSlot::Glyph(glyph)) if !glyph.dot => {
            glyph.dot = true;
            true
        }
        _ => false,
    }
}

/// Shift slot contents right until the last position is occupied
///
/// Vacated positions on the left become filler. A display with no
/// occupied slot is left alone.
pub fn right_justify(slots: &mut [DigitSlot; DIGIT_COUNT]) {
    if !slots.iter().any(DigitSlot::is_occupied) {
        return;
    }
    while matches!(slots.last(), Some(DigitSlot::Filler)) {
        slots.rotate_right(1);
        slots[0] = DigitSlot::Filler;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn characters(layout: &Layout) -> [Option<(u8, bool)>; DIGIT_COUNT] {
        layout
            .slots
            .map(|slot| slot.glyph().map(|g| (g.character, g.dot)))
    }

    #[test]
    fn test_empty_input() {
        let layout = layout_text(b"");
        assert_eq!(layout.slots, [DigitSlot::Filler; DIGIT_COUNT]);
        assert_eq!(layout.fault, None);
    }

    #[test]
    fn test_four_characters_no_shift() {
        let layout = layout_text(b"abcd");
        assert_eq!(
            characters(&layout),
            [
                Some((b'a', false)),
                Some((b'b', false)),
                Some((b'c', false)),
                Some((b'd', false)),
            ]
        );
    }

    #[test]
    fn test_right_justified() {
        let layout = layout_text(b"42");
        assert_eq!(
            characters(&layout),
            [None, None, Some((b'4', false)), Some((b'2', false))]
        );
    }

    #[test]
    fn test_dot_merge() {
        let layout = layout_text(b"1.23");
        assert_eq!(layout.fault, None);
        assert_eq!(
            characters(&layout),
            [
                None,
                Some((b'1', true)),
                Some((b'2', false)),
                Some((b'3', false)),
            ]
        );
        assert_eq!(layout.slots[1].to_byte(), 0x86);
    }

    #[test]
    fn test_leading_dot_takes_slot() {
        let layout = layout_text(b".5");
        assert_eq!(
            characters(&layout),
            [None, None, Some((b'.', true)), Some((b'5', false))]
        );
        assert_eq!(layout.slots[2].to_byte(), 0x80);
    }

    #[test]
    fn test_double_dot_takes_second_slot() {
        let layout = layout_text(b"1..");
        assert_eq!(
            characters(&layout),
            [None, None, Some((b'1', true)), Some((b'.', true))]
        );
    }

    #[test]
    fn test_dot_after_standalone_dot() {
        let layout = layout_text(b"..");
        assert_eq!(
            characters(&layout),
            [None, None, Some((b'.', true)), Some((b'.', true))]
        );
    }

    #[test]
    fn test_trailing_dot_on_full_display_merges() {
        let layout = layout_text(b"12.34.");
        assert_eq!(layout.fault, None);
        assert_eq!(
            characters(&layout),
            [
                Some((b'1', false)),
                Some((b'2', true)),
                Some((b'3', false)),
                Some((b'4', true)),
            ]
        );
    }

    #[test]
    fn test_overflow() {
        let layout = layout_text(b"12345");
        assert_eq!(layout.fault, Some(DisplayFault::Overflow));
        assert_eq!(layout.slots, ERROR_PATTERN);
    }

    #[test]
    fn test_overflow_checked_before_encoding() {
        let layout = layout_text(b"1234@");
        assert_eq!(layout.fault, Some(DisplayFault::Overflow));
    }

    #[test]
    fn test_unsupported_character() {
        let layout = layout_text(b"1@");
        assert_eq!(layout.fault, Some(DisplayFault::UnsupportedCharacter(b'@')));
        assert_eq!(layout.slots, ERROR_PATTERN);
    }

    #[test]
    fn test_stops_at_line_feed() {
        let layout = layout_text(b"12\n345@");
        assert_eq!(layout.fault, None);
        assert_eq!(
            characters(&layout),
            [None, None, Some((b'1', false)), Some((b'2', false))]
        );
    }

    #[test]
    fn test_carriage_return_is_unsupported() {
        let layout = layout_text(b"12\r\n");
        assert_eq!(layout.fault, Some(DisplayFault::UnsupportedCharacter(b'\r')));
    }

    #[test]
    fn test_space_is_a_glyph() {
        let layout = layout_text(b"1 ");
        assert_eq!(
            characters(&layout),
            [None, None, Some((b'1', false)), Some((b' ', false))]
        );
    }

    #[test]
    fn test_right_justify_all_filler() {
        let mut slots = [DigitSlot::Filler; DIGIT_COUNT];
        right_justify(&mut slots);
        assert_eq!(slots, [DigitSlot::Filler; DIGIT_COUNT]);
    }
}
