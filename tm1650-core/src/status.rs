//! Status records returned by reads
//!
//! The control record is fixed width:
//!
//! ```text
//! offset  0 1 2 3 4 5 6 7 8 9
//!         o n _ _ _ _ _ _ 5 \n
//!         o f f _ _ _ _ _ 0 \n
//! ```
//!
//! The display record is one line per occupied slot: the character, a `.`
//! if the slot's decimal point is lit, and a line feed.

use heapless::Vec;

use crate::state::{ControlRegister, DigitSlot, DIGIT_COUNT};

/// Length of the control record
pub const CONTROL_RECORD_LEN: usize = 10;

/// Offset of the brightness digit in the control record
pub const BRIGHTNESS_COLUMN: usize = 8;

/// Longest display record: character, dot and line feed per digit
pub const DISPLAY_RECORD_CAPACITY: usize = DIGIT_COUNT * 3;

/// Control status line
pub type ControlRecord = [u8; CONTROL_RECORD_LEN];

/// Display status lines
pub type DisplayRecord = Vec<u8, DISPLAY_RECORD_CAPACITY>;

const PAD: u8 = b' ';
const NEWLINE: u8 = b'\n';

/// Render the control register
pub fn format_control(control: &ControlRegister) -> ControlRecord {
    let mut out = [PAD; CONTROL_RECORD_LEN];
    let label: &[u8] = if control.powered { b"on" } else { b"off" };
    out[..label.len()].copy_from_slice(label);
    out[BRIGHTNESS_COLUMN] = b'0' + control.brightness.level();
    out[CONTROL_RECORD_LEN - 1] = NEWLINE;
    out
}

/// Render the occupied digit slots
pub fn format_display(slots: &[DigitSlot; DIGIT_COUNT]) -> DisplayRecord {
    let mut out = Vec::new();
    for glyph in slots.iter().filter_map(DigitSlot::glyph) {
        // Capacity covers three bytes per slot
        let _ = out.push(glyph.character);
        if glyph.dot && glyph.character != b'.' {
            let _ = out.push(b'.');
        }
        let _ = out.push(NEWLINE);
    }
    out
}
