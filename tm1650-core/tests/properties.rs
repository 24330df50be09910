//! Property tests for the encoder, layout and command parser

use proptest::prelude::*;

use tm1650_core::command::{parse_command, Command};
use tm1650_core::glyph::{encode, is_supported};
use tm1650_core::layout::{layout_text, LINE_TERMINATOR};
use tm1650_core::state::ERROR_PATTERN;
use tm1650_core::status::format_display;
use tm1650_core::{DigitSlot, DisplayFault, DIGIT_COUNT};

/// Bytes the display can show
fn supported_byte() -> impl Strategy<Value = u8> {
    any::<u8>().prop_filter("supported", |&c| is_supported(c))
}

proptest! {
    #[test]
    fn test_encode_is_deterministic(c in any::<u8>()) {
        prop_assert_eq!(encode(c), encode(c));
    }

    #[test]
    fn test_encode_never_sets_decimal_point(c in supported_byte()) {
        let segments = encode(c).unwrap();
        prop_assert!(!segments.has_decimal_point());
    }

    #[test]
    fn test_layout_is_right_justified(input in proptest::collection::vec(any::<u8>(), 0..12)) {
        let layout = layout_text(&input);
        let occupied = layout.slots.iter().filter(|s| s.is_occupied()).count();
        prop_assert!(occupied <= DIGIT_COUNT);

        // Occupied slots form a contiguous run ending at position 4
        let first = DIGIT_COUNT - occupied;
        for (i, slot) in layout.slots.iter().enumerate() {
            prop_assert_eq!(slot.is_occupied(), i >= first);
        }
    }

    #[test]
    fn test_layout_is_idempotent(input in proptest::collection::vec(any::<u8>(), 0..12)) {
        prop_assert_eq!(layout_text(&input), layout_text(&input));
    }

    #[test]
    fn test_faults_render_error_pattern(input in proptest::collection::vec(any::<u8>(), 0..12)) {
        let layout = layout_text(&input);
        if layout.fault.is_some() {
            prop_assert_eq!(layout.slots, ERROR_PATTERN);
        }
    }

    #[test]
    fn test_short_supported_text_round_trips(
        input in proptest::collection::vec(
            supported_byte().prop_filter("no dot", |&c| c != b'.'),
            0..=DIGIT_COUNT,
        )
    ) {
        let layout = layout_text(&input);
        prop_assert_eq!(layout.fault, None);

        let mut expected = Vec::new();
        for &c in &input {
            expected.push(c);
            expected.push(b'\n');
        }
        let record = format_display(&layout.slots);
        prop_assert_eq!(record.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_five_plain_glyphs_overflow(
        input in proptest::collection::vec(
            supported_byte().prop_filter("no dot", |&c| c != b'.'),
            DIGIT_COUNT + 1..10,
        )
    ) {
        prop_assert_eq!(layout_text(&input).fault, Some(DisplayFault::Overflow));
    }

    #[test]
    fn test_text_after_line_feed_is_ignored(
        head in proptest::collection::vec(supported_byte(), 0..=DIGIT_COUNT),
        tail in proptest::collection::vec(any::<u8>(), 0..8),
    ) {
        let mut input = head.clone();
        input.push(LINE_TERMINATOR);
        input.extend_from_slice(&tail);
        prop_assert_eq!(layout_text(&input), layout_text(&head));
    }

    #[test]
    fn test_unsupported_byte_faults(
        prefix in proptest::collection::vec(
            supported_byte().prop_filter("no dot", |&c| c != b'.'),
            0..DIGIT_COUNT,
        ),
        bad in any::<u8>().prop_filter("unsupported", |&c| !is_supported(c) && c != LINE_TERMINATOR),
    ) {
        let mut input = prefix;
        input.push(bad);
        prop_assert_eq!(
            layout_text(&input).fault,
            Some(DisplayFault::UnsupportedCharacter(bad))
        );
    }

    #[test]
    fn test_parse_command_never_panics(input in proptest::collection::vec(any::<u8>(), 0..32)) {
        let _ = parse_command(&input);
    }

    #[test]
    fn test_brightness_argument_parses(level in 0i32..1000, spaces in 0usize..4) {
        let mut input = b"brightness".to_vec();
        input.extend(core::iter::repeat(b' ').take(spaces));
        input.extend_from_slice(level.to_string().as_bytes());
        prop_assert_eq!(parse_command(&input).0, Command::Brightness(level));
    }
}

#[test]
fn test_filler_never_appears_in_display_record() {
    let slots = [DigitSlot::Filler; DIGIT_COUNT];
    assert!(format_display(&slots).is_empty());
}
