//! Control channel command parsing
//!
//! A command is the first keyword, in priority order, that is a prefix of
//! the input after leading whitespace. Matching is on the prefix only:
//! `onward` is `on`, `offset` is `off`.

/// Control commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Turn the display on
    On,
    /// Turn the display off
    Off,
    /// Clear all digits
    Cls,
    /// Set brightness; the value is not range checked here
    Brightness(i32),
    /// No keyword matched
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    On,
    Off,
    Cls,
    Brightness,
}

impl Keyword {
    /// Keywords in matching priority order
    const PRIORITY: [Keyword; 4] = [
        Keyword::On,
        Keyword::Off,
        Keyword::Cls,
        Keyword::Brightness,
    ];

    const fn text(self) -> &'static [u8] {
        match self {
            Keyword::On => b"on",
            Keyword::Off => b"off",
            Keyword::Cls => b"cls",
            Keyword::Brightness => b"brightness",
        }
    }
}

/// Parse a control write
///
/// Returns the command and the bytes following the matched keyword (empty
/// for an unknown command).
pub fn parse_command(input: &[u8]) -> (Command, &[u8]) {
    let input = skip_space(input);

    let Some((keyword, rest)) = Keyword::PRIORITY
        .iter()
        .find_map(|&k| input.strip_prefix(k.text()).map(|rest| (k, rest)))
    else {
        return (Command::Unknown, &[][..]);
    };

    let command = match keyword {
        Keyword::On => Command::On,
        Keyword::Off => Command::Off,
        Keyword::Cls => Command::Cls,
        Keyword::Brightness => Command::Brightness(parse_level(rest)),
    };
    (command, rest)
}

/// Parse a numeric argument
///
/// Leading whitespace and an optional sign are accepted, parsing stops at
/// the first non-digit, and input without digits is zero.
pub fn parse_level(input: &[u8]) -> i32 {
    let input = skip_space(input);
    let (negative, digits) = match input.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, input),
    };

    let magnitude = digits
        .iter()
        .take_while(|c| c.is_ascii_digit())
        .fold(0i32, |acc, &c| {
            acc.saturating_mul(10).saturating_add(i32::from(c - b'0'))
        });

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Whitespace as in C `isspace`: space, \t, \n, \v, \f, \r
fn is_space(c: u8) -> bool {
    c.is_ascii_whitespace() || c == 0x0B
}

fn skip_space(input: &[u8]) -> &[u8] {
    let start = input.iter().position(|&c| !is_space(c)).unwrap_or(input.len());
    &input[start..]
}
