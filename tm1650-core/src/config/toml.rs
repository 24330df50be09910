//! Minimal TOML reader for the service configuration
//!
//! Handles only the subset needed here and does not allocate:
//! - `[section]` headers
//! - `key = value` pairs: strings, decimal or `0x` integers, booleans
//! - flat integer arrays: `digits = [0x34, 0x35, 0x36, 0x37]`
//! - comments (`# ...`), whole-line or trailing
//!
//! ```toml
//! [service]
//! name = "tm1650"
//! mount = "/mnt"
//!
//! [i2c]
//! bus = 1
//! control = 0x24
//! digits = [0x34, 0x35, 0x36, 0x37]
//!
//! [display]
//! brightness = 2
//! legacy_cls_brightness = false
//! ```

use heapless::String;

use super::types::{DeviceConfig, MAX_I2C_ADDRESS};
use super::ConfigError;
use crate::state::{Brightness, DIGIT_COUNT};

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Service,
    I2c,
    Display,
}

/// Parse TOML text into a [`DeviceConfig`]
///
/// Keys that are not given keep their default value.
pub fn parse_config(input: &str) -> Result<DeviceConfig, ConfigError> {
    let mut config = DeviceConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = parse_section_header(header)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ConfigError::Syntax)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ConfigError> {
    match header.trim() {
        "service" => Ok(Section::Service),
        "i2c" => Ok(Section::I2c),
        "display" => Ok(Section::Display),
        _ => Err(ConfigError::InvalidSection),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DeviceConfig,
) -> Result<(), ConfigError> {
    match (section, key) {
        (Section::Service, "name") => config.service.name = parse_string(value)?,
        (Section::Service, "mount") => config.service.mount = parse_string(value)?,

        (Section::I2c, "bus") => config.i2c.bus = parse_u8(value)?,
        (Section::I2c, "control") => config.i2c.control = parse_address(value)?,
        (Section::I2c, "digits") => config.i2c.digits = parse_addresses(value)?,

        (Section::Display, "brightness") => {
            config.display.brightness =
                Brightness::new(parse_u8(value)?).ok_or(ConfigError::OutOfRange)?;
        }
        (Section::Display, "legacy_cls_brightness") => {
            config.display.legacy_cls_brightness = parse_bool(value)?;
        }

        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

/// Remove a trailing comment, ignoring `#` inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a quoted string value
fn parse_string<const N: usize>(value: &str) -> Result<String<N>, ConfigError> {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ConfigError::InvalidValue)?;
    String::try_from(inner).map_err(|_| ConfigError::TooLong)
}

/// Parse a decimal or `0x` hexadecimal integer
fn parse_int(value: &str) -> Result<u32, ConfigError> {
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|_| ConfigError::InvalidValue)
}

fn parse_u8(value: &str) -> Result<u8, ConfigError> {
    u8::try_from(parse_int(value)?).map_err(|_| ConfigError::OutOfRange)
}

/// Parse a 7-bit bus address
fn parse_address(value: &str) -> Result<u8, ConfigError> {
    let address = parse_u8(value)?;
    if address > MAX_I2C_ADDRESS {
        return Err(ConfigError::OutOfRange);
    }
    Ok(address)
}

/// Parse an array of exactly one address per digit
fn parse_addresses(value: &str) -> Result<[u8; DIGIT_COUNT], ConfigError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ConfigError::InvalidValue)?;

    let mut addresses = [0u8; DIGIT_COUNT];
    let mut count = 0;
    for item in inner.split(',').map(str::trim) {
        // Allow a trailing comma
        if item.is_empty() {
            continue;
        }
        let slot = addresses.get_mut(count).ok_or(ConfigError::InvalidValue)?;
        *slot = parse_address(item)?;
        count += 1;
    }

    if count != DIGIT_COUNT {
        return Err(ConfigError::InvalidValue);
    }
    Ok(addresses)
}

fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config(""), Ok(DeviceConfig::default()));
        assert_eq!(parse_config("# nothing\n\n"), Ok(DeviceConfig::default()));
    }

    #[test]
    fn test_full_config() {
        let input = r#"
            # display on the second bus
            [service]
            name = "clock"      # shows up as /mnt/clock
            mount = "/n/led"

            [i2c]
            bus = 2
            control = 0x24
            digits = [0x34, 0x35, 0x36, 0x37]

            [display]
            brightness = 3
            legacy_cls_brightness = true
        "#;

        let config = parse_config(input).unwrap();
        assert_eq!(config.service.name.as_str(), "clock");
        assert_eq!(config.service.mount.as_str(), "/n/led");
        assert_eq!(config.i2c.bus, 2);
        assert_eq!(config.i2c.control, 0x24);
        assert_eq!(config.i2c.digits, [0x34, 0x35, 0x36, 0x37]);
        assert_eq!(config.display.brightness.level(), 3);
        assert!(config.display.legacy_cls_brightness);
    }

    #[test]
    fn test_hash_inside_string() {
        let config = parse_config("[service]\nname = \"led#1\" # comment").unwrap();
        assert_eq!(config.service.name.as_str(), "led#1");
    }

    #[test]
    fn test_decimal_addresses() {
        let config = parse_config("[i2c]\ndigits = [52, 53, 54, 55,]").unwrap();
        assert_eq!(config.i2c.digits, [0x34, 0x35, 0x36, 0x37]);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_config("[motor]"), Err(ConfigError::InvalidSection));
        assert_eq!(parse_config("name = \"x\""), Err(ConfigError::UnknownKey));
        assert_eq!(
            parse_config("[service]\ncolor = \"red\""),
            Err(ConfigError::UnknownKey)
        );
        assert_eq!(parse_config("[service]\nname"), Err(ConfigError::Syntax));
        assert_eq!(
            parse_config("[service]\nname = tm1650"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[display]\nbrightness = 8"),
            Err(ConfigError::OutOfRange)
        );
        assert_eq!(
            parse_config("[display]\nlegacy_cls_brightness = yes"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[i2c]\ncontrol = 0x80"),
            Err(ConfigError::OutOfRange)
        );
        assert_eq!(
            parse_config("[i2c]\ndigits = [0x34, 0x35, 0x36]"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[i2c]\ndigits = [1, 2, 3, 4, 5]"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(parse_config("[i2c]\nbus = 300"), Err(ConfigError::OutOfRange));
    }

    #[test]
    fn test_name_too_long() {
        let input = "[service]\nname = \"0123456789012345678901234567890123\"";
        assert_eq!(parse_config(input), Err(ConfigError::TooLong));
    }
}
