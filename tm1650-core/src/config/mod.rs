//! Service configuration
//!
//! Board-agnostic configuration: service naming, bus addressing and engine
//! behavior. Parsed from a TOML subset or stored as postcard binary data.

pub mod toml;
pub mod types;

pub use self::toml::parse_config;
pub use types::*;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Line is neither a section header nor `key = value`
    Syntax,
    /// Unknown section header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Value has the wrong type or shape
    InvalidValue,
    /// Numeric value outside its accepted range
    OutOfRange,
    /// String longer than its field
    TooLong,
    /// Binary encoding or decoding failed
    Encoding,
}
