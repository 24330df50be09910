//! Configuration type definitions
//!
//! With the `serde` feature the configuration can be stored as postcard
//! binary data.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::state::{Brightness, DIGIT_COUNT};
use crate::traits::Endpoint;

/// Maximum service name length
pub const MAX_NAME_LEN: usize = 32;

/// Maximum mount point length
pub const MAX_PATH_LEN: usize = 64;

/// Default service name, also the name of the service directory
pub const DEFAULT_SERVICE_NAME: &str = "tm1650";

/// Default mount point
pub const DEFAULT_MOUNT_POINT: &str = "/mnt";

/// Default bus number
pub const DEFAULT_BUS: u8 = 1;

/// Default address of the TM1650 system command register
pub const DEFAULT_CONTROL_ADDRESS: u8 = 0x24;

/// Default addresses of the TM1650 digit registers, left to right
pub const DEFAULT_DIGIT_ADDRESSES: [u8; DIGIT_COUNT] = [0x34, 0x35, 0x36, 0x37];

/// Highest 7-bit I2C address
pub const MAX_I2C_ADDRESS: u8 = 0x7F;

/// Where and under which name the files are served
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServiceConfig {
    /// Service name; the files live in a directory of this name
    pub name: String<MAX_NAME_LEN>,
    /// Mount point
    pub mount: String<MAX_PATH_LEN>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: String::try_from(DEFAULT_SERVICE_NAME).unwrap_or_default(),
            mount: String::try_from(DEFAULT_MOUNT_POINT).unwrap_or_default(),
        }
    }
}

/// Bus addressing of the five display registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct I2cConfig {
    /// Bus number
    pub bus: u8,
    /// 7-bit address of the control register
    pub control: u8,
    /// 7-bit addresses of the digit registers, left to right
    pub digits: [u8; DIGIT_COUNT],
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            bus: DEFAULT_BUS,
            control: DEFAULT_CONTROL_ADDRESS,
            digits: DEFAULT_DIGIT_ADDRESSES,
        }
    }
}

impl I2cConfig {
    /// Address of an endpoint
    pub const fn address(&self, endpoint: Endpoint) -> u8 {
        match endpoint {
            Endpoint::Control => self.control,
            Endpoint::Digit(position) => self.digits[position.index()],
        }
    }
}

/// Engine behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Brightness set at initialization
    pub brightness: Brightness,
    /// After `cls`, parse the rest of the write as a brightness value
    ///
    /// Matches the behavior of the first generation of this service, where
    /// `cls` was always followed by a brightness update (to 0 when no value
    /// is given).
    pub legacy_cls_brightness: bool,
}

/// Complete service configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    pub service: ServiceConfig,
    pub i2c: I2cConfig,
    pub display: DisplayConfig,
}

#[cfg(feature = "serde")]
impl DeviceConfig {
    /// Serialize as postcard into `buf`, returning the used part
    pub fn to_postcard<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], super::ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| super::ConfigError::Encoding)
    }

    /// Deserialize from postcard bytes
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, super::ConfigError> {
        let config: Self =
            postcard::from_bytes(bytes).map_err(|_| super::ConfigError::Encoding)?;
        if Brightness::new(config.display.brightness.level()).is_none() {
            return Err(super::ConfigError::OutOfRange);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DigitPosition;

    #[test]
    fn test_defaults() {
        let config = DeviceConfig::default();
        assert_eq!(config.service.name.as_str(), "tm1650");
        assert_eq!(config.service.mount.as_str(), "/mnt");
        assert_eq!(config.i2c.bus, 1);
        assert_eq!(config.display.brightness.level(), 0);
        assert!(!config.display.legacy_cls_brightness);
    }

    #[test]
    fn test_endpoint_addresses() {
        let i2c = I2cConfig::default();
        assert_eq!(i2c.address(Endpoint::Control), 0x24);
        assert_eq!(i2c.address(Endpoint::Digit(DigitPosition::ALL[0])), 0x34);
        assert_eq!(i2c.address(Endpoint::Digit(DigitPosition::ALL[3])), 0x37);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_postcard_storage() {
        let mut config = DeviceConfig::default();
        config.display.brightness = Brightness::MAX;
        config.i2c.control = 0x70;

        let mut buf = [0u8; 128];
        let bytes = config.to_postcard(&mut buf).unwrap();
        assert_eq!(DeviceConfig::from_postcard(bytes), Ok(config));
    }
}
