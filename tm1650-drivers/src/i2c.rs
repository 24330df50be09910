//! TM1650 over an I2C bus
//!
//! The TM1650 answers on five fixed addresses instead of using register
//! offsets: one for the system command register and one per digit. Every
//! flush is a single-byte write to one of them.

use embedded_hal::i2c::I2c;
use tm1650_core::config::I2cConfig;
use tm1650_core::traits::{Endpoint, HardwareSink};

/// An endpoint did not acknowledge its address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceUnavailable<E> {
    /// Endpoint that failed to respond
    pub endpoint: Endpoint,
    /// Bus error for the probe
    pub error: E,
}

/// Hardware sink writing to a TM1650 on an I2C bus
pub struct I2cSink<I2C> {
    i2c: I2C,
    addresses: I2cConfig,
}

impl<I2C: I2c> I2cSink<I2C> {
    /// Create a sink using the configured addresses
    pub fn new(i2c: I2C, addresses: I2cConfig) -> Self {
        Self { i2c, addresses }
    }

    /// Check that every endpoint acknowledges its address
    ///
    /// Issues a zero-length write to each address, control first. Run this
    /// before serving; a missing endpoint means there is no display.
    pub fn probe(&mut self) -> Result<(), DeviceUnavailable<I2C::Error>> {
        for endpoint in Endpoint::ALL {
            let address = self.addresses.address(endpoint);
            self.i2c
                .write(address, &[])
                .map_err(|error| DeviceUnavailable { endpoint, error })?;
        }
        Ok(())
    }

    /// Configured addresses
    pub fn addresses(&self) -> &I2cConfig {
        &self.addresses
    }

    /// Give back the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> HardwareSink for I2cSink<I2C> {
    type Error = I2C::Error;

    fn write(&mut self, endpoint: Endpoint, value: u8) -> Result<(), Self::Error> {
        let address = self.addresses.address(endpoint);
        self.i2c.write(address, &[value])
    }
}
