//! In-memory TM1650
//!
//! Keeps the last byte written to each register. Used for host-side
//! simulation and tests; it can be armed to fail a write to exercise the
//! hardware fault paths.

use tm1650_core::traits::{Endpoint, HardwareSink};
use tm1650_core::{DigitPosition, DIGIT_COUNT};

/// Injected write failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WriteFailed(pub Endpoint);

/// Register-level model of a TM1650
#[derive(Debug, Clone, Default)]
pub struct VirtualDisplay {
    registers: [u8; Endpoint::COUNT],
    writes: usize,
    fail_next: Option<Endpoint>,
}

impl VirtualDisplay {
    const POWER_BIT: u8 = 0x01;
    const BRIGHTNESS_MASK: u8 = 0x70;

    /// Create a display with all registers zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Last byte written to an endpoint
    pub fn register(&self, endpoint: Endpoint) -> u8 {
        self.registers[endpoint.index()]
    }

    /// Digit registers, left to right
    pub fn digits(&self) -> [u8; DIGIT_COUNT] {
        DigitPosition::ALL.map(|position| self.register(Endpoint::Digit(position)))
    }

    /// Display enabled in the control register
    pub fn is_powered(&self) -> bool {
        self.register(Endpoint::Control) & Self::POWER_BIT != 0
    }

    /// Brightness bits of the control register
    pub fn brightness(&self) -> u8 {
        (self.register(Endpoint::Control) & Self::BRIGHTNESS_MASK) >> 4
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Fail the next write to `endpoint`
    pub fn fail_next_write(&mut self, endpoint: Endpoint) {
        self.fail_next = Some(endpoint);
    }
}

impl HardwareSink for VirtualDisplay {
    type Error = WriteFailed;

    fn write(&mut self, endpoint: Endpoint, value: u8) -> Result<(), Self::Error> {
        if self.fail_next == Some(endpoint) {
            self.fail_next = None;
            return Err(WriteFailed(endpoint));
        }
        self.registers[endpoint.index()] = value;
        self.writes += 1;
        Ok(())
    }
}
