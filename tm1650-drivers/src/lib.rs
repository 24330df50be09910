//! Hardware sink implementations
//!
//! This crate provides concrete implementations of the sink trait defined
//! in tm1650-core:
//!
//! - [`I2cSink`]: TM1650 on any `embedded-hal` 1.0 I2C bus
//! - [`VirtualDisplay`]: in-memory registers for simulation and tests

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;
pub mod virtual_display;

pub use i2c::{DeviceUnavailable, I2cSink};
pub use virtual_display::{VirtualDisplay, WriteFailed};
