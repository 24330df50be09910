//! Board-agnostic display engine for TM1650 4-digit LED displays
//!
//! This crate contains everything between a client request and the bytes
//! written to the display controller:
//!
//! - Glyph encoding (ASCII to seven-segment patterns)
//! - Display state (control register and four digit slots)
//! - Text layout (dot merging, right-justification, error pattern)
//! - Control command parsing
//! - Status records for reads
//! - The hardware sink trait implemented by `tm1650-drivers`
//! - Configuration types and parser

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod glyph;
pub mod layout;
pub mod state;
pub mod status;
pub mod traits;

pub use controller::{DisplayController, Outcome};
pub use error::{DisplayFault, FlushError};
pub use state::{Brightness, DigitPosition, DigitSlot, DisplayState, DIGIT_COUNT};
pub use traits::{Endpoint, HardwareSink};
