//! Hardware abstraction traits
//!
//! These traits define the interface between the display engine and the
//! bus-specific implementations in `tm1650-drivers`.

pub mod sink;

pub use sink::{Endpoint, HardwareSink};
