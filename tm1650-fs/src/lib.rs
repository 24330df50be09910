//! File interface for a TM1650 display
//!
//! Serves one directory, named after the service, holding two files:
//!
//! - `ctl`: write `on`, `off`, `cls` or `brightness N`; read the power
//!   state and brightness
//! - `display`: write up to four characters; read back what is shown
//!
//! Both files are exclusive-open. Requests are dispatched one at a time
//! through [`DeviceFs`], which maps them onto a
//! [`tm1650_core::DisplayController`].

#![no_std]
#![deny(unsafe_code)]

pub mod file;
pub mod server;

pub use file::{DevFile, FileInfo, Handle, Node};
pub use server::{DeviceFs, FsError};
