//! Display controller
//!
//! Owns the [`DisplayState`] and the hardware sink. Every mutation is
//! followed by a flush of the registers it touched:
//!
//! - text writes, `cls` and rendered faults flush all four digits
//! - `on`, `off` and `brightness` flush the control register
//!
//! The controller has no internal locking; callers serialize access.

use crate::command::{parse_command, parse_level, Command};
use crate::config::DisplayConfig;
use crate::error::{DisplayFault, FlushError};
use crate::layout::layout_text;
use crate::state::{Brightness, DigitPosition, DisplayState};
use crate::status::{format_control, format_display, ControlRecord, DisplayRecord};
use crate::traits::{Endpoint, HardwareSink};

/// What a write did to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// The request was applied as written
    Applied,
    /// The request was rejected and "Err!" is shown instead
    Rendered(DisplayFault),
}

/// Engine for one TM1650 display
pub struct DisplayController<S> {
    sink: S,
    state: DisplayState,
    config: DisplayConfig,
}

impl<S: HardwareSink> DisplayController<S> {
    /// Create a controller; the hardware is untouched until [`Self::init`]
    pub fn new(sink: S, config: DisplayConfig) -> Self {
        Self {
            sink,
            state: DisplayState::new(config.brightness),
            config,
        }
    }

    /// Bring the display to its startup state
    ///
    /// Clears and flushes the digits, then powers on with the configured
    /// brightness and flushes the control register.
    pub fn init(&mut self) -> Result<(), FlushError<S::Error>> {
        self.state = DisplayState::new(self.config.brightness);
        self.flush_digits()?;
        self.state.control.powered = true;
        self.flush_control()?;

        #[cfg(feature = "defmt")]
        defmt::info!("display initialized: {}", self.state.control);

        Ok(())
    }

    /// Clear the digits and power off before the sink is released
    pub fn shutdown(&mut self) -> Result<(), FlushError<S::Error>> {
        self.state.clear_digits();
        self.flush_digits()?;
        self.state.control.powered = false;
        self.flush_control()?;

        #[cfg(feature = "defmt")]
        defmt::info!("display shut down");

        Ok(())
    }

    /// Give back the sink
    pub fn release(self) -> S {
        self.sink
    }

    /// Show a line of text on the digits
    pub fn set_text(&mut self, input: &[u8]) -> Result<Outcome, FlushError<S::Error>> {
        let layout = layout_text(input);
        self.state.set_slots(layout.slots);
        self.flush_digits()?;

        Ok(match layout.fault {
            Some(fault) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("display write rejected: {}", fault);
                Outcome::Rendered(fault)
            }
            None => Outcome::Applied,
        })
    }

    /// Apply a control write
    pub fn apply_command(&mut self, input: &[u8]) -> Result<Outcome, FlushError<S::Error>> {
        let (command, rest) = parse_command(input);

        #[cfg(feature = "defmt")]
        defmt::debug!("control command: {}", command);

        match command {
            Command::On => self.set_power(true),
            Command::Off => self.set_power(false),
            Command::Cls => {
                self.clear()?;
                if self.config.legacy_cls_brightness {
                    self.set_brightness(parse_level(rest))
                } else {
                    Ok(Outcome::Applied)
                }
            }
            Command::Brightness(level) => self.set_brightness(level),
            Command::Unknown => self.render_fault(DisplayFault::UnknownCommand),
        }
    }

    /// Render the control status record
    pub fn read_control(&self) -> ControlRecord {
        format_control(&self.state.control)
    }

    /// Render the display status lines
    pub fn read_display(&self) -> DisplayRecord {
        format_display(self.state.slots())
    }

    /// Current state
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Engine configuration
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// The hardware sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the hardware sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn set_power(&mut self, powered: bool) -> Result<Outcome, FlushError<S::Error>> {
        self.state.control.powered = powered;
        self.flush_control()?;
        Ok(Outcome::Applied)
    }

    fn set_brightness(&mut self, level: i32) -> Result<Outcome, FlushError<S::Error>> {
        match Brightness::try_from(level) {
            Ok(brightness) => {
                self.state.control.brightness = brightness;
                self.flush_control()?;
                Ok(Outcome::Applied)
            }
            Err(fault) => self.render_fault(fault),
        }
    }

    fn clear(&mut self) -> Result<(), FlushError<S::Error>> {
        self.state.clear_digits();
        self.flush_digits()
    }

    fn render_fault(&mut self, fault: DisplayFault) -> Result<Outcome, FlushError<S::Error>> {
        #[cfg(feature = "defmt")]
        defmt::warn!("control write rejected: {}", fault);

        self.state.show_error_pattern();
        self.flush_digits()?;
        Ok(Outcome::Rendered(fault))
    }

    fn flush_control(&mut self) -> Result<(), FlushError<S::Error>> {
        self.flush(Endpoint::Control, self.state.control.to_byte())
    }

    /// Write all four digit registers, stopping at the first failure
    fn flush_digits(&mut self) -> Result<(), FlushError<S::Error>> {
        for position in DigitPosition::ALL {
            let value = self.state.slot(position).to_byte();
            self.flush(Endpoint::Digit(position), value)?;
        }
        Ok(())
    }

    fn flush(&mut self, endpoint: Endpoint, value: u8) -> Result<(), FlushError<S::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("flush {} = {=u8:#x}", endpoint, value);

        self.sink
            .write(endpoint, value)
            .map_err(|error| FlushError { endpoint, error })
    }
}
