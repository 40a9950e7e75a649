//! The bus protocol state machine.
//!
//! A master cycle is: present the address, wait, pulse RD (or WR) low for
//! at least one margin, sample or release, wait again. The data bus rests
//! in input mode between cycles so the cartridge can always drive it.

use std::fmt;
use std::time::Duration;

use crate::delay::{Delay, ThreadDelay};
use crate::error::BusError;
use crate::lines::{self, BusLines};
use crate::pin::{Pin, PinMode};

pub const DEFAULT_TIMING_MARGIN: Duration = Duration::from_micros(50);

/// Which side of the bus this engine plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Drives the address bus and strobes. The normal dumping role.
    Master,
    /// Observes the address bus and answers on the data bus.
    Slave,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Master => write!(f, "master"),
            Self::Slave => write!(f, "slave"),
        }
    }
}

/// Current direction of the data bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ReadMode,
    WriteMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusState {
    Idle,
    AddressSelected,
    /// RD is asserted; only observable mid-cycle.
    ReadActive,
    /// WR is asserted or the data bus is driven; only observable mid-cycle.
    WriteActive,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusConfig {
    /// Minimum settle time between line transitions.
    pub timing_margin: Duration,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            timing_margin: DEFAULT_TIMING_MARGIN,
        }
    }
}

/// Owns every line of one cartridge bus and sequences reads and writes.
///
/// Lines are returned to input mode when the engine is released or dropped.
pub struct BusEngine<P: Pin, D: Delay = ThreadDelay> {
    lines: Option<BusLines<P>>,
    role: Role,
    direction: Direction,
    state: BusState,
    selected_address: u16,
    margin: Duration,
    delay: D,
}

impl<P: Pin> BusEngine<P> {
    /// Claim `lines` and configure them for `role`, waiting with real sleeps.
    pub fn initialize(lines: BusLines<P>, role: Role, config: &BusConfig) -> Self {
        Self::with_delay(lines, role, config, ThreadDelay)
    }
}

impl<P: Pin, D: Delay> BusEngine<P, D> {
    /// Claim `lines` and configure them for `role`.
    ///
    /// As master, RD and WR are set high (de-asserted) before they become
    /// outputs, and the address bus is driven low. As slave, address and strobes are inputs. In both
    /// roles each data line is briefly driven low and then released, which
    /// discharges any stale level before the first read.
    pub fn with_delay(mut lines: BusLines<P>, role: Role, config: &BusConfig, delay: D) -> Self {
        let mut engine = Self {
            lines: None,
            role,
            direction: Direction::ReadMode,
            state: BusState::Idle,
            selected_address: 0,
            margin: config.timing_margin,
            delay,
        };

        match role {
            Role::Master => {
                // Idle level first, so no strobe is ever driven low here.
                lines.rd_mut().set_high();
                lines.rd_mut().set_output_mode();
                lines.wr_mut().set_high();
                lines.wr_mut().set_output_mode();
                for pin in lines.address_mut() {
                    pin.set_low();
                    pin.set_output_mode();
                }
            }
            Role::Slave => {
                lines::set_mode(lines.address_mut(), PinMode::Input);
                lines.rd_mut().set_input_mode();
                lines.wr_mut().set_input_mode();
            }
        }

        for pin in lines.data_mut() {
            pin.set_low();
            pin.set_output_mode();
            engine.delay.wait(engine.margin);
            pin.set_input_mode();
        }

        log::debug!(
            "Bus initialized as {role} with {}us margin",
            engine.margin.as_micros()
        );
        engine.lines = Some(lines);
        engine
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> BusState {
        self.state
    }

    /// Address most recently presented with [`select_address`](Self::select_address).
    pub fn selected_address(&self) -> u16 {
        self.selected_address
    }

    pub fn timing_margin(&self) -> Duration {
        self.margin
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    pub fn is_released(&self) -> bool {
        self.lines.is_none()
    }

    /// Present `address` on the address bus and wait one margin.
    pub fn select_address(&mut self, address: u16) -> Result<(), BusError> {
        const OP: &str = "select_address";
        self.ensure_open(OP)?;
        if self.role != Role::Master {
            return Err(BusError::invalid_role(OP, self.role));
        }

        let margin = self.margin;
        let (lines, delay) = self.parts(OP)?;
        lines::write_value(lines.address_mut(), address);
        delay.wait(margin);

        self.selected_address = address;
        self.state = BusState::AddressSelected;
        log::trace!("Selected address {address:#06X}");
        Ok(())
    }

    /// Read one byte from the data bus.
    ///
    /// As master this strobes RD at the selected address. As slave it
    /// samples whatever the other side is driving.
    pub fn read_byte(&mut self) -> Result<u8, BusError> {
        const OP: &str = "read_byte";
        self.ensure_cycle_ready(OP)?;
        if self.direction != Direction::ReadMode {
            return Err(BusError::not_ready(OP, "data bus is not in read mode"));
        }

        self.state = BusState::ReadActive;
        let role = self.role;
        let margin = self.margin;
        let (lines, delay) = self.parts(OP)?;
        let value = match role {
            Role::Master => {
                lines.rd_mut().set_low();
                delay.wait(margin);
                let value = lines::read_value(lines.data_mut()) as u8;
                lines.rd_mut().set_high();
                delay.wait(margin);
                value
            }
            Role::Slave => {
                delay.wait(margin);
                let value = lines::read_value(lines.data_mut()) as u8;
                delay.wait(margin);
                value
            }
        };

        self.rest();
        log::trace!("Read {value:#04X} at {:#06X}", self.selected_address);
        Ok(value)
    }

    /// Write one byte onto the data bus.
    ///
    /// The data bus is switched to output for the duration of the cycle and
    /// always returned to input mode before this returns. As master, WR is
    /// pulsed low while the value is held. As slave, the value is held for
    /// the same window without touching the strobes.
    pub fn write_byte(&mut self, value: u8) -> Result<(), BusError> {
        const OP: &str = "write_byte";
        self.ensure_cycle_ready(OP)?;

        self.state = BusState::WriteActive;
        self.direction = Direction::WriteMode;
        let role = self.role;
        let margin = self.margin;
        let (lines, delay) = self.parts(OP)?;

        lines::write_value(lines.data_mut(), u16::from(value));
        lines::set_mode(lines.data_mut(), PinMode::Output);
        delay.wait(margin);

        match role {
            Role::Master => {
                lines.wr_mut().set_low();
                delay.wait(margin);
                lines.wr_mut().set_high();
                delay.wait(margin);
            }
            Role::Slave => {
                delay.wait(margin);
                delay.wait(margin);
            }
        }

        for pin in lines.data_mut() {
            pin.set_low();
            pin.set_input_mode();
        }
        // Cartridge write cycle.
        delay.wait(margin);

        self.direction = Direction::ReadMode;
        self.rest();
        log::trace!("Wrote {value:#04X} at {:#06X}", self.selected_address);
        Ok(())
    }

    /// Sample the address the other side is presenting. Slave role only.
    pub fn observe_address(&mut self) -> Result<u16, BusError> {
        const OP: &str = "observe_address";
        self.ensure_open(OP)?;
        if self.role != Role::Slave {
            return Err(BusError::invalid_role(OP, self.role));
        }

        let (lines, _) = self.parts(OP)?;
        let address = lines::read_value(lines.address_mut());
        self.selected_address = address;
        Ok(address)
    }

    /// Return every line to input mode and give up the bus.
    ///
    /// Safe to call more than once; later calls do nothing.
    pub fn release(&mut self) {
        let Some(mut lines) = self.lines.take() else {
            return;
        };

        if self.role == Role::Master {
            lines.rd_mut().set_high();
            lines.wr_mut().set_high();
        }
        lines.for_each_line(|pin| pin.set_input_mode());

        self.state = BusState::Released;
        self.direction = Direction::ReadMode;
        log::debug!("Bus released");
    }

    fn ensure_open(&self, operation: &'static str) -> Result<(), BusError> {
        if self.lines.is_none() {
            return Err(BusError::not_ready(operation, "bus has been released"));
        }
        Ok(())
    }

    fn ensure_cycle_ready(&self, operation: &'static str) -> Result<(), BusError> {
        self.ensure_open(operation)?;
        if self.role == Role::Master && self.state == BusState::Idle {
            return Err(BusError::not_ready(operation, "no address selected"));
        }
        Ok(())
    }

    fn parts(&mut self, operation: &'static str) -> Result<(&mut BusLines<P>, &mut D), BusError> {
        match self.lines.as_mut() {
            Some(lines) => Ok((lines, &mut self.delay)),
            None => Err(BusError::not_ready(operation, "bus has been released")),
        }
    }

    fn rest(&mut self) {
        self.state = match self.role {
            Role::Master => BusState::AddressSelected,
            Role::Slave => BusState::Idle,
        };
    }
}

impl<P: Pin, D: Delay> Drop for BusEngine<P, D> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
