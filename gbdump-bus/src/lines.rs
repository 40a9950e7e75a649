//! Grouping of pins into the address bus, data bus, and strobes.

use std::fmt;

use crate::error::BusError;
use crate::pin::{Pin, PinMode};

pub const ADDRESS_LINES: usize = 16;
pub const DATA_LINES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineGroup {
    Address,
    Data,
}

impl fmt::Display for LineGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address => write!(f, "address"),
            Self::Data => write!(f, "data"),
        }
    }
}

/// GPIO numbers for every cartridge line. Index `i` of `address` is A`i`,
/// index `i` of `data` is D`i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pinout {
    pub address: Vec<u32>,
    pub data: Vec<u32>,
    pub rd: u32,
    pub wr: u32,
}

/// Every line of one cartridge bus.
pub struct BusLines<P> {
    address: Vec<P>,
    data: Vec<P>,
    rd: P,
    wr: P,
}

impl<P: Pin> BusLines<P> {
    pub fn new(address: Vec<P>, data: Vec<P>, rd: P, wr: P) -> Result<Self, BusError> {
        check_count(LineGroup::Address, ADDRESS_LINES, address.len())?;
        check_count(LineGroup::Data, DATA_LINES, data.len())?;
        Ok(Self {
            address,
            data,
            rd,
            wr,
        })
    }

    pub fn address_mut(&mut self) -> &mut [P] {
        &mut self.address
    }

    pub fn data_mut(&mut self) -> &mut [P] {
        &mut self.data
    }

    pub fn rd_mut(&mut self) -> &mut P {
        &mut self.rd
    }

    pub fn wr_mut(&mut self) -> &mut P {
        &mut self.wr
    }

    /// Visit every line: address, data, then RD and WR.
    pub fn for_each_line(&mut self, mut f: impl FnMut(&mut P)) {
        self.address.iter_mut().for_each(&mut f);
        self.data.iter_mut().for_each(&mut f);
        f(&mut self.rd);
        f(&mut self.wr);
    }
}

fn check_count(group: LineGroup, expected: usize, actual: usize) -> Result<(), BusError> {
    if actual == expected {
        Ok(())
    } else {
        Err(BusError::LineCount {
            group,
            expected,
            actual,
        })
    }
}

/// Drive `value` onto a line group, bit `i` on line `i`. Bits beyond the
/// group width are ignored.
pub fn write_value<P: Pin>(pins: &mut [P], value: u16) {
    for (i, pin) in pins.iter_mut().enumerate() {
        pin.set_state(value & (1 << i) != 0);
    }
}

/// Sample a line group into a value, line `i` into bit `i`.
pub fn read_value<P: Pin>(pins: &mut [P]) -> u16 {
    pins.iter_mut()
        .enumerate()
        .fold(0u16, |acc, (i, pin)| if pin.read() { acc | (1 << i) } else { acc })
}

pub fn set_mode<P: Pin>(pins: &mut [P], mode: PinMode) {
    for pin in pins {
        pin.set_mode(mode);
    }
}
