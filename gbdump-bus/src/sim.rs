//! In-memory cartridge bus for dry runs and tests.
//!
//! [`SimBus`] models every line of the edge connector with the host's mode
//! and level plus whatever the device side is driving. A falling RD edge
//! asks the attached [`BusDevice`] for the byte at the current address and
//! drives it onto the data lines; a rising WR edge hands the data lines to
//! the device. Any moment where both sides drive the same line is counted
//! as contention.

use std::cell::RefCell;
use std::rc::Rc;

use gbdump_cartridge::MbcKind;
use gbdump_core::ROM_BANK_SIZE;

use crate::error::BusError;
use crate::lines::{ADDRESS_LINES, BusLines, DATA_LINES};
use crate::pin::{Pin, PinMode};

/// Something answering bus cycles: a cartridge, or plain memory.
pub trait BusDevice {
    fn read(&mut self, address: u16) -> u8;
    fn write(&mut self, address: u16, value: u8);
}

/// Names one line of the simulated connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineId {
    Address(u8),
    Data(u8),
    Rd,
    Wr,
}

#[derive(Debug, Clone, Copy)]
struct Line {
    mode: PinMode,
    level: bool,
    external: Option<bool>,
    /// Level read when nobody drives the line.
    pull: bool,
}

impl Line {
    fn new(pull: bool) -> Self {
        Self {
            mode: PinMode::Input,
            level: pull,
            external: None,
            pull,
        }
    }

    fn sample(&self) -> bool {
        match self.mode {
            PinMode::Output => self.level,
            PinMode::Input => self.external.unwrap_or(self.pull),
        }
    }
}

pub type SharedBus = Rc<RefCell<SimBus>>;

pub struct SimBus {
    address: [Line; ADDRESS_LINES],
    data: [Line; DATA_LINES],
    rd: Line,
    wr: Line,
    device: Box<dyn BusDevice>,
    contention: usize,
    mode_changes: usize,
    device_reads: usize,
    device_writes: usize,
}

impl SimBus {
    pub fn new(device: impl BusDevice + 'static) -> SharedBus {
        Rc::new(RefCell::new(Self {
            address: [Line::new(false); ADDRESS_LINES],
            data: [Line::new(false); DATA_LINES],
            // Strobes are active low and pulled up.
            rd: Line::new(true),
            wr: Line::new(true),
            device: Box::new(device),
            contention: 0,
            mode_changes: 0,
            device_reads: 0,
            device_writes: 0,
        }))
    }

    /// A pin wired to line `id` of `bus`.
    pub fn pin(bus: &SharedBus, id: LineId) -> SimPin {
        SimPin {
            bus: Rc::clone(bus),
            id,
        }
    }

    /// Hand out one pin per line, wired to `bus`.
    pub fn lines(bus: &SharedBus) -> Result<BusLines<SimPin>, BusError> {
        let pin = |id| Self::pin(bus, id);
        BusLines::new(
            (0..ADDRESS_LINES as u8).map(|i| pin(LineId::Address(i))).collect(),
            (0..DATA_LINES as u8).map(|i| pin(LineId::Data(i))).collect(),
            pin(LineId::Rd),
            pin(LineId::Wr),
        )
    }

    pub fn mode(&self, id: LineId) -> PinMode {
        self.line(id).mode
    }

    /// Level as seen on the wire.
    pub fn level(&self, id: LineId) -> bool {
        self.line(id).sample()
    }

    /// Number of times both sides drove the same line.
    pub fn contention(&self) -> usize {
        self.contention
    }

    /// Number of host-side direction changes across all lines.
    pub fn mode_changes(&self) -> usize {
        self.mode_changes
    }

    pub fn device_reads(&self) -> usize {
        self.device_reads
    }

    pub fn device_writes(&self) -> usize {
        self.device_writes
    }

    /// Drive (or stop driving, with `None`) a line from the device side.
    pub fn drive_external(&mut self, id: LineId, level: Option<bool>) {
        let line = self.line_mut(id);
        line.external = level;
        let clash = level.is_some() && line.mode == PinMode::Output;
        if clash {
            self.contention += 1;
        }
    }

    /// Present `address` from the device side, as another master would.
    pub fn drive_address(&mut self, address: u16) {
        for i in 0..ADDRESS_LINES as u8 {
            self.drive_external(LineId::Address(i), Some(address & (1 << i) != 0));
        }
    }

    /// Drive `value` onto the data lines from the device side.
    pub fn drive_data(&mut self, value: Option<u8>) {
        for i in 0..DATA_LINES as u8 {
            self.drive_external(LineId::Data(i), value.map(|v| v & (1 << i) != 0));
        }
    }

    fn line(&self, id: LineId) -> &Line {
        match id {
            LineId::Address(i) => &self.address[i as usize],
            LineId::Data(i) => &self.data[i as usize],
            LineId::Rd => &self.rd,
            LineId::Wr => &self.wr,
        }
    }

    fn line_mut(&mut self, id: LineId) -> &mut Line {
        match id {
            LineId::Address(i) => &mut self.address[i as usize],
            LineId::Data(i) => &mut self.data[i as usize],
            LineId::Rd => &mut self.rd,
            LineId::Wr => &mut self.wr,
        }
    }

    fn address_value(&self) -> u16 {
        self.address
            .iter()
            .enumerate()
            .fold(0, |acc, (i, l)| if l.sample() { acc | (1 << i) } else { acc })
    }

    fn data_value(&self) -> u8 {
        self.data
            .iter()
            .enumerate()
            .fold(0, |acc, (i, l)| if l.sample() { acc | (1 << i) } else { acc })
    }

    fn set_mode(&mut self, id: LineId, mode: PinMode) {
        let line = self.line_mut(id);
        if line.mode == mode {
            return;
        }
        line.mode = mode;
        let clash = mode == PinMode::Output && line.external.is_some();
        self.mode_changes += 1;
        if clash {
            self.contention += 1;
        }
    }

    fn set_level(&mut self, id: LineId, level: bool) {
        let line = self.line_mut(id);
        let was = line.sample();
        line.level = level;
        let now = line.sample();
        if was == now {
            return;
        }

        match (id, now) {
            (LineId::Rd, false) => {
                let address = self.address_value();
                let value = self.device.read(address);
                self.device_reads += 1;
                self.drive_data(Some(value));
            }
            (LineId::Rd, true) => self.drive_data(None),
            (LineId::Wr, true) => {
                let address = self.address_value();
                let value = self.data_value();
                self.device.write(address, value);
                self.device_writes += 1;
            }
            _ => {}
        }
    }
}

/// One simulated line, shared with its [`SimBus`].
pub struct SimPin {
    bus: SharedBus,
    id: LineId,
}

impl Pin for SimPin {
    fn read(&mut self) -> bool {
        self.bus.borrow().level(self.id)
    }

    fn set_high(&mut self) {
        self.bus.borrow_mut().set_level(self.id, true);
    }

    fn set_low(&mut self) {
        self.bus.borrow_mut().set_level(self.id, false);
    }

    fn set_input_mode(&mut self) {
        self.bus.borrow_mut().set_mode(self.id, PinMode::Input);
    }

    fn set_output_mode(&mut self) {
        self.bus.borrow_mut().set_mode(self.id, PinMode::Output);
    }
}

/// 64 KiB of flat memory. Useful for checking raw read and write cycles.
pub struct MemoryDevice {
    bytes: Box<[u8; 0x10000]>,
}

impl MemoryDevice {
    pub fn new() -> Self {
        Self {
            bytes: Box::new([0; 0x10000]),
        }
    }

    pub fn with_contents(offset: u16, contents: &[u8]) -> Self {
        let mut device = Self::new();
        let start = offset as usize;
        let end = (start + contents.len()).min(device.bytes.len());
        device.bytes[start..end].copy_from_slice(&contents[..end - start]);
        device
    }
}

impl Default for MemoryDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl BusDevice for MemoryDevice {
    fn read(&mut self, address: u16) -> u8 {
        self.bytes[address as usize]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.bytes[address as usize] = value;
    }
}

/// A ROM image behind a memory bank controller, as seen from the edge
/// connector.
///
/// Models the ROM banking registers of MBC1 (including the 0x20/0x40/0x60
/// quirk and mode 1), MBC2, MBC3 and MBC5. RAM is not modelled; reads
/// outside the ROM area return 0xFF.
pub struct SimCartridge {
    rom: Vec<u8>,
    kind: MbcKind,
    bank_count: usize,
    bank_low: usize,
    bank_high: usize,
    mode: u8,
}

impl SimCartridge {
    /// Wrap an image, taking the controller from its header.
    pub fn new(rom: Vec<u8>) -> Self {
        let kind = MbcKind::from_code(rom.get(0x147).copied().unwrap_or(0));
        Self::with_kind(rom, kind)
    }

    pub fn with_kind(rom: Vec<u8>, kind: MbcKind) -> Self {
        let bank_count = (rom.len() / ROM_BANK_SIZE).max(1);
        Self {
            rom,
            kind,
            bank_count,
            bank_low: 1,
            bank_high: 0,
            mode: 0,
        }
    }

    pub fn kind(&self) -> MbcKind {
        self.kind
    }

    /// Bank mapped at 0x0000-0x3FFF.
    fn fixed_bank(&self) -> usize {
        match self.kind {
            MbcKind::Mbc1 if self.mode == 1 => (self.bank_high << 5) % self.bank_count,
            _ => 0,
        }
    }

    /// Bank mapped at 0x4000-0x7FFF.
    fn switchable_bank(&self) -> usize {
        let bank = match self.kind {
            MbcKind::RomOnly => 1,
            MbcKind::Mbc1 => {
                let low = if self.bank_low & 0x1F == 0 { 1 } else { self.bank_low };
                (self.bank_high << 5) | low
            }
            MbcKind::Mbc5 => self.bank_low,
            _ => self.bank_low.max(1),
        };
        bank % self.bank_count
    }

    fn rom_byte(&self, bank: usize, offset: u16) -> u8 {
        self.rom
            .get(bank * ROM_BANK_SIZE + offset as usize)
            .copied()
            .unwrap_or(0xFF)
    }
}

impl BusDevice for SimCartridge {
    fn read(&mut self, address: u16) -> u8 {
        match address {
            0x0000..=0x3FFF => self.rom_byte(self.fixed_bank(), address),
            0x4000..=0x7FFF => self.rom_byte(self.switchable_bank(), address - 0x4000),
            _ => 0xFF,
        }
    }

    fn write(&mut self, address: u16, value: u8) {
        let value = value as usize;
        match (self.kind, address) {
            (MbcKind::RomOnly, _) => {}
            (MbcKind::Mbc1, 0x2000..=0x3FFF) => self.bank_low = value & 0x1F,
            (MbcKind::Mbc1, 0x4000..=0x5FFF) => self.bank_high = value & 0x03,
            (MbcKind::Mbc1, 0x6000..=0x7FFF) => self.mode = (value & 0x01) as u8,
            // MBC2 decodes the bank register from address bit 8.
            (MbcKind::Mbc2, 0x0000..=0x3FFF) if address & 0x0100 != 0 => {
                self.bank_low = value & 0x0F;
            }
            (MbcKind::Mbc3, 0x2000..=0x3FFF) => self.bank_low = value & 0x7F,
            (MbcKind::Mbc5, 0x2000..=0x2FFF) => {
                self.bank_low = (self.bank_low & 0x100) | value;
            }
            (MbcKind::Mbc5, 0x3000..=0x3FFF) => {
                self.bank_low = (self.bank_low & 0xFF) | ((value & 0x01) << 8);
            }
            (MbcKind::Mbc1 | MbcKind::Mbc2 | MbcKind::Mbc3 | MbcKind::Mbc5, _) => {}
            (_, 0x2000..=0x3FFF) => self.bank_low = value,
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "tests/sim_tests.rs"]
mod tests;
