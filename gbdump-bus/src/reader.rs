//! Reading a live cartridge through the bus.
//!
//! Bank 0 is always mapped at 0x0000-0x3FFF. Every other bank is selected by
//! writing the controller's bank register and read from 0x4000-0x7FFF.

use gbdump_cartridge::cartridge::bank_from_slice;
use gbdump_cartridge::{Cartridge, CartridgeHeader, DumpProgress, MbcKind, RomSource};
use gbdump_core::{HEADER_WINDOW, ROM_BANK_SIZE};

use crate::delay::{Delay, ThreadDelay};
use crate::engine::BusEngine;
use crate::error::BusError;
use crate::pin::Pin;

const SWITCHABLE_BASE: u16 = 0x4000;

/// [`RomSource`] backed by a master-role [`BusEngine`].
pub struct BusRomReader<P: Pin, D: Delay = ThreadDelay> {
    engine: BusEngine<P, D>,
    header: Option<CartridgeHeader>,
}

impl<P: Pin, D: Delay> BusRomReader<P, D> {
    pub fn new(engine: BusEngine<P, D>) -> Self {
        Self {
            engine,
            header: None,
        }
    }

    pub fn engine(&self) -> &BusEngine<P, D> {
        &self.engine
    }

    /// Read `len` consecutive bytes starting at `start`.
    pub fn read_block(&mut self, start: u16, len: usize) -> Result<Vec<u8>, BusError> {
        let mut bytes = Vec::with_capacity(len);
        for offset in 0..len {
            self.engine.select_address(start.wrapping_add(offset as u16))?;
            bytes.push(self.engine.read_byte()?);
        }
        Ok(bytes)
    }

    fn write_register(&mut self, address: u16, value: u8) -> Result<(), BusError> {
        self.engine.select_address(address)?;
        self.engine.write_byte(value)
    }

    /// Map `bank` and read it.
    fn read_bank(&mut self, kind: MbcKind, bank: usize) -> Result<Vec<u8>, BusError> {
        if bank == 0 {
            return self.read_block(0x0000, ROM_BANK_SIZE);
        }

        match kind {
            MbcKind::RomOnly => {}
            MbcKind::Mbc1 => {
                let low = (bank & 0x1F) as u8;
                let high = ((bank >> 5) & 0x03) as u8;
                self.write_register(0x4000, high)?;
                if low == 0 {
                    // Banks 0x20/0x40/0x60 cannot be mapped at 0x4000; mode 1
                    // maps them at 0x0000 instead.
                    self.write_register(0x6000, 0x01)?;
                    let bytes = self.read_block(0x0000, ROM_BANK_SIZE)?;
                    self.write_register(0x6000, 0x00)?;
                    return Ok(bytes);
                }
                self.write_register(0x2000, low)?;
            }
            MbcKind::Mbc2 => self.write_register(0x2100, (bank & 0x0F) as u8)?,
            MbcKind::Mbc3 => self.write_register(0x2000, (bank & 0x7F) as u8)?,
            MbcKind::Mbc5 => {
                self.write_register(0x2000, (bank & 0xFF) as u8)?;
                self.write_register(0x3000, ((bank >> 8) & 0x01) as u8)?;
            }
            _ => self.write_register(0x2000, bank as u8)?,
        }

        self.read_block(SWITCHABLE_BASE, ROM_BANK_SIZE)
    }
}

impl<P: Pin, D: Delay> RomSource for BusRomReader<P, D> {
    type Error = BusError;

    fn read_header(&mut self) -> Result<CartridgeHeader, BusError> {
        if let Some(header) = &self.header {
            return Ok(header.clone());
        }
        let bytes = self.read_block(0x0000, HEADER_WINDOW)?;
        let header = CartridgeHeader::decode(&bytes)?;
        log::debug!("Header read over the bus: {:?}", header.title_string());
        self.header = Some(header.clone());
        Ok(header)
    }

    fn read_cartridge(&mut self) -> Result<Cartridge, BusError> {
        self.read_cartridge_with_progress(&mut |_| {})
    }

    fn read_cartridge_with_progress(
        &mut self,
        progress: &mut dyn FnMut(DumpProgress),
    ) -> Result<Cartridge, BusError> {
        let header = self.read_header()?;
        progress(DumpProgress::Header);

        let total = header.rom_bank_count()?;
        let kind = header.classify().kind;
        match kind {
            MbcKind::RomOnly if total > 2 => {
                log::warn!("ROM-only cartridge declares {total} banks; only two are addressable");
            }
            MbcKind::RomOnly | MbcKind::Mbc1 | MbcKind::Mbc2 | MbcKind::Mbc3 | MbcKind::Mbc5 => {}
            other => {
                log::warn!(
                    "No banking support for {}; assuming the bank register at 0x2000",
                    other.name()
                );
            }
        }

        let mut banks = Vec::with_capacity(total);
        for index in 0..total {
            let bytes = self.read_bank(kind, index)?;
            banks.push(bank_from_slice(&bytes));
            log::debug!("Read bank {}/{}", index + 1, total);
            progress(DumpProgress::Bank { index, total });
        }

        Ok(Cartridge::from_banks(header, banks)?)
    }
}
