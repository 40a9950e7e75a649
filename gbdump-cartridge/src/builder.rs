//! Synthetic ROM images with valid headers.
//!
//! Used by tests across the workspace and by the simulated bus, so that no
//! copyrighted dump is ever needed to exercise the pipeline.

use gbdump_core::ROM_BANK_SIZE;

use crate::cartridge::compute_global_checksum;
use crate::geometry;
use crate::header::{
    CARTRIDGE_TYPE_OFFSET, CGB_FLAG_OFFSET, DESTINATION_OFFSET, GLOBAL_CHECKSUM_OFFSET,
    HEADER_CHECKSUM_OFFSET, LICENSEE_OFFSET, LOGO_OFFSET, NINTENDO_LOGO, OLD_LICENSEE_OFFSET,
    SGB_FLAG_OFFSET, TITLE_OFFSET, VERSION_OFFSET, compute_header_checksum,
};

/// Builder for a ROM image whose header and checksums are consistent.
#[derive(Debug, Clone)]
pub struct RomBuilder {
    title: Vec<u8>,
    cartridge_type: u8,
    rom_size_code: u8,
    ram_size_code: u8,
    cgb_flag: u8,
    sgb_flag: u8,
    destination: u8,
    old_licensee: u8,
    new_licensee: [u8; 2],
    version: u8,
}

impl Default for RomBuilder {
    fn default() -> Self {
        Self {
            title: b"TESTGAME".to_vec(),
            cartridge_type: 0x00,
            rom_size_code: 0x00,
            ram_size_code: 0x00,
            cgb_flag: 0x00,
            sgb_flag: 0x00,
            destination: 0x01,
            old_licensee: 0x01,
            new_licensee: *b"00",
            version: 0x00,
        }
    }
}

impl RomBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: &[u8]) -> Self {
        self.title = title.iter().take(16).copied().collect();
        self
    }

    pub fn cartridge_type(mut self, code: u8) -> Self {
        self.cartridge_type = code;
        self
    }

    pub fn rom_size_code(mut self, code: u8) -> Self {
        self.rom_size_code = code;
        self
    }

    pub fn ram_size_code(mut self, code: u8) -> Self {
        self.ram_size_code = code;
        self
    }

    pub fn cgb_flag(mut self, flag: u8) -> Self {
        self.cgb_flag = flag;
        self
    }

    pub fn sgb_flag(mut self, flag: u8) -> Self {
        self.sgb_flag = flag;
        self
    }

    pub fn destination(mut self, code: u8) -> Self {
        self.destination = code;
        self
    }

    pub fn licensee(mut self, old: u8, new: [u8; 2]) -> Self {
        self.old_licensee = old;
        self.new_licensee = new;
        self
    }

    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    /// Build the image. Every byte outside the header carries a pattern that
    /// differs per bank, so misordered or repeated banks are detectable.
    ///
    /// An unmapped ROM size code yields a 32 KiB image.
    pub fn build(&self) -> Vec<u8> {
        let size = geometry::rom_size(self.rom_size_code).unwrap_or(2 * ROM_BANK_SIZE);
        let mut rom: Vec<u8> = (0..size).map(pattern_byte).collect();

        // Entry point: NOP; JP 0x0150
        rom[0x0100..0x0104].copy_from_slice(&[0x00, 0xC3, 0x50, 0x01]);
        rom[LOGO_OFFSET..LOGO_OFFSET + NINTENDO_LOGO.len()].copy_from_slice(&NINTENDO_LOGO);

        rom[TITLE_OFFSET..TITLE_OFFSET + 16].fill(0);
        rom[TITLE_OFFSET..TITLE_OFFSET + self.title.len()].copy_from_slice(&self.title);
        rom[CGB_FLAG_OFFSET] = self.cgb_flag;
        rom[LICENSEE_OFFSET..LICENSEE_OFFSET + 2].copy_from_slice(&self.new_licensee);
        rom[LICENSEE_OFFSET + 2] = 0x00;
        rom[SGB_FLAG_OFFSET] = self.sgb_flag;
        rom[CARTRIDGE_TYPE_OFFSET] = self.cartridge_type;
        rom[geometry::ROM_SIZE_OFFSET] = self.rom_size_code;
        rom[geometry::RAM_SIZE_OFFSET] = self.ram_size_code;
        rom[DESTINATION_OFFSET] = self.destination;
        rom[OLD_LICENSEE_OFFSET] = self.old_licensee;
        rom[VERSION_OFFSET] = self.version;

        fix_checksums(&mut rom);
        rom
    }
}

/// Filler byte for an absolute image offset.
pub fn pattern_byte(offset: usize) -> u8 {
    let bank = offset / ROM_BANK_SIZE;
    (offset as u8).wrapping_mul(31) ^ (bank as u8).wrapping_add(0x5A)
}

/// Recompute both checksums of an image in place.
pub fn fix_checksums(rom: &mut [u8]) {
    rom[HEADER_CHECKSUM_OFFSET] = compute_header_checksum(rom);
    let global = compute_global_checksum(rom.iter());
    rom[GLOBAL_CHECKSUM_OFFSET..GLOBAL_CHECKSUM_OFFSET + 2].copy_from_slice(&global.to_be_bytes());
}
