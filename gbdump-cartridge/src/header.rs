//! Cartridge header decoding (0x0100-0x014F).
//!
//! The header is a fixed, versionless layout. Every field is copied out of a
//! single 0x150-byte window taken from the start of the image, and the window
//! itself is kept so the header checksum is recomputed from the raw
//! bytes rather than from decoded fields.

use gbdump_core::util::read_ascii;
use gbdump_core::{CartridgeError, HEADER_WINDOW};

use crate::geometry;
use crate::licensee;
use crate::mbc::{self, Classification};

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

pub const LOGO_OFFSET: usize = 0x0104;
pub const TITLE_OFFSET: usize = 0x0134;
pub const MANUFACTURER_OFFSET: usize = 0x013F;
pub const CGB_FLAG_OFFSET: usize = 0x0143;
pub const LICENSEE_OFFSET: usize = 0x0144;
pub const SGB_FLAG_OFFSET: usize = 0x0146;
pub const CARTRIDGE_TYPE_OFFSET: usize = 0x0147;
pub const DESTINATION_OFFSET: usize = 0x014A;
pub const OLD_LICENSEE_OFFSET: usize = 0x014B;
pub const VERSION_OFFSET: usize = 0x014C;
pub const HEADER_CHECKSUM_OFFSET: usize = 0x014D;
pub const GLOBAL_CHECKSUM_OFFSET: usize = 0x014E;

/// Bytes covered by the header checksum: 0x0134 up to, not including, 0x014D.
const HEADER_CHECKSUM_RANGE: std::ops::Range<usize> = TITLE_OFFSET..HEADER_CHECKSUM_OFFSET;

/// The boot ROM compares this bitmap against 0x0104-0x0133.
pub const NINTENDO_LOGO: [u8; 48] = [
    0xCE, 0xED, 0x66, 0x66, 0xCC, 0x0D, 0x00, 0x0B, 0x03, 0x73, 0x00, 0x83, 0x00, 0x0C, 0x00,
    0x0D, 0x00, 0x08, 0x11, 0x1F, 0x88, 0x89, 0x00, 0x0E, 0xDC, 0xCC, 0x6E, 0xE6, 0xDD, 0xDD,
    0xD9, 0x99, 0xBB, 0xBB, 0x67, 0x63, 0x6E, 0x0E, 0xEC, 0xCC, 0xDD, 0xDC, 0x99, 0x9F, 0xBB,
    0xB9, 0x33, 0x3E,
];

/// Market the cartridge was sold in (0x014A).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Japan,
    Overseas,
    Unknown(u8),
}

impl Destination {
    pub fn from_code(code: u8) -> Self {
        match code {
            0x00 => Self::Japan,
            0x01 => Self::Overseas,
            other => Self::Unknown(other),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Japan => "Japan",
            Self::Overseas => "Overseas",
            Self::Unknown(_) => "Unknown",
        }
    }
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Decoded cartridge header.
///
/// Immutable once decoded. The manufacturer code (0x013F-0x0142) overlaps
/// the last bytes of the title (0x0134-0x0143); that overlap is part of the
/// cartridge format and both fields keep it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartridgeHeader {
    raw: Box<[u8; HEADER_WINDOW]>,
    nintendo_logo: [u8; 48],
    title: [u8; 16],
    manufacturer_code: [u8; 4],
    cgb_flag: u8,
    licensee_code: u8,
    sgb_flag: u8,
    cartridge_type: u8,
    rom_size_code: u8,
    ram_size_code: u8,
    destination_code: u8,
    old_licensee_code: u8,
    mask_rom_version: u8,
    header_checksum: u8,
    global_checksum: [u8; 2],
}

fn field<const N: usize>(raw: &[u8; HEADER_WINDOW], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&raw[offset..offset + N]);
    out
}

impl CartridgeHeader {
    /// Decode the header from the first 0x150 bytes of `bytes`.
    ///
    /// Longer input (a whole image) is accepted; only the window is kept.
    pub fn decode(bytes: &[u8]) -> Result<Self, CartridgeError> {
        if bytes.len() < HEADER_WINDOW {
            return Err(CartridgeError::malformed_header(bytes.len()));
        }

        let mut raw = Box::new([0u8; HEADER_WINDOW]);
        raw.copy_from_slice(&bytes[..HEADER_WINDOW]);

        Ok(Self {
            nintendo_logo: field(&raw, LOGO_OFFSET),
            title: field(&raw, TITLE_OFFSET),
            manufacturer_code: field(&raw, MANUFACTURER_OFFSET),
            cgb_flag: raw[CGB_FLAG_OFFSET],
            licensee_code: raw[LICENSEE_OFFSET],
            sgb_flag: raw[SGB_FLAG_OFFSET],
            cartridge_type: raw[CARTRIDGE_TYPE_OFFSET],
            rom_size_code: raw[geometry::ROM_SIZE_OFFSET],
            ram_size_code: raw[geometry::RAM_SIZE_OFFSET],
            destination_code: raw[DESTINATION_OFFSET],
            old_licensee_code: raw[OLD_LICENSEE_OFFSET],
            mask_rom_version: raw[VERSION_OFFSET],
            header_checksum: raw[HEADER_CHECKSUM_OFFSET],
            global_checksum: field(&raw, GLOBAL_CHECKSUM_OFFSET),
            raw,
        })
    }

    /// The 0x150-byte window this header was decoded from.
    pub fn raw_bytes(&self) -> &[u8; HEADER_WINDOW] {
        &self.raw
    }

    pub fn nintendo_logo(&self) -> &[u8; 48] {
        &self.nintendo_logo
    }

    pub fn title(&self) -> &[u8; 16] {
        &self.title
    }

    pub fn manufacturer_code(&self) -> &[u8; 4] {
        &self.manufacturer_code
    }

    pub fn cgb_flag(&self) -> u8 {
        self.cgb_flag
    }

    pub fn licensee_code(&self) -> u8 {
        self.licensee_code
    }

    pub fn sgb_flag(&self) -> u8 {
        self.sgb_flag
    }

    pub fn cartridge_type(&self) -> u8 {
        self.cartridge_type
    }

    pub fn rom_size_code(&self) -> u8 {
        self.rom_size_code
    }

    pub fn ram_size_code(&self) -> u8 {
        self.ram_size_code
    }

    pub fn destination_code(&self) -> u8 {
        self.destination_code
    }

    pub fn old_licensee_code(&self) -> u8 {
        self.old_licensee_code
    }

    pub fn mask_rom_version(&self) -> u8 {
        self.mask_rom_version
    }

    pub fn header_checksum(&self) -> u8 {
        self.header_checksum
    }

    /// Stored global checksum, high byte first.
    pub fn global_checksum(&self) -> [u8; 2] {
        self.global_checksum
    }

    /// Stored global checksum as a number.
    pub fn global_checksum_value(&self) -> u16 {
        u16::from_be_bytes(self.global_checksum)
    }

    // -- derived views --

    /// Title as printable ASCII.
    ///
    /// When the CGB flag is set, byte 0x0143 is the flag, not a character.
    pub fn title_string(&self) -> String {
        let len = if self.cgb_flag & 0x80 != 0 { 15 } else { 16 };
        read_ascii(&self.title[..len])
    }

    /// Two-character licensee code at 0x0144-0x0145.
    pub fn new_licensee_code(&self) -> [u8; 2] {
        [self.raw[LICENSEE_OFFSET], self.raw[LICENSEE_OFFSET + 1]]
    }

    /// Publisher name, following the 0x33 redirect to the new licensee code.
    pub fn publisher(&self) -> Option<&'static str> {
        licensee::publisher(self.old_licensee_code, self.new_licensee_code())
    }

    pub fn destination(&self) -> Destination {
        Destination::from_code(self.destination_code)
    }

    /// Whether the logo bitmap matches the one the boot ROM checks.
    ///
    /// Informational only: a mismatch is reported, never enforced.
    pub fn logo_matches(&self) -> bool {
        self.nintendo_logo == NINTENDO_LOGO
    }

    pub fn classify(&self) -> Classification {
        mbc::classify(self.cartridge_type, self.cgb_flag, self.sgb_flag)
    }

    pub fn is_gbc_only(&self) -> bool {
        self.cgb_flag == mbc::CGB_ONLY
    }

    pub fn supports_sgb(&self) -> bool {
        self.sgb_flag == mbc::SGB_SUPPORTED
    }

    /// Number of 16 KiB ROM banks the header declares.
    pub fn rom_bank_count(&self) -> Result<usize, CartridgeError> {
        geometry::rom_bank_count(self.rom_size_code)
    }

    /// Number of 8 KiB RAM banks the header declares.
    pub fn ram_bank_count(&self) -> Result<usize, CartridgeError> {
        geometry::ram_bank_count(self.ram_size_code)
    }

    /// Recompute the header checksum over the raw window and compare it
    /// against the byte at 0x014D.
    ///
    /// A mismatch means the dump is very likely corrupt or truncated; real
    /// hardware refuses to boot such a cartridge.
    pub fn validate_header_checksum(&self) -> Result<(), CartridgeError> {
        let computed = compute_header_checksum(&self.raw[..]);
        if computed == self.header_checksum {
            Ok(())
        } else {
            Err(CartridgeError::InvalidHeaderChecksum {
                expected: self.header_checksum,
                computed,
            })
        }
    }
}

/// Header checksum of an image: `x = x - byte - 1` over 0x0134-0x014C.
///
/// `bytes` must cover at least the header window.
pub fn compute_header_checksum(bytes: &[u8]) -> u8 {
    bytes[HEADER_CHECKSUM_RANGE]
        .iter()
        .fold(0u8, |x, &b| x.wrapping_sub(b).wrapping_sub(1))
}

#[cfg(test)]
#[path = "tests/header_tests.rs"]
mod tests;
