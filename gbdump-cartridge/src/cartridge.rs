//! A decoded header plus its ROM banks.

use gbdump_core::{CartridgeError, ROM_BANK_SIZE};

use crate::header::{CartridgeHeader, GLOBAL_CHECKSUM_OFFSET};

/// One 16 KiB ROM bank.
pub type RomBank = Box<[u8; ROM_BANK_SIZE]>;

/// Copy a bank-sized chunk into an owned bank. `chunk` must be exactly
/// [`ROM_BANK_SIZE`] bytes long.
pub fn bank_from_slice(chunk: &[u8]) -> RomBank {
    let mut bank = Box::new([0u8; ROM_BANK_SIZE]);
    bank.copy_from_slice(chunk);
    bank
}

/// A full cartridge: the header and every ROM bank it declares.
///
/// Bank 0 already embeds the header bytes, so serialization is a plain
/// concatenation of banks.
#[derive(Debug, Clone)]
pub struct Cartridge {
    header: CartridgeHeader,
    rom_banks: Vec<RomBank>,
    // Save RAM is not read in this version; kept so the model matches the
    // hardware layout.
    ram_banks: Option<Vec<Vec<u8>>>,
}

impl Cartridge {
    /// Slice `rom_bytes` into the number of banks the header declares.
    ///
    /// Bytes past the last declared bank are ignored (padded dumps).
    pub fn assemble(header: CartridgeHeader, rom_bytes: &[u8]) -> Result<Self, CartridgeError> {
        let bank_count = header.rom_bank_count()?;
        let expected = bank_count * ROM_BANK_SIZE;
        if rom_bytes.len() < expected {
            return Err(CartridgeError::truncated(expected, rom_bytes.len()));
        }
        if rom_bytes.len() > expected {
            log::warn!(
                "Image is {} bytes but the header declares {}; ignoring the excess",
                rom_bytes.len(),
                expected
            );
        }

        let rom_banks = rom_bytes[..expected]
            .chunks_exact(ROM_BANK_SIZE)
            .map(bank_from_slice)
            .collect();

        Ok(Self {
            header,
            rom_banks,
            ram_banks: None,
        })
    }

    /// Build a cartridge from banks that were read one at a time.
    pub fn from_banks(
        header: CartridgeHeader,
        rom_banks: Vec<RomBank>,
    ) -> Result<Self, CartridgeError> {
        let expected = header.rom_bank_count()?;
        if rom_banks.len() != expected {
            return Err(CartridgeError::BankCountMismatch {
                expected,
                actual: rom_banks.len(),
            });
        }
        Ok(Self {
            header,
            rom_banks,
            ram_banks: None,
        })
    }

    pub fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    pub fn rom_banks(&self) -> &[RomBank] {
        &self.rom_banks
    }

    pub fn ram_banks(&self) -> Option<&[Vec<u8>]> {
        self.ram_banks.as_deref()
    }

    /// Total ROM size in bytes.
    pub fn rom_size(&self) -> usize {
        self.rom_banks.len() * ROM_BANK_SIZE
    }

    /// Sum every ROM byte except the checksum field itself.
    pub fn compute_global_checksum(&self) -> u16 {
        compute_global_checksum(self.rom_banks.iter().flat_map(|bank| bank.iter()))
    }

    /// Compare the computed global checksum with 0x014E-0x014F.
    ///
    /// Real hardware never checks this value, so callers usually treat a
    /// mismatch as a warning.
    pub fn validate_global_checksum(&self) -> Result<(), CartridgeError> {
        let computed = self.compute_global_checksum();
        let [high, low] = computed.to_be_bytes();
        let stored = self.header.global_checksum();
        if low == stored[1] && high == stored[0] {
            Ok(())
        } else {
            Err(CartridgeError::InvalidGlobalChecksum {
                expected: self.header.global_checksum_value(),
                computed,
            })
        }
    }

    /// The serialized image.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.rom_size());
        for bank in &self.rom_banks {
            out.extend_from_slice(&bank[..]);
        }
        out
    }
}

/// Global checksum over a full image: 16-bit wrapping sum of every byte
/// except the two at 0x014E and 0x014F.
pub fn compute_global_checksum<'a>(bytes: impl IntoIterator<Item = &'a u8>) -> u16 {
    bytes
        .into_iter()
        .enumerate()
        .filter(|(i, _)| *i != GLOBAL_CHECKSUM_OFFSET && *i != GLOBAL_CHECKSUM_OFFSET + 1)
        .fold(0u16, |sum, (_, &b)| sum.wrapping_add(b as u16))
}

#[cfg(test)]
#[path = "tests/cartridge_tests.rs"]
mod tests;
