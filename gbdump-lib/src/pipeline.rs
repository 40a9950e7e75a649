//! Read, validate, and report.
//!
//! Decoding and geometry errors abort. A bad header checksum aborts unless
//! forced. A bad global checksum never aborts: it is handed back next to
//! the cartridge for the caller to weigh.

use std::path::Path;

use gbdump_cartridge::{Cartridge, CartridgeHeader, DumpProgress, RomSource};
use gbdump_core::{CartridgeError, ROM_BANK_SIZE};

use crate::error::DumpError;
use crate::file_reader::FileRomReader;
use crate::hasher::{self, ImageHashes};

#[derive(Debug, Clone, Copy, Default)]
pub struct DumpOptions {
    /// Keep going past a header checksum mismatch.
    pub force: bool,
}

/// A cartridge that was read completely, plus the checksum verdicts.
#[derive(Debug)]
pub struct DumpReport {
    pub cartridge: Cartridge,
    /// Only an error when the dump was forced past it.
    pub header_checksum: Result<(), CartridgeError>,
    pub global_checksum: Result<(), CartridgeError>,
}

impl DumpReport {
    pub fn is_clean(&self) -> bool {
        self.header_checksum.is_ok() && self.global_checksum.is_ok()
    }

    pub fn hashes(&self) -> ImageHashes {
        hasher::hash_cartridge(&self.cartridge)
    }
}

/// Read a whole cartridge from `source`, applying the checksum policy.
pub fn dump<S>(
    source: &mut S,
    options: &DumpOptions,
    progress: &mut dyn FnMut(DumpProgress),
) -> Result<DumpReport, DumpError>
where
    S: RomSource,
    DumpError: From<S::Error>,
{
    let header = source.read_header()?;
    log::debug!(
        "Header: {:?}, type {:#04X}",
        header.title_string(),
        header.cartridge_type()
    );

    let header_checksum = match header.validate_header_checksum() {
        Ok(()) => Ok(()),
        Err(e) if options.force => {
            log::warn!("{e}; continuing anyway");
            Err(e)
        }
        Err(e) => return Err(e.into()),
    };

    let cartridge = source.read_cartridge_with_progress(progress)?;

    let global_checksum = cartridge.validate_global_checksum();
    if let Err(e) = &global_checksum {
        log::warn!("{e}");
    }

    Ok(DumpReport {
        cartridge,
        header_checksum,
        global_checksum,
    })
}

/// Integrity report for an image on disk.
#[derive(Debug)]
pub struct VerifyReport {
    pub header: CartridgeHeader,
    pub file_size: usize,
    /// Size implied by the ROM size code, if the code is known.
    pub expected_size: Option<usize>,
    pub header_checksum: Result<(), CartridgeError>,
    /// Assembling the banks and checking the global checksum.
    pub image: Result<(), CartridgeError>,
    pub hashes: ImageHashes,
}

impl VerifyReport {
    /// True unless something fatal was found. A global checksum mismatch
    /// alone still passes.
    pub fn is_valid(&self) -> bool {
        let image_ok = match &self.image {
            Ok(()) => true,
            Err(e) => e.is_warning(),
        };
        self.header_checksum.is_ok() && image_ok
    }
}

/// Check both checksums and the declared size of the image at `path`.
///
/// Only an unreadable file or a header window shorter than 0x150 bytes is
/// an error; every other finding lands in the report.
pub fn verify_file(path: &Path) -> Result<VerifyReport, DumpError> {
    let mut reader = FileRomReader::open(path)?;
    let header = reader.read_header()?;

    let header_checksum = header.validate_header_checksum();
    let expected_size = header
        .rom_bank_count()
        .ok()
        .map(|banks| banks * ROM_BANK_SIZE);
    let image = reader
        .read_cartridge()
        .and_then(|cartridge| cartridge.validate_global_checksum());

    Ok(VerifyReport {
        header,
        file_size: reader.len(),
        expected_size,
        header_checksum,
        image,
        hashes: hasher::hash_bytes(reader.bytes()),
    })
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
