//! ROM images already captured to disk.

use std::path::{Path, PathBuf};

use gbdump_cartridge::{Cartridge, CartridgeHeader, DumpProgress, RomSource};
use gbdump_core::CartridgeError;

/// A ROM image loaded whole from a file (or handed over as bytes).
pub struct FileRomReader {
    path: Option<PathBuf>,
    bytes: Vec<u8>,
    header: Option<CartridgeHeader>,
}

impl FileRomReader {
    /// Read the entire file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CartridgeError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        log::debug!("Loaded {} bytes from {}", bytes.len(), path.display());
        Ok(Self {
            path: Some(path.to_path_buf()),
            bytes,
            header: None,
        })
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            path: None,
            bytes,
            header: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl RomSource for FileRomReader {
    type Error = CartridgeError;

    fn read_header(&mut self) -> Result<CartridgeHeader, CartridgeError> {
        if let Some(header) = &self.header {
            return Ok(header.clone());
        }
        let header = CartridgeHeader::decode(&self.bytes)?;
        self.header = Some(header.clone());
        Ok(header)
    }

    fn read_cartridge(&mut self) -> Result<Cartridge, CartridgeError> {
        let header = self.read_header()?;
        Cartridge::assemble(header, &self.bytes)
    }

    fn read_cartridge_with_progress(
        &mut self,
        progress: &mut dyn FnMut(DumpProgress),
    ) -> Result<Cartridge, CartridgeError> {
        let header = self.read_header()?;
        progress(DumpProgress::Header);
        let cartridge = Cartridge::assemble(header, &self.bytes)?;
        let total = cartridge.rom_banks().len();
        for index in 0..total {
            progress(DumpProgress::Bank { index, total });
        }
        Ok(cartridge)
    }
}

#[cfg(test)]
#[path = "tests/file_reader_tests.rs"]
mod tests;
