//! Persisting a cartridge as a flat `.gb`/`.gbc` image.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use gbdump_cartridge::Cartridge;

use crate::hasher::{self, ImageHashes};

/// Write every ROM bank of `cartridge` to `path`, in bank order, and
/// return the hashes of the file as read back from disk.
///
/// Each bank is flushed and synced before the next is written, so an
/// interrupted save leaves a prefix of whole banks on disk.
pub fn save_cartridge(cartridge: &Cartridge, path: &Path) -> io::Result<ImageHashes> {
    let mut file = File::create(path)?;
    let total = cartridge.rom_banks().len();
    for (index, bank) in cartridge.rom_banks().iter().enumerate() {
        file.write_all(&bank[..])?;
        file.flush()?;
        file.sync_all()?;
        log::debug!("Saved bank {}/{}", index + 1, total);
    }
    log::debug!(
        "Wrote {} bytes to {}",
        cartridge.rom_size(),
        path.display()
    );
    drop(file);
    hasher::hash_file(path)
}

#[cfg(test)]
#[path = "tests/writer_tests.rs"]
mod tests;
