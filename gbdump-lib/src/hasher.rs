use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use sha1::Digest;

use gbdump_cartridge::Cartridge;

const CHUNK_SIZE: usize = 64 * 1024; // 64 KB

/// CRC32 and SHA-1 of a ROM image, as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHashes {
    pub crc32: String,
    pub sha1: String,
    pub data_size: u64,
}

#[derive(Default)]
struct ImageHasher {
    crc: crc32fast::Hasher,
    sha: sha1::Sha1,
    size: u64,
}

impl ImageHasher {
    fn update(&mut self, bytes: &[u8]) {
        self.crc.update(bytes);
        self.sha.update(bytes);
        self.size += bytes.len() as u64;
    }

    fn finish(self) -> ImageHashes {
        ImageHashes {
            crc32: format!("{:08x}", self.crc.finalize()),
            sha1: format!("{:x}", self.sha.finalize()),
            data_size: self.size,
        }
    }
}

pub fn hash_bytes(bytes: &[u8]) -> ImageHashes {
    let mut hasher = ImageHasher::default();
    hasher.update(bytes);
    hasher.finish()
}

/// Hash the serialized form of `cartridge` without building the flat image.
pub fn hash_cartridge(cartridge: &Cartridge) -> ImageHashes {
    let mut hasher = ImageHasher::default();
    for bank in cartridge.rom_banks() {
        hasher.update(&bank[..]);
    }
    hasher.finish()
}

pub fn hash_file(path: &Path) -> io::Result<ImageHashes> {
    let mut file = File::open(path)?;
    let mut hasher = ImageHasher::default();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finish())
}

#[cfg(test)]
#[path = "tests/hasher_tests.rs"]
mod tests;
