//! Where cartridge bytes come from.

use crate::{Cartridge, CartridgeHeader};

/// Progress reported while a cartridge is being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpProgress {
    /// The header window has been read and decoded.
    Header,
    /// ROM bank `index` (zero-based) of `total` has been read.
    Bank { index: usize, total: usize },
}

/// A readable cartridge image: a file on disk or a live cartridge.
pub trait RomSource {
    type Error;

    /// Read and decode the 0x150-byte header window.
    fn read_header(&mut self) -> Result<CartridgeHeader, Self::Error>;

    /// Read the header and every ROM bank it declares.
    fn read_cartridge(&mut self) -> Result<Cartridge, Self::Error>;

    /// Like [`read_cartridge`](RomSource::read_cartridge), reporting each bank.
    ///
    /// The default ignores the callback. Sources that read slowly (the bus)
    /// override this.
    fn read_cartridge_with_progress(
        &mut self,
        _progress: &mut dyn FnMut(DumpProgress),
    ) -> Result<Cartridge, Self::Error> {
        self.read_cartridge()
    }
}
