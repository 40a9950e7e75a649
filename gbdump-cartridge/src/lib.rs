//! Game Boy / Game Boy Color cartridge model.
//!
//! - Header decoding and the 8-bit header checksum
//! - ROM/RAM bank geometry tables
//! - Memory bank controller classification
//! - Bank slicing, the 16-bit global checksum, and serialization
//!
//! Everything here is pure: bytes come from a [`RomSource`] (a file on disk
//! or a live cartridge on the bus) and go back out as a flat image.

pub mod builder;
pub mod cartridge;
pub mod geometry;
pub mod header;
pub mod licensee;
pub mod mbc;
pub mod source;

pub use cartridge::{Cartridge, RomBank};
pub use header::{CartridgeHeader, Destination, NINTENDO_LOGO};
pub use mbc::{Classification, MbcKind, cartridge_type_name};
pub use source::{DumpProgress, RomSource};
