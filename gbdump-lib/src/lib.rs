//! Dump workflows shared by the CLI: file ingestion, the live bus path,
//! checksum policy, saving, hashing, and settings.

pub mod error;
pub mod file_reader;
pub mod gpio;
pub mod hasher;
pub mod pipeline;
pub mod settings;
pub mod writer;

pub use error::DumpError;
pub use file_reader::FileRomReader;
pub use hasher::ImageHashes;
pub use pipeline::{DumpOptions, DumpReport, VerifyReport, dump, verify_file};
pub use settings::Settings;
pub use writer::save_cartridge;

// Re-export the layers below so frontends need a single dependency.
pub use gbdump_bus::{BusConfig, BusEngine, BusError, BusRomReader, Role};
pub use gbdump_cartridge::{
    Cartridge, CartridgeHeader, Classification, Destination, DumpProgress, MbcKind, RomSource,
};
pub use gbdump_core::{CartridgeError, util};
