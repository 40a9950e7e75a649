use std::path::PathBuf;

use gbdump_bus::BusError;
use gbdump_core::CartridgeError;
use thiserror::Error;

/// Errors from a dump workflow.
#[derive(Debug, Error)]
pub enum DumpError {
    /// The image itself is unusable
    #[error(transparent)]
    Cartridge(#[from] CartridgeError),

    /// The bus could not be opened or driven
    #[error(transparent)]
    Bus(#[from] BusError),

    /// The settings file exists but cannot be parsed
    #[error("Invalid settings in {}: {message}", path.display())]
    Settings { path: PathBuf, message: String },

    /// I/O error outside of image decoding
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DumpError {
    pub fn settings(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Settings {
            path: path.into(),
            message: message.into(),
        }
    }
}
