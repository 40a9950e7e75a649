use thiserror::Error;

use gbdump_lib::{CartridgeError, DumpError};

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The image could not be decoded
    #[error("{0}")]
    Cartridge(#[from] CartridgeError),

    /// Reading, checking, or saving a cartridge failed
    #[error("{0}")]
    Dump(#[from] DumpError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// The image did not pass verification
    #[error("Verification failed: {0}")]
    Verification(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn verification(msg: impl Into<String>) -> Self {
        Self::Verification(msg.into())
    }
}
