use std::path::PathBuf;

use gbdump_core::CartridgeError;
use thiserror::Error;

use crate::engine::Role;
use crate::lines::LineGroup;

/// Errors raised by the bus layer.
///
/// Electrical faults are not detectable here; what is left are caller
/// mistakes (wrong role, wrong state) and backend setup failures.
#[derive(Debug, Error)]
pub enum BusError {
    /// Operation not permitted in the engine's role
    #[error("{operation} is not allowed in {role} role")]
    InvalidRole {
        operation: &'static str,
        role: Role,
    },

    /// Operation issued before setup or after release
    #[error("Bus not ready for {operation}: {reason}")]
    BusNotReady {
        operation: &'static str,
        reason: &'static str,
    },

    /// A line group with the wrong number of pins
    #[error("{group} bus needs {expected} lines, got {actual}")]
    LineCount {
        group: LineGroup,
        expected: usize,
        actual: usize,
    },

    /// The GPIO controller itself could not be opened
    #[error("GPIO controller at {} unavailable: {source}", path.display())]
    GpioUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single GPIO line could not be claimed
    #[error("GPIO {line}: {source}")]
    Gpio {
        line: u32,
        #[source]
        source: std::io::Error,
    },

    /// The bytes read over the bus do not form a valid cartridge
    #[error(transparent)]
    Cartridge(#[from] CartridgeError),
}

impl BusError {
    pub fn not_ready(operation: &'static str, reason: &'static str) -> Self {
        Self::BusNotReady { operation, reason }
    }

    pub fn invalid_role(operation: &'static str, role: Role) -> Self {
        Self::InvalidRole { operation, role }
    }

    pub fn gpio(line: u32) -> impl FnOnce(std::io::Error) -> Self {
        move |source| Self::Gpio { line, source }
    }
}
