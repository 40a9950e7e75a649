use thiserror::Error;

/// Errors raised while decoding, slicing, or validating a cartridge image.
///
/// Decoding and geometry errors are fatal for the read pipeline. The two
/// checksum variants are returned as values next to an otherwise valid
/// cartridge so the caller can pick the severity.
#[derive(Debug, Error)]
pub enum CartridgeError {
    /// I/O error while reading or writing an image
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Fewer bytes than the 0x150-byte header window
    #[error("Malformed header: expected at least {expected} bytes, got {actual}")]
    MalformedHeader { expected: usize, actual: usize },

    /// Header checksum at 0x014D does not match the bytes 0x0134-0x014C
    #[error("Invalid header checksum at 0x014D: header says 0x{expected:02X}, computed 0x{computed:02X}")]
    InvalidHeaderChecksum { expected: u8, computed: u8 },

    /// Global checksum at 0x014E-0x014F does not match the image
    #[error("Invalid global checksum at 0x014E: header says 0x{expected:04X}, computed 0x{computed:04X}")]
    InvalidGlobalChecksum { expected: u16, computed: u16 },

    /// ROM or RAM size code with no geometry table entry
    #[error("Unknown {field} code 0x{code:02X} at 0x{offset:04X}")]
    UnknownGeometryCode {
        field: &'static str,
        offset: usize,
        code: u8,
    },

    /// Image shorter than the header's bank geometry demands
    #[error("Truncated image: geometry needs {expected} bytes, got {actual}")]
    TruncatedImage { expected: usize, actual: usize },

    /// A bank list whose length disagrees with the header
    #[error("Bank count mismatch: header declares {expected} banks, got {actual}")]
    BankCountMismatch { expected: usize, actual: usize },
}

impl CartridgeError {
    pub fn malformed_header(actual: usize) -> Self {
        Self::MalformedHeader {
            expected: crate::HEADER_WINDOW,
            actual,
        }
    }

    pub fn truncated(expected: usize, actual: usize) -> Self {
        Self::TruncatedImage { expected, actual }
    }

    pub fn unknown_geometry(field: &'static str, offset: usize, code: u8) -> Self {
        Self::UnknownGeometryCode {
            field,
            offset,
            code,
        }
    }

    /// True for the checksum mismatches that real hardware never enforces.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::InvalidGlobalChecksum { .. })
    }
}
