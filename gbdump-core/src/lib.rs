//! Shared types for the gbdump workspace.
//!
//! Holds the cartridge-side error taxonomy and the small formatting helpers
//! used by every frontend when reporting on a dump.

pub mod error;
pub mod util;

pub use error::CartridgeError;

/// Size of one switchable ROM bank (16 KiB).
pub const ROM_BANK_SIZE: usize = 0x4000;

/// Size of one external RAM bank (8 KiB).
pub const RAM_BANK_SIZE: usize = 0x2000;

/// Length of the header window every image starts with (0x0000-0x014F).
pub const HEADER_WINDOW: usize = 0x150;
