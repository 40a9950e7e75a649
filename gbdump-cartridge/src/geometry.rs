//! ROM and RAM bank geometry, indexed by the size codes at 0x0148/0x0149.

use gbdump_core::{CartridgeError, RAM_BANK_SIZE, ROM_BANK_SIZE};

/// Offset of the ROM size code in the header.
pub const ROM_SIZE_OFFSET: usize = 0x0148;
/// Offset of the RAM size code in the header.
pub const RAM_SIZE_OFFSET: usize = 0x0149;

/// 16 KiB ROM banks per ROM size code (0x00 = 32 KiB ... 0x08 = 8 MiB).
const ROM_BANK_COUNTS: [usize; 9] = [2, 4, 8, 16, 32, 64, 128, 256, 512];

/// 8 KiB RAM banks per RAM size code. 0x01 is listed as unused by Nintendo;
/// 0x04 is 128 KiB and 0x05 is 64 KiB.
const RAM_BANK_COUNTS: [usize; 6] = [0, 0, 1, 4, 16, 8];

/// Number of 16 KiB ROM banks for a ROM size code.
pub fn rom_bank_count(code: u8) -> Result<usize, CartridgeError> {
    ROM_BANK_COUNTS
        .get(code as usize)
        .copied()
        .ok_or_else(|| CartridgeError::unknown_geometry("ROM size", ROM_SIZE_OFFSET, code))
}

/// Number of 8 KiB RAM banks for a RAM size code.
///
/// Zero is a real answer (no external RAM), so an unmapped code is an
/// error rather than a default.
pub fn ram_bank_count(code: u8) -> Result<usize, CartridgeError> {
    RAM_BANK_COUNTS
        .get(code as usize)
        .copied()
        .ok_or_else(|| CartridgeError::unknown_geometry("RAM size", RAM_SIZE_OFFSET, code))
}

/// ROM size in bytes, or `None` for an unmapped code.
pub fn rom_size(code: u8) -> Option<usize> {
    rom_bank_count(code).ok().map(|n| n * ROM_BANK_SIZE)
}

/// External RAM size in bytes, or `None` for an unmapped code.
pub fn ram_size(code: u8) -> Option<usize> {
    ram_bank_count(code).ok().map(|n| n * RAM_BANK_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rom_bank_counts() {
        let expected = [2, 4, 8, 16, 32, 64, 128, 256, 512];
        for (code, banks) in expected.iter().enumerate() {
            assert_eq!(rom_bank_count(code as u8).unwrap(), *banks);
        }
    }

    #[test]
    fn test_rom_size_lookup() {
        assert_eq!(rom_size(0x00), Some(32 * 1024));
        assert_eq!(rom_size(0x03), Some(256 * 1024));
        assert_eq!(rom_size(0x05), Some(1024 * 1024));
        assert_eq!(rom_size(0x08), Some(8 * 1024 * 1024));
        assert_eq!(rom_size(0x09), None);
        assert_eq!(rom_size(0x52), None); // unofficial 1.1 MB code
        assert_eq!(rom_size(0xFF), None);
    }

    #[test]
    fn test_ram_size_lookup() {
        assert_eq!(ram_size(0x00), Some(0));
        assert_eq!(ram_size(0x01), Some(0));
        assert_eq!(ram_size(0x02), Some(8 * 1024));
        assert_eq!(ram_size(0x03), Some(32 * 1024));
        assert_eq!(ram_size(0x04), Some(128 * 1024));
        assert_eq!(ram_size(0x05), Some(64 * 1024));
        assert_eq!(ram_size(0x06), None);
    }

    #[test]
    fn test_unknown_code_is_an_error_not_zero() {
        match ram_bank_count(0x06) {
            Err(CartridgeError::UnknownGeometryCode {
                field,
                offset,
                code,
            }) => {
                assert_eq!(field, "RAM size");
                assert_eq!(offset, 0x0149);
                assert_eq!(code, 0x06);
            }
            other => panic!("expected UnknownGeometryCode, got {:?}", other),
        }
        assert!(matches!(
            rom_bank_count(0x09),
            Err(CartridgeError::UnknownGeometryCode { offset: 0x0148, .. })
        ));
    }
}
