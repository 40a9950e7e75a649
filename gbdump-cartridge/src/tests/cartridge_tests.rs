use super::*;
use crate::builder::{RomBuilder, fix_checksums};

fn build(rom_size_code: u8) -> (CartridgeHeader, Vec<u8>) {
    let rom = RomBuilder::new()
        .cartridge_type(0x01)
        .rom_size_code(rom_size_code)
        .build();
    (CartridgeHeader::decode(&rom).unwrap(), rom)
}

#[test]
fn test_assemble_256k_has_16_contiguous_banks() {
    let (header, rom) = build(0x03);
    assert_eq!(rom.len(), 256 * 1024);

    let cart = Cartridge::assemble(header, &rom).unwrap();
    assert_eq!(cart.rom_banks().len(), 16);
    assert_eq!(cart.rom_size(), 256 * 1024);
    for (i, bank) in cart.rom_banks().iter().enumerate() {
        let start = i * ROM_BANK_SIZE;
        assert_eq!(bank.len(), ROM_BANK_SIZE);
        assert_eq!(bank[..], rom[start..start + ROM_BANK_SIZE], "bank {}", i);
    }
}

#[test]
fn test_assemble_truncated() {
    let (header, rom) = build(0x01);
    let short = &rom[..3 * ROM_BANK_SIZE];
    match Cartridge::assemble(header, short) {
        Err(CartridgeError::TruncatedImage { expected, actual }) => {
            assert_eq!(expected, 4 * ROM_BANK_SIZE);
            assert_eq!(actual, 3 * ROM_BANK_SIZE);
        }
        other => panic!("expected TruncatedImage, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_assemble_ignores_padding() {
    let (header, mut rom) = build(0x00);
    let original = rom.clone();
    rom.extend(std::iter::repeat_n(0xFF, ROM_BANK_SIZE));
    let cart = Cartridge::assemble(header, &rom).unwrap();
    assert_eq!(cart.to_bytes(), original);
}

#[test]
fn test_assemble_unknown_geometry() {
    let mut rom = RomBuilder::new().build();
    rom[0x0148] = 0x0A;
    let header = CartridgeHeader::decode(&rom).unwrap();
    assert!(matches!(
        Cartridge::assemble(header, &rom),
        Err(CartridgeError::UnknownGeometryCode { .. })
    ));
}

#[test]
fn test_round_trip_serialization() {
    let (header, rom) = build(0x02);
    let cart = Cartridge::assemble(header, &rom).unwrap();
    assert_eq!(cart.to_bytes(), rom);
    assert!(cart.ram_banks().is_none());
}

#[test]
fn test_global_checksum_correct() {
    let (header, rom) = build(0x01);
    let cart = Cartridge::assemble(header, &rom).unwrap();
    let expected = u16::from_be_bytes([rom[0x014E], rom[0x014F]]);
    assert_eq!(cart.compute_global_checksum(), expected);
    assert!(cart.validate_global_checksum().is_ok());
}

#[test]
fn test_global_checksum_stored_big_endian() {
    // Zero image except for enough 0xFF bytes to sum to 0x1234.
    let mut rom = vec![0u8; 2 * ROM_BANK_SIZE];
    let mut remaining: u32 = 0x1234;
    let mut offset = 0x0200;
    while remaining > 0 {
        let b = remaining.min(0xFF) as u8;
        rom[offset] = b;
        remaining -= b as u32;
        offset += 1;
    }
    rom[0x014E] = 0x12;
    rom[0x014F] = 0x34;

    let header = CartridgeHeader::decode(&rom).unwrap();
    assert_eq!(header.global_checksum(), [0x12, 0x34]);
    let cart = Cartridge::assemble(header, &rom).unwrap();
    assert_eq!(cart.compute_global_checksum(), 0x1234);
    assert!(cart.validate_global_checksum().is_ok());

    // Swapped byte order must not validate.
    let mut swapped = rom.clone();
    swapped[0x014E] = 0x34;
    swapped[0x014F] = 0x12;
    let header = CartridgeHeader::decode(&swapped).unwrap();
    let cart = Cartridge::assemble(header, &swapped).unwrap();
    assert!(cart.validate_global_checksum().is_err());
}

#[test]
fn test_global_checksum_flipped_data_byte() {
    let (_, mut rom) = build(0x01);
    rom[0x3000] ^= 0x10;
    let header = CartridgeHeader::decode(&rom).unwrap();
    let cart = Cartridge::assemble(header, &rom).unwrap();
    match cart.validate_global_checksum() {
        Err(e @ CartridgeError::InvalidGlobalChecksum { .. }) => assert!(e.is_warning()),
        other => panic!("expected InvalidGlobalChecksum, got {:?}", other),
    }
}

#[test]
fn test_global_checksum_ignores_its_own_field() {
    let (_, mut rom) = build(0x00);
    let before = compute_global_checksum(rom.iter());
    rom[0x014E] = 0xAA;
    rom[0x014F] = 0x55;
    assert_eq!(compute_global_checksum(rom.iter()), before);
}

#[test]
fn test_from_banks_count_mismatch() {
    let (header, rom) = build(0x01);
    let banks: Vec<RomBank> = rom
        .chunks_exact(ROM_BANK_SIZE)
        .take(3)
        .map(crate::cartridge::bank_from_slice)
        .collect();
    assert!(matches!(
        Cartridge::from_banks(header, banks),
        Err(CartridgeError::BankCountMismatch {
            expected: 4,
            actual: 3
        })
    ));
}

#[test]
fn test_rebuilt_checksums_validate() {
    let (_, mut rom) = build(0x01);
    rom[0x5000] = 0x00;
    rom[0x5001] = 0xFF;
    fix_checksums(&mut rom);
    let header = CartridgeHeader::decode(&rom).unwrap();
    assert!(header.validate_header_checksum().is_ok());
    let cart = Cartridge::assemble(header, &rom).unwrap();
    assert!(cart.validate_global_checksum().is_ok());
}
