use super::*;
use gbdump_cartridge::builder::RomBuilder;

fn no_progress() -> impl FnMut(DumpProgress) {
    |_| {}
}

#[test]
fn test_dump_clean_image() {
    let rom = RomBuilder::new()
        .cartridge_type(0x1B)
        .rom_size_code(0x02)
        .ram_size_code(0x03)
        .build();
    let mut reader = FileRomReader::from_bytes(rom.clone());

    let report = dump(&mut reader, &DumpOptions::default(), &mut no_progress()).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.cartridge.to_bytes(), rom);
    assert_eq!(report.hashes(), hasher::hash_bytes(&rom));
}

#[test]
fn test_header_checksum_mismatch_aborts() {
    let mut rom = RomBuilder::new().build();
    rom[0x14D] ^= 0xFF;
    let mut reader = FileRomReader::from_bytes(rom);

    assert!(matches!(
        dump(&mut reader, &DumpOptions::default(), &mut no_progress()),
        Err(DumpError::Cartridge(CartridgeError::InvalidHeaderChecksum { .. }))
    ));
}

#[test]
fn test_force_continues_past_header_checksum() {
    let mut rom = RomBuilder::new().build();
    rom[0x14D] ^= 0xFF;
    let mut reader = FileRomReader::from_bytes(rom.clone());

    let report = dump(&mut reader, &DumpOptions { force: true }, &mut no_progress()).unwrap();
    assert!(!report.is_clean());
    assert!(matches!(
        report.header_checksum,
        Err(CartridgeError::InvalidHeaderChecksum { .. })
    ));
    assert_eq!(report.cartridge.to_bytes(), rom);
}

#[test]
fn test_global_checksum_mismatch_is_a_warning() {
    let mut rom = RomBuilder::new().build();
    rom[0x4000] ^= 0x01;
    let mut reader = FileRomReader::from_bytes(rom);

    let report = dump(&mut reader, &DumpOptions::default(), &mut no_progress()).unwrap();
    assert!(report.header_checksum.is_ok());
    match &report.global_checksum {
        Err(e @ CartridgeError::InvalidGlobalChecksum { .. }) => assert!(e.is_warning()),
        other => panic!("expected InvalidGlobalChecksum, got {other:?}"),
    }
}

#[test]
fn test_unknown_geometry_aborts_even_when_forced() {
    let mut rom = RomBuilder::new().build();
    rom[0x148] = 0x52;
    gbdump_cartridge::builder::fix_checksums(&mut rom);
    let mut reader = FileRomReader::from_bytes(rom);

    assert!(matches!(
        dump(&mut reader, &DumpOptions { force: true }, &mut no_progress()),
        Err(DumpError::Cartridge(CartridgeError::UnknownGeometryCode { code: 0x52, .. }))
    ));
}

#[test]
fn test_verify_file_reports_findings() {
    let tmp = tempfile::tempdir().unwrap();

    let good = RomBuilder::new().rom_size_code(0x01).build();
    let good_path = tmp.path().join("good.gb");
    std::fs::write(&good_path, &good).unwrap();
    let report = verify_file(&good_path).unwrap();
    assert!(report.is_valid());
    assert_eq!(report.file_size, good.len());
    assert_eq!(report.expected_size, Some(0x10000));

    let bad_path = tmp.path().join("short.gb");
    std::fs::write(&bad_path, &good[..0x8000]).unwrap();
    let report = verify_file(&bad_path).unwrap();
    assert!(report.header_checksum.is_ok());
    assert!(matches!(
        report.image,
        Err(CartridgeError::TruncatedImage { .. })
    ));
    assert!(!report.is_valid());
}

#[test]
fn test_verify_global_mismatch_still_valid() {
    let tmp = tempfile::tempdir().unwrap();
    let mut rom = RomBuilder::new().build();
    rom[0x7FFF] ^= 0x80;
    let path = tmp.path().join("patched.gb");
    std::fs::write(&path, &rom).unwrap();

    let report = verify_file(&path).unwrap();
    assert!(matches!(
        report.image,
        Err(CartridgeError::InvalidGlobalChecksum { .. })
    ));
    assert!(report.is_valid());
}
