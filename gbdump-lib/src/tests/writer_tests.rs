use super::*;
use gbdump_cartridge::CartridgeHeader;
use gbdump_cartridge::builder::RomBuilder;

#[test]
fn test_save_returns_hashes_of_written_file() {
    let rom = RomBuilder::new()
        .cartridge_type(0x19)
        .rom_size_code(0x02)
        .build();
    let header = CartridgeHeader::decode(&rom).unwrap();
    let cart = Cartridge::assemble(header, &rom).unwrap();

    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("saved.gbc");
    let hashes = save_cartridge(&cart, &path).unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), rom);
    assert_eq!(hashes, hasher::hash_cartridge(&cart));
    assert_eq!(hashes.data_size, rom.len() as u64);
}

#[test]
fn test_save_into_missing_directory_fails() {
    let rom = RomBuilder::new().build();
    let header = CartridgeHeader::decode(&rom).unwrap();
    let cart = Cartridge::assemble(header, &rom).unwrap();

    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("missing").join("saved.gb");
    assert!(save_cartridge(&cart, &path).is_err());
}
