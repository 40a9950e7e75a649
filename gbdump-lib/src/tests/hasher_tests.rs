use super::*;
use gbdump_cartridge::CartridgeHeader;
use gbdump_cartridge::builder::RomBuilder;

#[test]
fn test_known_vectors() {
    let hashes = hash_bytes(b"123456789");
    assert_eq!(hashes.crc32, "cbf43926");
    assert_eq!(hashes.data_size, 9);

    let hashes = hash_bytes(b"abc");
    assert_eq!(hashes.sha1, "a9993e364706816aba3e25717850c26c9cd0d89d");
}

#[test]
fn test_cartridge_file_and_bytes_agree() {
    let rom = RomBuilder::new().rom_size_code(0x03).build();
    let header = CartridgeHeader::decode(&rom).unwrap();
    let cart = Cartridge::assemble(header, &rom).unwrap();

    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("image.gb");
    std::fs::write(&path, &rom).unwrap();

    let from_bytes = hash_bytes(&rom);
    assert_eq!(hash_cartridge(&cart), from_bytes);
    assert_eq!(hash_file(&path).unwrap(), from_bytes);
    assert_eq!(from_bytes.data_size, rom.len() as u64);
}
