//! File and simulated-bus dumps, saved to disk and read back.

use gbdump_cartridge::builder::RomBuilder;
use gbdump_lib::gpio::open_simulated_engine;
use gbdump_lib::hasher::{hash_bytes, hash_file};
use gbdump_lib::settings::Settings;
use gbdump_lib::{BusRomReader, DumpOptions, FileRomReader, RomSource, dump, save_cartridge};

#[test]
fn test_file_dump_save_reload() {
    let rom = RomBuilder::new()
        .title(b"ROUNDTRIP")
        .cartridge_type(0x13)
        .rom_size_code(0x03)
        .ram_size_code(0x03)
        .build();

    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("source.gb");
    let output = tmp.path().join("copy.gb");
    std::fs::write(&source, &rom).unwrap();

    let mut reader = FileRomReader::open(&source).unwrap();
    let report = dump(&mut reader, &DumpOptions::default(), &mut |_| {}).unwrap();
    assert!(report.is_clean());
    let saved = save_cartridge(&report.cartridge, &output).unwrap();

    assert_eq!(std::fs::read(&output).unwrap(), rom);
    assert_eq!(saved, hash_file(&source).unwrap());

    let mut reloaded = FileRomReader::open(&output).unwrap();
    let header = reloaded.read_header().unwrap();
    assert_eq!(header.title_string(), "ROUNDTRIP");
    assert_eq!(header.classify().describe(), "MBC3 + RAM + Battery");
}

#[test]
fn test_simulated_dump_matches_source() {
    let rom = RomBuilder::new()
        .cartridge_type(0x01)
        .rom_size_code(0x02)
        .build();
    let config = Settings::default().bus_config(Some(0));
    let (bus, engine) = open_simulated_engine(rom.clone(), &config).unwrap();

    let mut reader = BusRomReader::new(engine);
    let mut banks_seen = 0;
    let report = dump(&mut reader, &DumpOptions::default(), &mut |event| {
        if matches!(event, gbdump_lib::DumpProgress::Bank { .. }) {
            banks_seen += 1;
        }
    })
    .unwrap();

    assert!(report.is_clean());
    assert_eq!(banks_seen, 8);
    assert_eq!(report.hashes(), hash_bytes(&rom));
    assert_eq!(bus.borrow().contention(), 0);

    let tmp = tempfile::tempdir().unwrap();
    let output = tmp.path().join("dump.gb");
    save_cartridge(&report.cartridge, &output).unwrap();
    assert_eq!(std::fs::read(&output).unwrap(), rom);
}
