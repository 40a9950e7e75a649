//! Full dumps of synthetic cartridges through the simulated bus.

use std::time::Duration;

use gbdump_bus::sim::{SimBus, SimCartridge};
use gbdump_bus::{BusConfig, BusEngine, BusError, BusRomReader, Role};
use gbdump_cartridge::builder::RomBuilder;
use gbdump_cartridge::{Cartridge, DumpProgress, RomSource};

fn config() -> BusConfig {
    BusConfig {
        timing_margin: Duration::ZERO,
    }
}

/// Dump `rom` over a simulated bus, returning the cartridge and the number
/// of contention events seen on the wire.
fn dump(rom: &[u8]) -> (Cartridge, usize) {
    let bus = SimBus::new(SimCartridge::new(rom.to_vec()));
    let lines = SimBus::lines(&bus).unwrap();
    let mut reader = BusRomReader::new(BusEngine::initialize(lines, Role::Master, &config()));
    let cart = reader.read_cartridge().unwrap();
    let contention = bus.borrow().contention();
    (cart, contention)
}

#[test]
fn test_dump_rom_only() {
    let rom = RomBuilder::new().cartridge_type(0x00).build();
    let (cart, contention) = dump(&rom);
    assert_eq!(cart.rom_banks().len(), 2);
    assert_eq!(cart.to_bytes(), rom);
    assert_eq!(contention, 0);
    assert!(cart.validate_global_checksum().is_ok());
}

#[test]
fn test_dump_mbc1_one_megabyte() {
    // 64 banks: exercises the upper bank bits and banks 0x20.
    let rom = RomBuilder::new()
        .cartridge_type(0x03)
        .rom_size_code(0x05)
        .ram_size_code(0x03)
        .build();
    let (cart, contention) = dump(&rom);
    assert_eq!(cart.rom_banks().len(), 64);
    assert_eq!(cart.rom_banks()[0x20][..], rom[0x20 * 0x4000..0x21 * 0x4000]);
    assert_eq!(cart.to_bytes(), rom);
    assert_eq!(contention, 0);
}

#[test]
fn test_dump_mbc2() {
    let rom = RomBuilder::new()
        .cartridge_type(0x06)
        .rom_size_code(0x03)
        .build();
    let (cart, contention) = dump(&rom);
    assert_eq!(cart.to_bytes(), rom);
    assert_eq!(contention, 0);
}

#[test]
fn test_dump_mbc3() {
    let rom = RomBuilder::new()
        .cartridge_type(0x13)
        .rom_size_code(0x04)
        .build();
    let (cart, contention) = dump(&rom);
    assert_eq!(cart.rom_banks().len(), 32);
    assert_eq!(cart.to_bytes(), rom);
    assert_eq!(contention, 0);
}

#[test]
fn test_dump_mbc5() {
    let rom = RomBuilder::new()
        .cartridge_type(0x1B)
        .rom_size_code(0x03)
        .cgb_flag(0x80)
        .build();
    let (cart, contention) = dump(&rom);
    assert_eq!(cart.rom_banks().len(), 16);
    assert_eq!(cart.to_bytes(), rom);
    assert_eq!(contention, 0);
}

#[test]
fn test_progress_reports_every_bank() {
    let rom = RomBuilder::new()
        .cartridge_type(0x01)
        .rom_size_code(0x01)
        .build();
    let bus = SimBus::new(SimCartridge::new(rom));
    let lines = SimBus::lines(&bus).unwrap();
    let mut reader = BusRomReader::new(BusEngine::initialize(lines, Role::Master, &config()));

    let mut events = Vec::new();
    reader
        .read_cartridge_with_progress(&mut |event| events.push(event))
        .unwrap();

    assert_eq!(events.first(), Some(&DumpProgress::Header));
    let banks: Vec<_> = events[1..].to_vec();
    assert_eq!(
        banks,
        (0..4)
            .map(|index| DumpProgress::Bank { index, total: 4 })
            .collect::<Vec<_>>()
    );
    assert!(!reader.engine().is_released());
}

#[test]
fn test_header_is_cached() {
    let rom = RomBuilder::new().title(b"CACHED").build();
    let bus = SimBus::new(SimCartridge::new(rom));
    let lines = SimBus::lines(&bus).unwrap();
    let mut reader = BusRomReader::new(BusEngine::initialize(lines, Role::Master, &config()));

    let first = reader.read_header().unwrap();
    let reads = bus.borrow().device_reads();
    assert_eq!(reads, 0x150);

    let second = reader.read_header().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.title_string(), "CACHED");
    assert_eq!(bus.borrow().device_reads(), reads);
}

#[test]
fn test_corrupt_geometry_fails_dump() {
    let mut rom = RomBuilder::new().build();
    rom[0x148] = 0x42;
    let bus = SimBus::new(SimCartridge::new(rom));
    let lines = SimBus::lines(&bus).unwrap();
    let mut reader = BusRomReader::new(BusEngine::initialize(lines, Role::Master, &config()));

    assert!(matches!(
        reader.read_cartridge(),
        Err(BusError::Cartridge(_))
    ));
}

#[test]
fn test_released_bus_is_not_ready() {
    let rom = RomBuilder::new().build();
    let bus = SimBus::new(SimCartridge::new(rom));
    let lines = SimBus::lines(&bus).unwrap();
    let mut engine = BusEngine::initialize(lines, Role::Master, &config());
    engine.release();

    let mut reader = BusRomReader::new(engine);
    assert!(matches!(
        reader.read_header(),
        Err(BusError::BusNotReady { .. })
    ));
}
