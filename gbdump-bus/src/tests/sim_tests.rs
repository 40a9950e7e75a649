use super::*;

/// An image whose every byte is its bank number.
fn banked_rom(banks: usize) -> Vec<u8> {
    (0..banks * ROM_BANK_SIZE)
        .map(|i| (i / ROM_BANK_SIZE) as u8)
        .collect()
}

fn mapped_bank(cart: &mut SimCartridge) -> u8 {
    cart.read(0x4000)
}

#[test]
fn test_rom_only_maps_bank_one() {
    let mut cart = SimCartridge::with_kind(banked_rom(2), MbcKind::RomOnly);
    assert_eq!(cart.read(0x0000), 0);
    assert_eq!(cart.read(0x7FFF), 1);
    cart.write(0x2000, 0x05);
    assert_eq!(mapped_bank(&mut cart), 1);
    assert_eq!(cart.read(0xA000), 0xFF);
}

#[test]
fn test_mbc1_bank_zero_selects_one() {
    let mut cart = SimCartridge::with_kind(banked_rom(64), MbcKind::Mbc1);
    cart.write(0x2000, 0x00);
    assert_eq!(mapped_bank(&mut cart), 1);
    cart.write(0x2000, 0x1F);
    assert_eq!(mapped_bank(&mut cart), 0x1F);
}

#[test]
fn test_mbc1_upper_bits_and_0x20_quirk() {
    let mut cart = SimCartridge::with_kind(banked_rom(64), MbcKind::Mbc1);

    cart.write(0x4000, 0x01);
    cart.write(0x2000, 0x00);
    // 0x20 is unreachable at 0x4000.
    assert_eq!(mapped_bank(&mut cart), 0x21);

    cart.write(0x6000, 0x01);
    assert_eq!(cart.read(0x0000), 0x20);

    cart.write(0x6000, 0x00);
    assert_eq!(cart.read(0x0000), 0x00);

    cart.write(0x2000, 0x05);
    assert_eq!(mapped_bank(&mut cart), 0x25);
}

#[test]
fn test_mbc2_register_needs_address_bit_8() {
    let mut cart = SimCartridge::with_kind(banked_rom(16), MbcKind::Mbc2);
    cart.write(0x2000, 0x03);
    assert_eq!(mapped_bank(&mut cart), 1);
    cart.write(0x2100, 0x03);
    assert_eq!(mapped_bank(&mut cart), 3);
    cart.write(0x2100, 0xFF);
    assert_eq!(mapped_bank(&mut cart), 0x0F);
}

#[test]
fn test_mbc3_seven_bit_bank() {
    let mut cart = SimCartridge::with_kind(banked_rom(128), MbcKind::Mbc3);
    cart.write(0x2000, 0x7F);
    assert_eq!(mapped_bank(&mut cart), 0x7F);
    cart.write(0x2000, 0x00);
    assert_eq!(mapped_bank(&mut cart), 1);
}

#[test]
fn test_mbc5_ninth_bank_bit() {
    let mut cart = SimCartridge::with_kind(banked_rom(512), MbcKind::Mbc5);
    cart.write(0x2000, 0x00);
    // MBC5 can map bank 0 into the switchable window.
    assert_eq!(mapped_bank(&mut cart), 0);

    cart.write(0x2000, 0x05);
    cart.write(0x3000, 0x01);
    // 0x105 truncates to 0x05 in the first byte of the pattern.
    assert_eq!(mapped_bank(&mut cart), 0x05);
    assert_eq!(cart.switchable_bank(), 0x105);

    cart.write(0x3000, 0x00);
    assert_eq!(cart.switchable_bank(), 0x05);
}

#[test]
fn test_kind_from_header() {
    let mut rom = banked_rom(4);
    rom[0x147] = 0x1B;
    assert_eq!(SimCartridge::new(rom).kind(), MbcKind::Mbc5);
}

#[test]
fn test_contention_counted_when_both_sides_drive() {
    let bus = SimBus::new(MemoryDevice::new());
    let mut pin = SimBus::pin(&bus, LineId::Data(0));

    bus.borrow_mut().drive_external(LineId::Data(0), Some(true));
    assert!(pin.read());
    assert_eq!(bus.borrow().contention(), 0);

    pin.set_output_mode();
    assert_eq!(bus.borrow().contention(), 1);
    pin.set_low();
    assert!(!bus.borrow().level(LineId::Data(0)));

    pin.set_input_mode();
    assert!(bus.borrow().level(LineId::Data(0)));
    assert_eq!(bus.borrow().mode_changes(), 2);
}

#[test]
fn test_rd_strobe_drives_data_lines() {
    let bus = SimBus::new(MemoryDevice::with_contents(0x0000, &[0x81]));
    let mut rd = SimBus::pin(&bus, LineId::Rd);
    rd.set_output_mode();

    rd.set_low();
    assert!(bus.borrow().level(LineId::Data(0)));
    assert!(bus.borrow().level(LineId::Data(7)));
    assert!(!bus.borrow().level(LineId::Data(1)));

    rd.set_high();
    assert!(!bus.borrow().level(LineId::Data(0)));
    assert_eq!(bus.borrow().device_reads(), 1);
}
