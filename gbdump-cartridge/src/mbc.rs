//! Memory bank controller classification from the cartridge type byte (0x0147).
//!
//! The controller family and the capability flags are independent lookups:
//! an MBC3 board can carry RAM, a battery, a timer, any mix, or none.

/// Memory bank controller family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MbcKind {
    RomOnly,
    Mbc1,
    Mbc2,
    Mbc3,
    Mbc5,
    Mmm01,
    PocketCamera,
    Tama5,
    HuC1,
    HuC3,
    Unknown,
}

impl MbcKind {
    /// Controller family for a cartridge type code.
    pub fn from_code(code: u8) -> Self {
        match code {
            0x00 | 0x08 | 0x09 => Self::RomOnly,
            0x01..=0x03 => Self::Mbc1,
            0x05 | 0x06 => Self::Mbc2,
            0x0B..=0x0D => Self::Mmm01,
            0x0F..=0x13 => Self::Mbc3,
            0x19..=0x1E => Self::Mbc5,
            0xFC => Self::PocketCamera,
            0xFD => Self::Tama5,
            0xFE => Self::HuC3,
            0xFF => Self::HuC1,
            _ => Self::Unknown,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::RomOnly => "ROM (no MBC)",
            Self::Mbc1 => "MBC1",
            Self::Mbc2 => "MBC2",
            Self::Mbc3 => "MBC3",
            Self::Mbc5 => "MBC5",
            Self::Mmm01 => "MMM01",
            Self::PocketCamera => "Pocket Camera",
            Self::Tama5 => "Bandai TAMA5",
            Self::HuC1 => "HuC1",
            Self::HuC3 => "HuC3",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether the board has a controller that needs bank-select writes.
    pub fn has_mbc(self) -> bool {
        self != Self::RomOnly
    }
}

const RAM_CODES: &[u8] = &[
    0x02, 0x03, 0x08, 0x09, 0x0C, 0x0D, 0x10, 0x12, 0x13, 0x1A, 0x1B, 0x1D, 0x1E, 0x22, 0xFF,
];

const BATTERY_CODES: &[u8] = &[
    0x03, 0x06, 0x09, 0x0D, 0x0F, 0x10, 0x13, 0x1B, 0x1E, 0x22, 0xFF,
];

const TIMER_CODES: &[u8] = &[0x0F, 0x10];

const RUMBLE_CODES: &[u8] = &[0x1C, 0x1D, 0x1E, 0x22];

/// CGB flag value for games that refuse to boot on a DMG.
pub const CGB_ONLY: u8 = 0xC0;

/// SGB flag value for games that use Super Game Boy functions.
pub const SGB_SUPPORTED: u8 = 0x03;

/// Controller family plus the orthogonal capability flags of a cartridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub code: u8,
    pub kind: MbcKind,
    pub has_ram: bool,
    pub has_battery: bool,
    pub has_timer: bool,
    pub has_rumble: bool,
    pub is_gbc_only: bool,
    pub supports_sgb: bool,
}

/// Classify a cartridge from its type code and the CGB/SGB flags.
pub fn classify(cartridge_type: u8, cgb_flag: u8, sgb_flag: u8) -> Classification {
    Classification {
        code: cartridge_type,
        kind: MbcKind::from_code(cartridge_type),
        has_ram: RAM_CODES.contains(&cartridge_type),
        has_battery: BATTERY_CODES.contains(&cartridge_type),
        has_timer: TIMER_CODES.contains(&cartridge_type),
        has_rumble: RUMBLE_CODES.contains(&cartridge_type),
        is_gbc_only: cgb_flag == CGB_ONLY,
        supports_sgb: sgb_flag == SGB_SUPPORTED,
    }
}

impl Classification {
    /// Human-readable descriptor, e.g. `"MBC5 + RAM + Battery (GBC Only)"`.
    ///
    /// Codes outside the known families still get a label: the Pan Docs name
    /// when there is one (MBC6, MBC7), otherwise the raw code.
    pub fn describe(&self) -> String {
        let mut msg = match self.kind {
            MbcKind::Unknown => match cartridge_type_name(self.code) {
                "Unknown" => format!("Unknown (0x{:02X})", self.code),
                name => name.to_string(),
            },
            kind => kind.name().to_string(),
        };

        // Pan Docs names for unknown families already spell out their extras
        if self.kind != MbcKind::Unknown {
            if self.has_ram {
                msg.push_str(" + RAM");
            }
            if self.has_battery {
                msg.push_str(" + Battery");
            }
            if self.has_timer {
                msg.push_str(" + Timer");
            }
            if self.has_rumble {
                msg.push_str(" + Rumble");
            }
        }

        if self.is_gbc_only {
            msg.push_str(" (GBC Only)");
        }
        msg
    }
}

/// Canonical cartridge type name as listed in Pan Docs.
pub fn cartridge_type_name(code: u8) -> &'static str {
    match code {
        0x00 => "ROM ONLY",
        0x01 => "MBC1",
        0x02 => "MBC1+RAM",
        0x03 => "MBC1+RAM+BATTERY",
        0x05 => "MBC2",
        0x06 => "MBC2+BATTERY",
        0x08 => "ROM+RAM",
        0x09 => "ROM+RAM+BATTERY",
        0x0B => "MMM01",
        0x0C => "MMM01+RAM",
        0x0D => "MMM01+RAM+BATTERY",
        0x0F => "MBC3+TIMER+BATTERY",
        0x10 => "MBC3+TIMER+RAM+BATTERY",
        0x11 => "MBC3",
        0x12 => "MBC3+RAM",
        0x13 => "MBC3+RAM+BATTERY",
        0x19 => "MBC5",
        0x1A => "MBC5+RAM",
        0x1B => "MBC5+RAM+BATTERY",
        0x1C => "MBC5+RUMBLE",
        0x1D => "MBC5+RUMBLE+RAM",
        0x1E => "MBC5+RUMBLE+RAM+BATTERY",
        0x20 => "MBC6",
        0x22 => "MBC7+SENSOR+RUMBLE+RAM+BATTERY",
        0xFC => "POCKET CAMERA",
        0xFD => "BANDAI TAMA5",
        0xFE => "HuC3",
        0xFF => "HuC1+RAM+BATTERY",
        _ => "Unknown",
    }
}

#[cfg(test)]
#[path = "tests/mbc_tests.rs"]
mod tests;
