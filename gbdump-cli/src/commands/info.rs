use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gbdump_lib::util::{format_bytes, hex_bytes, read_ascii};
use gbdump_lib::{CartridgeHeader, FileRomReader, RomSource};

use crate::commands::report_check;
use crate::error::CliError;

/// Print the decoded header of the image at `path`.
pub(crate) fn run_info(path: &Path) -> Result<(), CliError> {
    let mut reader = FileRomReader::open(path)?;
    let header = reader.read_header()?;

    log::info!(
        "{}",
        path.display().if_supports_color(Stdout, |t| t.bold())
    );
    print_header(&header);
    report_check("Header checksum", &header.validate_header_checksum());
    Ok(())
}

/// The header summary shared by `info` and `dump`.
pub(crate) fn print_header(header: &CartridgeHeader) {
    let class = header.classify();

    log::info!(
        "  Title:           {}",
        header.title_string().if_supports_color(Stdout, |t| t.cyan())
    );
    log::info!(
        "  Cartridge:       {} [{:#04X}]",
        class.describe(),
        header.cartridge_type()
    );
    log::info!("  ROM:             {}", geometry_line(header.rom_bank_count(), 16 * 1024));
    log::info!("  RAM:             {}", geometry_line(header.ram_bank_count(), 8 * 1024));
    log::info!("  Destination:     {}", header.destination().name());
    log::info!(
        "  Publisher:       {}",
        header.publisher().unwrap_or("Unknown")
    );
    log::info!("  Version:         {}", header.mask_rom_version());
    log::info!(
        "  SGB support:     {}",
        if class.supports_sgb { "yes" } else { "no" }
    );
    if header.cgb_flag() & 0x80 != 0 {
        log::info!(
            "  Manufacturer:    {}",
            read_ascii(header.manufacturer_code())
        );
    }
    log::info!(
        "  Global checksum: {:#06X}",
        header.global_checksum_value()
    );
    if !header.logo_matches() {
        log::info!(
            "  {}",
            "Nintendo logo does not match (bad contact or unlicensed cartridge)"
                .if_supports_color(Stdout, |t| t.yellow())
        );
        log::debug!("  Logo bytes: {}", hex_bytes(header.nintendo_logo()));
    }
}

fn geometry_line<E: std::fmt::Display>(banks: Result<usize, E>, bank_size: u64) -> String {
    match banks {
        Ok(0) => "none".to_string(),
        Ok(n) => format!("{} ({} banks)", format_bytes(n as u64 * bank_size), n),
        Err(e) => format!("{}", e.if_supports_color(Stdout, |t| t.red())),
    }
}
