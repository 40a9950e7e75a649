use std::path::{Path, PathBuf};

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gbdump_lib::gpio::{open_gpio_engine, open_simulated_engine};
use gbdump_lib::settings::load_settings;
use gbdump_lib::util::format_bytes;
use gbdump_lib::{
    BusRomReader, DumpError, DumpOptions, DumpProgress, DumpReport, FileRomReader, Role,
    RomSource, dump, save_cartridge,
};

use crate::commands::info::print_header;
use crate::commands::report_check;
use crate::error::CliError;

#[derive(Args)]
pub(crate) struct DumpArgs {
    /// Where to write the image
    #[arg(short, long)]
    output: PathBuf,

    /// Read an existing image instead of the GPIO bus
    #[arg(long, value_name = "ROM", conflicts_with = "simulate")]
    from_file: Option<PathBuf>,

    /// Dump a simulated cartridge holding this image (exercises the bus path)
    #[arg(long, value_name = "ROM")]
    simulate: Option<PathBuf>,

    /// Keep going past a header checksum mismatch
    #[arg(long)]
    force: bool,

    /// Timing margin in microseconds for this run
    #[arg(long, value_name = "MICROS")]
    margin_us: Option<u64>,
}

pub(crate) fn run_dump(args: &DumpArgs, config_path: &Path) -> Result<(), CliError> {
    let options = DumpOptions { force: args.force };

    let report = if let Some(rom) = &args.from_file {
        log::info!("Reading image {}", rom.display());
        let mut reader = FileRomReader::open(rom)?;
        dump_with_progress(&mut reader, &options)?
    } else {
        let settings = load_settings(config_path)?;
        if let Some(rom) = &args.simulate {
            log::info!("Simulating cartridge from {}", rom.display());
            let image = std::fs::read(rom)?;
            let config = settings.bus_config(args.margin_us);
            let (_bus, engine) = open_simulated_engine(image, &config)?;
            dump_with_progress(&mut BusRomReader::new(engine), &options)?
        } else {
            let engine = open_gpio_engine(&settings, Role::Master, args.margin_us)?;
            dump_with_progress(&mut BusRomReader::new(engine), &options)?
        }
    };

    print_header(report.cartridge.header());
    report_check("Header checksum", &report.header_checksum);
    report_check("Global checksum", &report.global_checksum);

    let hashes = save_cartridge(&report.cartridge, &args.output)?;
    if hashes != report.hashes() {
        return Err(CliError::verification(format!(
            "{} does not match the dumped image",
            args.output.display()
        )));
    }
    log::info!("  {:<17}{}", "CRC32:", hashes.crc32);
    log::info!("  {:<17}{}", "SHA-1:", hashes.sha1);
    log::info!(
        "Saved {} to {}",
        format_bytes(report.cartridge.rom_size() as u64),
        args.output
            .display()
            .if_supports_color(Stdout, |t| t.green())
    );
    Ok(())
}

/// Run the dump pipeline with a per-bank progress bar.
fn dump_with_progress<S>(source: &mut S, options: &DumpOptions) -> Result<DumpReport, DumpError>
where
    S: RomSource,
    DumpError: From<S::Error>,
{
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} banks {msg}")
            .expect("static pattern")
            .progress_chars("=> "),
    );
    pb.set_message("reading header");

    let result = dump(source, options, &mut |event| match event {
        DumpProgress::Header => pb.set_message(""),
        DumpProgress::Bank { index, total } => {
            pb.set_length(total as u64);
            pb.set_position(index as u64 + 1);
        }
    });

    pb.finish_and_clear();
    result
}
