use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gbdump_lib::util::format_bytes;
use gbdump_lib::verify_file;

use crate::commands::report_check;
use crate::error::CliError;

pub(crate) fn run_verify(path: &Path) -> Result<(), CliError> {
    let report = verify_file(path)?;

    log::info!(
        "{}",
        path.display().if_supports_color(Stdout, |t| t.bold())
    );
    log::info!(
        "  {:<17}{}",
        "Title:",
        report.header.title_string().if_supports_color(Stdout, |t| t.cyan())
    );

    let actual = report.file_size;
    match report.expected_size {
        Some(expected) if expected == actual => log::info!(
            "  {:<17}{}",
            "Size:",
            format_bytes(actual as u64).if_supports_color(Stdout, |t| t.green())
        ),
        Some(expected) if actual > expected => log::info!(
            "  {:<17}{}",
            "Size:",
            format!(
                "{} (padded; header declares {})",
                format_bytes(actual as u64),
                format_bytes(expected as u64)
            )
            .if_supports_color(Stdout, |t| t.yellow())
        ),
        Some(expected) => log::info!(
            "  {:<17}{}",
            "Size:",
            format!(
                "{} (truncated; header declares {})",
                format_bytes(actual as u64),
                format_bytes(expected as u64)
            )
            .if_supports_color(Stdout, |t| t.red())
        ),
        None => log::info!(
            "  {:<17}{}",
            "Size:",
            format!("{} (unknown ROM size code)", format_bytes(actual as u64))
                .if_supports_color(Stdout, |t| t.red())
        ),
    }

    report_check("Header checksum", &report.header_checksum);
    report_check("Image", &report.image);
    log::info!("  {:<17}{}", "CRC32:", report.hashes.crc32);
    log::info!("  {:<17}{}", "SHA-1:", report.hashes.sha1);

    if report.is_valid() {
        Ok(())
    } else {
        Err(CliError::verification(path.display().to_string()))
    }
}
