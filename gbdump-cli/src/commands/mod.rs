pub(crate) mod config;
pub(crate) mod dump;
pub(crate) mod info;
pub(crate) mod verify;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gbdump_lib::CartridgeError;

/// One `label: ok` or `label: <error>` line.
pub(crate) fn report_check(label: &str, result: &Result<(), CartridgeError>) {
    match result {
        Ok(()) => log::info!(
            "  {:<17}{}",
            format!("{label}:"),
            "OK".if_supports_color(Stdout, |t| t.green())
        ),
        Err(e) if e.is_warning() => log::info!(
            "  {:<17}{}",
            format!("{label}:"),
            e.if_supports_color(Stdout, |t| t.yellow())
        ),
        Err(e) => log::info!(
            "  {:<17}{}",
            format!("{label}:"),
            e.if_supports_color(Stdout, |t| t.red())
        ),
    }
}
