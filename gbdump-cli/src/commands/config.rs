use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gbdump_lib::settings::{Settings, load_settings, save_settings};

use crate::error::CliError;

/// Show the effective settings and where they come from.
pub(crate) fn run_config_show(path: &Path) -> Result<(), CliError> {
    log::info!(
        "{}",
        "gbdump Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    let settings = load_settings(path)?;
    let rendered = settings
        .to_toml()
        .map_err(|e| CliError::config(e.to_string()))?;
    for line in rendered.lines() {
        log::info!("  {}", line);
    }
    Ok(())
}

pub(crate) fn run_config_path(path: &Path) {
    log::info!("{}", path.display());
}

/// Write the default settings to `path`.
pub(crate) fn run_config_init(path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    save_settings(&Settings::default(), path)?;
    log::info!(
        "Wrote default settings to {}",
        path.display().if_supports_color(Stdout, |t| t.green())
    );
    Ok(())
}
