//! Settings file: bus timing and the GPIO pin map.
//!
//! Lives at `~/.config/gbdump/settings.toml`. Every key is optional; a
//! missing file or key falls back to the defaults below, which wire a
//! Raspberry Pi header (BCM 2..27) to A0..A15, D0..D7, RD, WR.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use gbdump_bus::sysfs::DEFAULT_SYSFS_ROOT;
use gbdump_bus::{BusConfig, DEFAULT_TIMING_MARGIN, Pinout};

use crate::error::DumpError;

/// Canonical path to the settings file: `~/.config/gbdump/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("gbdump").join("settings.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bus: BusSettings,
    pub pins: PinSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusSettings {
    /// Minimum wait between line transitions, in microseconds.
    pub timing_margin_us: u64,
    pub sysfs_root: PathBuf,
}

impl Default for BusSettings {
    fn default() -> Self {
        Self {
            timing_margin_us: DEFAULT_TIMING_MARGIN.as_micros() as u64,
            sysfs_root: PathBuf::from(DEFAULT_SYSFS_ROOT),
        }
    }
}

/// GPIO numbers for each cartridge line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinSettings {
    pub address: Vec<u32>,
    pub data: Vec<u32>,
    pub rd: u32,
    pub wr: u32,
}

impl Default for PinSettings {
    fn default() -> Self {
        Self {
            address: (2..18).collect(),
            data: (18..26).collect(),
            rd: 26,
            wr: 27,
        }
    }
}

impl Settings {
    /// Bus timing, with an optional one-off margin override in microseconds.
    pub fn bus_config(&self, margin_override_us: Option<u64>) -> BusConfig {
        let micros = margin_override_us.unwrap_or(self.bus.timing_margin_us);
        BusConfig {
            timing_margin: Duration::from_micros(micros),
        }
    }

    pub fn pinout(&self) -> Pinout {
        Pinout {
            address: self.pins.address.clone(),
            data: self.pins.data.clone(),
            rd: self.pins.rd,
            wr: self.pins.wr,
        }
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Load settings from `path`. A missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<Settings, DumpError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("No settings at {}; using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(e) => return Err(e.into()),
    };
    toml::from_str(&contents).map_err(|e| DumpError::settings(path, e.to_string()))
}

/// Save settings to `path`, creating parent directories as needed.
pub fn save_settings(settings: &Settings, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = settings.to_toml().map_err(io::Error::other)?;

    // Write atomically
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
