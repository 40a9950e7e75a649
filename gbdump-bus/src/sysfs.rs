//! Linux sysfs GPIO backend (`/sys/class/gpio`).
//!
//! Each claimed line keeps its `value` file open so reads and writes are a
//! seek plus one byte. Direction changes reopen `direction`, which is rare.
//! Switching to output writes `high` or `low` rather than `out`, so the
//! kernel sets the level and the direction together. Lines exported by this
//! process are unexported again on drop.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::BusError;
use crate::lines::{BusLines, Pinout};
use crate::pin::Pin;

pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/gpio";

/// Handle on a sysfs GPIO controller.
#[derive(Debug, Clone)]
pub struct SysfsGpio {
    root: PathBuf,
}

impl SysfsGpio {
    /// Open the controller rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, BusError> {
        let root = root.into();
        match fs::metadata(&root) {
            Ok(meta) if meta.is_dir() => Ok(Self { root }),
            Ok(_) => Err(BusError::GpioUnavailable {
                path: root,
                source: std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
            }),
            Err(source) => Err(BusError::GpioUnavailable { path: root, source }),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Export `line` if needed and open its attribute files.
    pub fn claim(&self, line: u32) -> Result<SysfsPin, BusError> {
        let dir = self.root.join(format!("gpio{line}"));
        let exported = !dir.exists();
        if exported {
            fs::write(self.root.join("export"), line.to_string()).map_err(BusError::gpio(line))?;
            log::debug!("Exported GPIO {line}");
        }

        let value = OpenOptions::new()
            .read(true)
            .write(true)
            .open(dir.join("value"))
            .map_err(BusError::gpio(line))?;

        Ok(SysfsPin {
            line,
            root: self.root.clone(),
            direction: dir.join("direction"),
            value,
            level: false,
            output: false,
            exported,
        })
    }

    /// Claim every line of `pinout`.
    pub fn claim_lines(&self, pinout: &Pinout) -> Result<BusLines<SysfsPin>, BusError> {
        let address = pinout
            .address
            .iter()
            .map(|&line| self.claim(line))
            .collect::<Result<Vec<_>, _>>()?;
        let data = pinout
            .data
            .iter()
            .map(|&line| self.claim(line))
            .collect::<Result<Vec<_>, _>>()?;
        let rd = self.claim(pinout.rd)?;
        let wr = self.claim(pinout.wr)?;
        BusLines::new(address, data, rd, wr)
    }
}

/// One exported sysfs GPIO line.
#[derive(Debug)]
pub struct SysfsPin {
    line: u32,
    root: PathBuf,
    direction: PathBuf,
    value: File,
    /// Level requested by the last `set_high`/`set_low`.
    level: bool,
    output: bool,
    exported: bool,
}

impl SysfsPin {
    pub fn line(&self) -> u32 {
        self.line
    }

    fn set_level(&mut self, level: bool) {
        self.level = level;
        // The kernel rejects value writes on inputs; the level is applied
        // when the line becomes an output.
        if self.output {
            self.write_value(if level { b'1' } else { b'0' });
        }
    }

    fn write_value(&mut self, byte: u8) {
        let result = self
            .value
            .seek(SeekFrom::Start(0))
            .and_then(|_| self.value.write_all(&[byte]));
        if let Err(e) = result {
            log::error!("GPIO {}: failed to set value: {}", self.line, e);
        }
    }

    fn write_direction(&self, direction: &str) {
        if let Err(e) = fs::write(&self.direction, direction) {
            log::error!("GPIO {}: failed to set direction {}: {}", self.line, direction, e);
        }
    }
}

impl Pin for SysfsPin {
    fn read(&mut self) -> bool {
        let mut buf = [0u8; 1];
        let result = self
            .value
            .seek(SeekFrom::Start(0))
            .and_then(|_| self.value.read(&mut buf));
        match result {
            Ok(1) => buf[0] == b'1',
            Ok(_) => false,
            Err(e) => {
                log::error!("GPIO {}: failed to read value: {}", self.line, e);
                false
            }
        }
    }

    fn set_high(&mut self) {
        self.set_level(true);
    }

    fn set_low(&mut self) {
        self.set_level(false);
    }

    fn set_input_mode(&mut self) {
        self.write_direction("in");
        self.output = false;
    }

    fn set_output_mode(&mut self) {
        self.write_direction(if self.level { "high" } else { "low" });
        self.output = true;
    }
}

impl Drop for SysfsPin {
    fn drop(&mut self) {
        self.write_direction("in");
        if self.exported {
            if let Err(e) = fs::write(self.root.join("unexport"), self.line.to_string()) {
                log::debug!("GPIO {}: unexport failed: {}", self.line, e);
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/sysfs_tests.rs"]
mod tests;
