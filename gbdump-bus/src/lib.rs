//! Parallel cartridge bus driven over GPIO lines.
//!
//! The cartridge edge connector exposes 16 address lines, 8 bidirectional
//! data lines, and the active-low RD/WR strobes. [`BusEngine`] sequences
//! those lines over any [`Pin`] implementation: the Linux sysfs GPIO
//! backend in [`sysfs`], or the in-memory simulator in [`sim`].
//!
//! One engine owns one physical bus. It is neither `Send` nor shared, and
//! every operation runs to completion before returning.

pub mod delay;
pub mod engine;
pub mod error;
pub mod lines;
pub mod pin;
pub mod reader;
pub mod sim;
pub mod sysfs;

pub use delay::{Delay, ThreadDelay};
pub use engine::{BusConfig, BusEngine, BusState, DEFAULT_TIMING_MARGIN, Direction, Role};
pub use error::BusError;
pub use lines::{BusLines, LineGroup, Pinout};
pub use pin::{Pin, PinMode};
pub use reader::BusRomReader;
