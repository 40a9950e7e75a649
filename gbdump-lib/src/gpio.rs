//! Building bus engines from settings.

use gbdump_bus::sim::{SharedBus, SimBus, SimCartridge, SimPin};
use gbdump_bus::sysfs::{SysfsGpio, SysfsPin};
use gbdump_bus::{BusConfig, BusEngine, Role};

use crate::error::DumpError;
use crate::settings::Settings;

/// Claim the configured GPIO lines and initialize an engine in `role`.
///
/// Every line is released again when the engine is dropped.
pub fn open_gpio_engine(
    settings: &Settings,
    role: Role,
    margin_override_us: Option<u64>,
) -> Result<BusEngine<SysfsPin>, DumpError> {
    let gpio = SysfsGpio::open(&settings.bus.sysfs_root)?;
    let lines = gpio.claim_lines(&settings.pinout())?;
    let config = settings.bus_config(margin_override_us);
    log::info!(
        "Opened GPIO bus at {} ({}us margin)",
        gpio.root().display(),
        config.timing_margin.as_micros()
    );
    Ok(BusEngine::initialize(lines, role, &config))
}

/// A master engine wired to a simulated cartridge holding `rom`.
pub fn open_simulated_engine(
    rom: Vec<u8>,
    config: &BusConfig,
) -> Result<(SharedBus, BusEngine<SimPin>), DumpError> {
    let cartridge = SimCartridge::new(rom);
    log::debug!("Simulating a {} cartridge", cartridge.kind().name());
    let bus = SimBus::new(cartridge);
    let lines = SimBus::lines(&bus)?;
    let engine = BusEngine::initialize(lines, Role::Master, config);
    Ok((bus, engine))
}
