//! Read/write workflows over a connector.
//!
//! Every operation opens its own connection, runs one exchange and drops
//! the connection before returning, on success and on every error path.
//! Nothing is shared between operations; the configuration read by one
//! call is handed back to the caller, who passes it to the next.

use std::fmt;

use log::debug;

use crate::codec::CommandFrame;
use crate::config::DeviceConfig;
use crate::families::{Family, ModuleVersion, Persistence, e22, e32};
use crate::transport::{Connector, Transport};
use crate::validate::validate_config;

mod error;

pub use error::{ConfigError, ErrorCategory};

/// Lifecycle of a single operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    PortOpening,
    Exchanging,
    Decoding,
    Validating,
    Applying,
    Reporting,
    Closed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::PortOpening => "port-opening",
            Phase::Exchanging => "exchanging",
            Phase::Decoding => "decoding",
            Phase::Validating => "validating",
            Phase::Applying => "applying",
            Phase::Reporting => "reporting",
            Phase::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Logs phase transitions; reaching `Closed` happens on drop.
///
/// Declare it before the transport so the transport drops first.
struct OperationTrace<'a> {
    operation: &'static str,
    device: &'a str,
    phase: Phase,
}

impl<'a> OperationTrace<'a> {
    fn begin(operation: &'static str, device: &'a str) -> Self {
        Self {
            operation,
            device,
            phase: Phase::Idle,
        }
    }

    fn advance(&mut self, next: Phase) {
        debug!(
            "{} {}: {} -> {}",
            self.operation, self.device, self.phase, next
        );
        self.phase = next;
    }
}

impl Drop for OperationTrace<'_> {
    fn drop(&mut self) {
        self.advance(Phase::Closed);
    }
}

/// Runs configuration workflows against devices opened by `C`.
///
/// # Examples
/// ```no_run
/// use loracfg_core::{Configurator, Family, SerialConnector};
///
/// let configurator = Configurator::new(SerialConnector::default());
/// let cfg = configurator.read_config(Family::E32, "/dev/ttyUSB0")?;
/// println!("channel {}", cfg.get("Channel").map(ToString::to_string).unwrap_or_default());
/// # Ok::<(), loracfg_core::ConfigError>(())
/// ```
pub struct Configurator<C> {
    connector: C,
}

impl<C: Connector> Configurator<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Reads and decodes the module's register block.
    ///
    /// Write-only fields are not returned by the module and are left out of
    /// the result.
    pub fn read_config(&self, family: Family, device: &str) -> Result<DeviceConfig, ConfigError> {
        let mut trace = OperationTrace::begin("read-config", device);
        trace.advance(Phase::PortOpening);
        let mut link = self.connector.connect(device)?;

        trace.advance(Phase::Exchanging);
        let reply = link.exchange(family.get_config_command().as_bytes())?;

        trace.advance(Phase::Decoding);
        let block = family.parse_config_reply(&reply)?;
        let mut cfg = family.decode(&block).map_err(ConfigError::Decode)?;
        cfg.clear_write_only();

        trace.advance(Phase::Reporting);
        Ok(cfg)
    }

    /// Validates, encodes and writes a configuration, then checks the echo.
    ///
    /// Nothing is sent when validation or encoding fails. Without write-only
    /// fields only the readable registers are written, so values the module
    /// never reports (the E22 crypt key) keep their stored contents.
    pub fn write_config(
        &self,
        family: Family,
        device: &str,
        cfg: &DeviceConfig,
        persistence: Persistence,
    ) -> Result<(), ConfigError> {
        let mut trace = OperationTrace::begin("write-config", device);
        trace.advance(Phase::PortOpening);
        let mut link = self.connector.connect(device)?;

        trace.advance(Phase::Validating);
        validate_config(cfg).map_err(ConfigError::Invalid)?;
        let block = family.encode_for_write(cfg).map_err(ConfigError::Invalid)?;
        let frame = family.set_config_command(&block, persistence);

        trace.advance(Phase::Exchanging);
        let reply = link.exchange(frame.as_bytes())?;

        trace.advance(Phase::Applying);
        family.check_write_reply(&frame, &reply)?;
        Ok(())
    }

    /// Reads the opaque E22 product-info blob.
    pub fn read_product_info(&self, device: &str) -> Result<Vec<u8>, ConfigError> {
        self.product_info_for(Family::E22, device)
    }

    /// Restores the E32 factory defaults.
    pub fn factory_reset(&self, device: &str) -> Result<(), ConfigError> {
        self.factory_reset_for(Family::E32, device)
    }

    /// Reads the E32 model, firmware version and feature byte.
    pub fn read_module_version(&self, device: &str) -> Result<ModuleVersion, ConfigError> {
        self.module_version_for(Family::E32, device)
    }

    pub fn product_info_for(&self, family: Family, device: &str) -> Result<Vec<u8>, ConfigError> {
        require(family, Family::E22, "product-info")?;
        let reply = self.exchange_once("product-info", device, &e22::frames::get_product_info())?;
        Ok(e22::frames::parse_product_info(&reply)?)
    }

    pub fn factory_reset_for(&self, family: Family, device: &str) -> Result<(), ConfigError> {
        require(family, Family::E32, "factory-reset")?;
        let frame = e32::frames::factory_reset();
        let reply = self.exchange_once("factory-reset", device, &frame)?;
        Ok(e32::frames::check_write_reply(&frame, &reply)?)
    }

    pub fn module_version_for(
        &self,
        family: Family,
        device: &str,
    ) -> Result<ModuleVersion, ConfigError> {
        require(family, Family::E32, "module-version")?;
        let reply =
            self.exchange_once("module-version", device, &e32::frames::get_module_version())?;
        Ok(e32::frames::parse_module_version(&reply)?)
    }

    fn exchange_once(
        &self,
        operation: &'static str,
        device: &str,
        frame: &CommandFrame,
    ) -> Result<Vec<u8>, ConfigError> {
        let mut trace = OperationTrace::begin(operation, device);
        trace.advance(Phase::PortOpening);
        let mut link = self.connector.connect(device)?;

        trace.advance(Phase::Exchanging);
        let reply = link.exchange(frame.as_bytes())?;

        trace.advance(Phase::Reporting);
        Ok(reply)
    }
}

fn require(family: Family, supported: Family, operation: &'static str) -> Result<(), ConfigError> {
    if family != supported {
        return Err(ConfigError::Unsupported { family, operation });
    }
    Ok(())
}
