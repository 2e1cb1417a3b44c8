//! Port driver.
//!
//! Applies a build-time pin configuration table to the hardware once, then
//! allows the direction and function of individual pins to be changed at
//! runtime where the table permits it.
//!
//! Every operation returns a [`PortError`] on misuse. With the
//! `dev-error-detect` feature the same error is also reported to the
//! [`DiagnosticSink`] the driver was created with. A rejected call performs
//! no register access.
//!
//! The driver does no locking. Two calls that target the same pin, or
//! [`Port::init`] and [`Port::refresh_port_direction`] racing with anything
//! else, must be serialized by the caller.

pub mod board;
pub use crate::hal::config;
pub mod error;
pub mod index;

#[cfg(test)]
mod tests;

pub use config::{ConfigTable, PinConfig, PinId, PinMode, PortId};
pub use error::{ErrorKind, PortError, ServiceId};
pub use index::{PinIndex, PinRecord};

use crate::hal::port::{PinControl, PinDirection};
use common::det::DiagnosticSink;
use common::std_types::{InstanceId, ModuleId, VendorId, Version, VersionInfo};
use self::config::PINS_PER_PORT;

pub const PORT_VENDOR_ID: VendorId = 1000;
pub const PORT_MODULE_ID: ModuleId = 120;
pub const PORT_INSTANCE_ID: InstanceId = 0;

pub const PORT_SW_VERSION: Version = Version::new(1, 0, 0);
pub const PORT_AR_RELEASE_VERSION: Version = Version::new(4, 0, 3);

const _: () = assert!(
    board::CONFIG_AR_RELEASE_VERSION.same_as(&PORT_AR_RELEASE_VERSION),
    "the AR version of the port configuration does not match the driver"
);
const _: () = assert!(
    board::CONFIG_SW_VERSION.same_as(&PORT_SW_VERSION),
    "the SW version of the port configuration does not match the driver"
);

/// Initialization state of a [`Port`]. Only ever moves forward.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InitState {
    NotInitialized,
    Initialized,
}

/// Port driver instance.
///
/// `C` reaches the pin registers, `D` receives development error reports.
#[derive(Debug)]
pub struct Port<C: PinControl, D: DiagnosticSink> {
    pins: C,
    det: D,
    state: InitState,
    index: PinIndex,
}

impl<C: PinControl, D: DiagnosticSink> Port<C, D> {
    /// Create an uninitialized driver. No register is touched.
    pub const fn new(pins: C, det: D) -> Self {
        Self {
            pins,
            det,
            state: InitState::NotInitialized,
            index: PinIndex::new(),
        }
    }

    /// Configure every pin of `table` and enable the runtime services.
    ///
    /// Entries naming a pin outside `0..=7` or a function above
    /// [`PinMode::MAX`] are reported as [`PortError::ParamConfig`] and
    /// skipped; the rest are still applied.
    /// An empty table is rejected as a whole and leaves the driver as it
    /// was. Calling `init` again reapplies the full table.
    pub fn init(&mut self, table: &ConfigTable) -> Result<(), PortError> {
        if table.is_empty() {
            return Err(self.fail(ServiceId::Init, PortError::ParamConfig));
        }

        self.index.clear();
        for config in table {
            if !Self::entry_is_valid(config) {
                log::warn!(
                    "port: skipping invalid entry P{:?}{}",
                    config.port,
                    config.pin
                );
                self.fail(ServiceId::Init, PortError::ParamConfig);
                continue;
            }

            log::debug!(
                "port: P{:?}{} {:?} pull {:?} mode {}",
                config.port,
                config.pin,
                config.direction,
                config.resistor,
                config.mode.0
            );
            self.pins.configure_pin(config);
            self.index.insert(config);
        }

        self.state = InitState::Initialized;
        log::info!("port: initialized, {} pins configured", self.index.len());
        Ok(())
    }

    /// Change the direction of `pin`.
    pub fn set_pin_direction(
        &mut self,
        pin: PinId,
        direction: PinDirection,
    ) -> Result<(), PortError> {
        const SERVICE: ServiceId = ServiceId::SetPinDirection;

        self.check_initialized(SERVICE)?;
        let record = self.record(SERVICE, pin)?;
        if !record.direction_changeable {
            return Err(self.fail(SERVICE, PortError::DirectionUnchangeable));
        }

        self.pins.set_direction(record.port, record.pin, direction);
        Ok(())
    }

    /// Re-apply the configured direction of every pin whose direction is
    /// not changeable. Changeable pins keep whatever they were set to.
    pub fn refresh_port_direction(&mut self) -> Result<(), PortError> {
        self.check_initialized(ServiceId::RefreshPortDirection)?;

        for record in self.index.iter().filter(|r| !r.direction_changeable) {
            self.pins
                .set_direction(record.port, record.pin, record.direction);
        }
        Ok(())
    }

    /// Change the function multiplexed onto `pin`.
    pub fn set_pin_mode(&mut self, pin: PinId, mode: PinMode) -> Result<(), PortError> {
        const SERVICE: ServiceId = ServiceId::SetPinMode;

        self.check_initialized(SERVICE)?;
        let record = self.record(SERVICE, pin)?;
        if !mode.is_valid() {
            return Err(self.fail(SERVICE, PortError::ParamInvalidMode));
        }
        if !record.mode_changeable {
            return Err(self.fail(SERVICE, PortError::ModeUnchangeable));
        }

        self.pins.set_mode(record.port, record.pin, mode);
        if let Some(record) = self.index.get_mut(pin) {
            record.mode = mode;
        }
        Ok(())
    }

    /// Write the driver's version information into `out`.
    ///
    /// Works whether or not the driver is initialized.
    pub fn get_version_info(&mut self, out: Option<&mut VersionInfo>) -> Result<(), PortError> {
        match out {
            Some(out) => {
                *out = Self::version_info();
                Ok(())
            }
            None => Err(self.fail(ServiceId::GetVersionInfo, PortError::ParamPointer)),
        }
    }

    /// Version information of the driver.
    pub const fn version_info() -> VersionInfo {
        VersionInfo {
            vendor_id: PORT_VENDOR_ID,
            module_id: PORT_MODULE_ID,
            instance_id: PORT_INSTANCE_ID,
            sw_major_version: PORT_SW_VERSION.major,
            sw_minor_version: PORT_SW_VERSION.minor,
            sw_patch_version: PORT_SW_VERSION.patch,
        }
    }

    pub fn state(&self) -> InitState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state == InitState::Initialized
    }

    /// Function currently active on `pin`, if the pin is configured.
    pub fn current_mode(&self, pin: PinId) -> Option<PinMode> {
        self.index.get(pin).map(|r| r.mode)
    }

    pub fn index(&self) -> &PinIndex {
        &self.index
    }

    pub fn pins(&self) -> &C {
        &self.pins
    }

    pub fn pins_mut(&mut self) -> &mut C {
        &mut self.pins
    }

    pub fn det(&self) -> &D {
        &self.det
    }

    pub fn det_mut(&mut self) -> &mut D {
        &mut self.det
    }

    fn entry_is_valid(config: &PinConfig) -> bool {
        config.pin < PINS_PER_PORT && config.mode.is_valid()
    }

    fn check_initialized(&mut self, service: ServiceId) -> Result<(), PortError> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(self.fail(service, PortError::Uninit))
        }
    }

    fn record(&mut self, service: ServiceId, pin: PinId) -> Result<PinRecord, PortError> {
        let record = self.index.get(pin).copied();
        record.ok_or_else(|| self.fail(service, PortError::ParamPin))
    }

    /// Log and report `error` on behalf of `service`, then hand it back.
    fn fail(&mut self, service: ServiceId, error: PortError) -> PortError {
        log::warn!("port: {:?} rejected: {}", service, error);
        #[cfg(feature = "dev-error-detect")]
        self.det.report_error(
            PORT_MODULE_ID,
            PORT_INSTANCE_ID,
            service.into(),
            error.error_id(),
        );
        error
    }
}
