use common::std_types::{ErrorId, ServiceId as RawServiceId};
use core::fmt;

/// API services of the port driver, as identified in diagnostic reports.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ServiceId {
    Init = 0x00,
    SetPinDirection = 0x01,
    RefreshPortDirection = 0x02,
    GetVersionInfo = 0x03,
    SetPinMode = 0x04,
}

impl From<ServiceId> for RawServiceId {
    fn from(service: ServiceId) -> Self {
        service as RawServiceId
    }
}

/// Coarse classification of a [`PortError`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// An argument was out of range or missing.
    Parameter,
    /// The configuration forbids the requested change.
    Policy,
    /// The driver is not in a state that allows the call.
    State,
}

/// Reasons a port driver call is rejected.
///
/// A rejected call never touches the hardware.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PortError {
    /// Pin id is not part of the configuration.
    ParamPin,
    /// Direction of the pin is fixed by configuration.
    DirectionUnchangeable,
    /// Configuration table, or one of its entries, is invalid.
    ParamConfig,
    /// Mode id outside the supported range.
    ParamInvalidMode,
    /// Mode of the pin is fixed by configuration.
    ModeUnchangeable,
    /// Called before [`Port::init`](super::Port::init).
    Uninit,
    /// No destination for the result.
    ParamPointer,
}

impl PortError {
    /// Error code reported to the diagnostic sink.
    pub const fn error_id(self) -> ErrorId {
        match self {
            PortError::ParamPin => 0x0A,
            PortError::DirectionUnchangeable => 0x0B,
            PortError::ParamConfig => 0x0C,
            PortError::ParamInvalidMode => 0x0D,
            PortError::ModeUnchangeable => 0x0E,
            PortError::Uninit => 0x0F,
            PortError::ParamPointer => 0x10,
        }
    }

    pub const fn kind(self) -> ErrorKind {
        match self {
            PortError::ParamPin
            | PortError::ParamConfig
            | PortError::ParamInvalidMode
            | PortError::ParamPointer => ErrorKind::Parameter,
            PortError::DirectionUnchangeable | PortError::ModeUnchangeable => ErrorKind::Policy,
            PortError::Uninit => ErrorKind::State,
        }
    }
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            PortError::ParamPin => "invalid pin id",
            PortError::DirectionUnchangeable => "pin direction is not changeable",
            PortError::ParamConfig => "invalid configuration",
            PortError::ParamInvalidMode => "invalid pin mode",
            PortError::ModeUnchangeable => "pin mode is not changeable",
            PortError::Uninit => "port driver not initialized",
            PortError::ParamPointer => "null output pointer",
        };
        f.write_str(msg)
    }
}
