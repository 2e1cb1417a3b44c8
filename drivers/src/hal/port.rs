//! Pin configuration Hardware Abstraction Layer.
//!
//! This module defines the platform-independent pin attributes and the
//! [`PinControl`] capability the port driver programs them through.

use super::config::{PinConfig, PinMode, PortId};

/// Pin logic level.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PinLevel {
    /// Logic low (0V or ground).
    Low,
    /// Logic high (VDD).
    High,
}

impl From<bool> for PinLevel {
    fn from(value: bool) -> Self {
        if value {
            PinLevel::High
        } else {
            PinLevel::Low
        }
    }
}

impl From<PinLevel> for bool {
    fn from(level: PinLevel) -> bool {
        matches!(level, PinLevel::High)
    }
}

/// Internal pull resistor configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PullMode {
    /// No pull resistor (high impedance).
    None,
    /// Enable internal pull-up resistor.
    Up,
    /// Enable internal pull-down resistor.
    Down,
}

/// Direction of a digital pin.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PinDirection {
    /// Digital input.
    In,
    /// Digital output.
    Out,
}

impl From<PinDirection> for bool {
    fn from(direction: PinDirection) -> bool {
        matches!(direction, PinDirection::Out)
    }
}

impl From<bool> for PinDirection {
    fn from(output: bool) -> Self {
        if output {
            PinDirection::Out
        } else {
            PinDirection::In
        }
    }
}

/// Bit-level pin configuration capability.
///
/// Implementations translate a (port, pin, attribute) tuple into register
/// writes that leave every other pin of the port untouched. Arguments are
/// already validated by the caller: an implementation never fails.
pub trait PinControl {
    /// Apply a complete pin configuration: resistor, direction, function
    /// and, for outputs, the initial level.
    fn configure_pin(&mut self, config: &PinConfig);

    /// Change only the direction of a pin.
    fn set_direction(&mut self, port: PortId, pin: u8, direction: PinDirection);

    /// Change only the function multiplexed onto a pin.
    fn set_mode(&mut self, port: PortId, pin: u8, mode: PinMode);
}

impl<C: PinControl + ?Sized> PinControl for &mut C {
    fn configure_pin(&mut self, config: &PinConfig) {
        (**self).configure_pin(config);
    }

    fn set_direction(&mut self, port: PortId, pin: u8, direction: PinDirection) {
        (**self).set_direction(port, pin, direction);
    }

    fn set_mode(&mut self, port: PortId, pin: u8, mode: PinMode) {
        (**self).set_mode(port, pin, mode);
    }
}
