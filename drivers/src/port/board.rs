//! Pin configuration of the EK-TM4C123GXL LaunchPad.
//!
//! Normally generated by the configuration tool; kept here as the default
//! wiring and as a reference for writing other tables.

use crate::hal::config::{PinConfig, PinMode, PortId};
use crate::hal::port::{PinLevel, PullMode};
use common::std_types::Version;

/// Software version of this configuration set.
pub const CONFIG_SW_VERSION: Version = Version::new(1, 0, 0);

/// AUTOSAR release the configuration set was generated for.
pub const CONFIG_AR_RELEASE_VERSION: Version = Version::new(4, 0, 3);

pub static PORT_CONFIGURATION: [PinConfig; 9] = [
    // UART0 RX/TX to the debug probe's virtual COM port.
    PinConfig::input(PortId::A, 0, PullMode::None).with_mode(PinMode::UART),
    PinConfig::output(PortId::A, 1, PinLevel::High).with_mode(PinMode::UART),
    // AIN0
    PinConfig::input(PortId::E, 3, PullMode::None)
        .with_mode(PinMode::ANALOG)
        .with_changeable(false, true),
    // SW2, NMI at reset.
    PinConfig::input(PortId::F, 0, PullMode::Up),
    // Red LED, may be handed to M1PWM5.
    PinConfig::output(PortId::F, 1, PinLevel::Low).with_changeable(false, true),
    // Blue LED
    PinConfig::output(PortId::F, 2, PinLevel::Low),
    // Green LED
    PinConfig::output(PortId::F, 3, PinLevel::Low).with_changeable(true, false),
    // SW1
    PinConfig::input(PortId::F, 4, PullMode::Up),
    // Spare header pin, bidirectional.
    PinConfig::input(PortId::B, 5, PullMode::Down).with_changeable(true, true),
];
