//! Pin configuration types consumed by [`Port::init`](crate::port::Port::init).
//!
//! A configuration table is produced at build time (see
//! [`board`](crate::port::board) for an example) and lives for the whole
//! program. The driver only reads it.

use super::port::{PinDirection, PinLevel, PullMode};

/// Number of GPIO ports on the device.
pub const PORT_COUNT: usize = 6;

/// Pins per port.
pub const PINS_PER_PORT: u8 = 8;

/// Number of distinct [`PinId`] values.
pub const PIN_ID_COUNT: usize = PORT_COUNT * PINS_PER_PORT as usize;

/// Physical GPIO port.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum PortId {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
}

impl PortId {
    pub const ALL: [PortId; PORT_COUNT] = [
        PortId::A,
        PortId::B,
        PortId::C,
        PortId::D,
        PortId::E,
        PortId::F,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for PortId {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PortId::A),
            1 => Ok(PortId::B),
            2 => Ok(PortId::C),
            3 => Ok(PortId::D),
            4 => Ok(PortId::E),
            5 => Ok(PortId::F),
            other => Err(other),
        }
    }
}

/// Logical pin identifier, `port * 8 + pin`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PinId(pub u8);

macro_rules! pin_ids {
    ($($name:ident = $port:ident $pin:literal),* $(,)?) => {
        $(pub const $name: PinId = PinId::new(PortId::$port, $pin);)*
    };
}

impl PinId {
    /// Build the id of `pin` on `port`. `pin` is not range checked.
    pub const fn new(port: PortId, pin: u8) -> Self {
        Self(port as u8 * PINS_PER_PORT + pin)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pin_ids! {
        PA0 = A 0, PA1 = A 1, PA2 = A 2, PA3 = A 3, PA4 = A 4, PA5 = A 5, PA6 = A 6, PA7 = A 7,
        PB0 = B 0, PB1 = B 1, PB2 = B 2, PB3 = B 3, PB4 = B 4, PB5 = B 5, PB6 = B 6, PB7 = B 7,
        PC0 = C 0, PC1 = C 1, PC2 = C 2, PC3 = C 3, PC4 = C 4, PC5 = C 5, PC6 = C 6, PC7 = C 7,
        PD0 = D 0, PD1 = D 1, PD2 = D 2, PD3 = D 3, PD4 = D 4, PD5 = D 5, PD6 = D 6, PD7 = D 7,
        PE0 = E 0, PE1 = E 1, PE2 = E 2, PE3 = E 3, PE4 = E 4, PE5 = E 5, PE6 = E 6, PE7 = E 7,
        PF0 = F 0, PF1 = F 1, PF2 = F 2, PF3 = F 3, PF4 = F 4, PF5 = F 5, PF6 = F 6, PF7 = F 7,
    }
}

/// Function multiplexed onto a pin.
///
/// `0` is plain digital I/O, `1..=15` select an alternate function through
/// the port control field, [`PinMode::ANALOG`] routes the pin to the analog
/// inputs. Anything above `ANALOG` is rejected by the driver.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PinMode(pub u8);

impl PinMode {
    /// Digital input/output.
    pub const DIO: PinMode = PinMode(0);
    pub const UART: PinMode = PinMode(1);
    pub const SSI: PinMode = PinMode(2);
    pub const I2C: PinMode = PinMode(3);
    pub const M0PWM: PinMode = PinMode(4);
    pub const M1PWM: PinMode = PinMode(5);
    pub const QEI: PinMode = PinMode(6);
    pub const TIMER: PinMode = PinMode(7);
    pub const CAN: PinMode = PinMode(8);
    pub const USB: PinMode = PinMode(8);
    pub const NMI: PinMode = PinMode(8);
    pub const ANALOG_COMPARATOR: PinMode = PinMode(9);
    pub const TRACE: PinMode = PinMode(14);
    /// Analog input (ADC).
    pub const ANALOG: PinMode = PinMode(16);

    /// Highest accepted function id.
    pub const MAX: PinMode = Self::ANALOG;

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 <= Self::MAX.0
    }

    #[inline]
    pub const fn is_analog(self) -> bool {
        self.0 == Self::ANALOG.0
    }

    #[inline]
    pub const fn is_alternate(self) -> bool {
        self.0 != Self::DIO.0 && self.is_valid()
    }

    /// Value of the 4-bit port control field for this mode.
    #[inline]
    pub const fn pctl(self) -> u32 {
        if self.is_analog() { 0 } else { (self.0 & 0xF) as u32 }
    }
}

/// Build-time configuration of one pin.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PinConfig {
    pub port: PortId,
    /// Bit position in the port, `0..=7`.
    pub pin: u8,
    pub direction: PinDirection,
    pub resistor: PullMode,
    /// Only used when `direction` is [`PinDirection::Out`].
    pub initial_level: PinLevel,
    pub mode: PinMode,
    pub direction_changeable: bool,
    pub mode_changeable: bool,
}

impl PinConfig {
    /// Input pin in digital mode, fixed direction and mode.
    pub const fn input(port: PortId, pin: u8, resistor: PullMode) -> Self {
        Self {
            port,
            pin,
            direction: PinDirection::In,
            resistor,
            initial_level: PinLevel::Low,
            mode: PinMode::DIO,
            direction_changeable: false,
            mode_changeable: false,
        }
    }

    /// Output pin in digital mode, fixed direction and mode.
    pub const fn output(port: PortId, pin: u8, initial_level: PinLevel) -> Self {
        Self {
            port,
            pin,
            direction: PinDirection::Out,
            resistor: PullMode::None,
            initial_level,
            mode: PinMode::DIO,
            direction_changeable: false,
            mode_changeable: false,
        }
    }

    pub const fn with_mode(mut self, mode: PinMode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn with_changeable(mut self, direction: bool, mode: bool) -> Self {
        self.direction_changeable = direction;
        self.mode_changeable = mode;
        self
    }

    #[inline]
    pub const fn id(&self) -> PinId {
        PinId::new(self.port, self.pin)
    }
}

/// The set of pin configurations handed to [`Port::init`](crate::port::Port::init).
pub type ConfigTable = [PinConfig];
