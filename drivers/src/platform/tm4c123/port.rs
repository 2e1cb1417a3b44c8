//! TM4C123 pin configuration.
//!
//! Implements [`PinControl`] with read-modify-write accesses on the
//! affected bit or field only, so pins sharing a port register are never
//! disturbed.

use crate::hal::port::{PinControl, PinDirection, PinLevel, PullMode};
use crate::hw::tm4c123::gpio::{GPIO_UNLOCK_KEY, Gpio, GpioBus, PortPins, Register, locked_pins};
use crate::hal::config::{PinConfig, PinMode, PortId};

/// Width of one pin's function field in GPIOPCTL.
const PCTL_FIELD_BITS: u32 = 4;

/// TM4C123 port pins on top of a register bus.
#[derive(Debug)]
pub struct Tm4c123Port<B: GpioBus> {
    bus: B,
}

impl Tm4c123Port<Gpio> {
    /// Pin control over the memory-mapped GPIO blocks.
    ///
    /// # Safety
    ///
    /// See [`Gpio::new`].
    pub const unsafe fn mmio() -> Self {
        Self {
            bus: unsafe { Gpio::new() },
        }
    }
}

impl<B: GpioBus> Tm4c123Port<B> {
    pub const fn new(bus: B) -> Self {
        Self { bus }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    fn modify(&mut self, port: PortId, reg: Register, f: impl FnOnce(u32) -> u32) {
        let val = self.bus.read(port, reg);
        self.bus.write(port, reg, f(val));
    }

    fn write_bit(&mut self, port: PortId, reg: Register, pin: u8, set: bool) {
        let bit = 1u32 << pin;
        self.modify(port, reg, |val| if set { val | bit } else { val & !bit });
    }

    fn write_pctl(&mut self, port: PortId, pin: u8, function: u32) {
        let shift = u32::from(pin) * PCTL_FIELD_BITS;
        let mask = 0xF << shift;
        self.modify(port, Register::Pctl, |val| {
            (val & !mask) | ((function << shift) & mask)
        });
    }

    /// Open the commit register of `port` for `pin` if the pin is locked.
    ///
    /// The port is left unlocked afterwards.
    fn unlock(&mut self, port: PortId, pin: u8) {
        if !locked_pins(port).contains(PortPins::pin(pin)) {
            return;
        }
        log::trace!("port: unlocking P{:?}{}", port, pin);
        self.bus.write(port, Register::Lock, GPIO_UNLOCK_KEY);
        self.write_bit(port, Register::Cr, pin, true);
    }

    fn apply_resistor(&mut self, port: PortId, pin: u8, pull: PullMode) {
        let (up, down) = match pull {
            PullMode::None => (false, false),
            PullMode::Up => (true, false),
            PullMode::Down => (false, true),
        };
        // Clear the opposite bias first so both are never enabled together.
        if up {
            self.write_bit(port, Register::Pdr, pin, false);
            self.write_bit(port, Register::Pur, pin, true);
        } else {
            self.write_bit(port, Register::Pur, pin, false);
            self.write_bit(port, Register::Pdr, pin, down);
        }
    }

    fn apply_direction(&mut self, port: PortId, pin: u8, direction: PinDirection) {
        self.write_bit(port, Register::Dir, pin, direction.into());
    }

    fn apply_mode(&mut self, port: PortId, pin: u8, mode: PinMode) {
        if mode.is_analog() {
            self.write_bit(port, Register::Den, pin, false);
            self.write_bit(port, Register::Afsel, pin, true);
            self.write_pctl(port, pin, mode.pctl());
            self.write_bit(port, Register::Amsel, pin, true);
        } else {
            self.write_bit(port, Register::Amsel, pin, false);
            self.write_bit(port, Register::Afsel, pin, mode.is_alternate());
            self.write_pctl(port, pin, mode.pctl());
            self.write_bit(port, Register::Den, pin, true);
        }
    }

    fn apply_level(&mut self, port: PortId, pin: u8, level: PinLevel) {
        self.write_bit(port, Register::Data, pin, level.into());
    }
}

impl<B: GpioBus> PinControl for Tm4c123Port<B> {
    fn configure_pin(&mut self, config: &PinConfig) {
        let (port, pin) = (config.port, config.pin);

        self.bus.enable_clock(port);
        self.unlock(port, pin);
        self.apply_resistor(port, pin, config.resistor);
        self.apply_direction(port, pin, config.direction);
        self.apply_mode(port, pin, config.mode);
        if config.direction == PinDirection::Out {
            self.apply_level(port, pin, config.initial_level);
        }
    }

    fn set_direction(&mut self, port: PortId, pin: u8, direction: PinDirection) {
        self.unlock(port, pin);
        self.apply_direction(port, pin, direction);
    }

    fn set_mode(&mut self, port: PortId, pin: u8, mode: PinMode) {
        self.unlock(port, pin);
        self.apply_mode(port, pin, mode);
    }
}
