mod port;

pub use port::Tm4c123Port;

use super::Platform;
use crate::hw::tm4c123::Gpio;

pub struct Tm4c123Platform;

impl Platform for Tm4c123Platform {
    type Pins = Tm4c123Port<Gpio>;

    fn name() -> &'static str {
        "TM4C123GH6PM (Tiva C LaunchPad)"
    }

    unsafe fn pin_control() -> Self::Pins {
        unsafe { Tm4c123Port::mmio() }
    }
}
