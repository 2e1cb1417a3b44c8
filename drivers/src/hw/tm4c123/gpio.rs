use crate::hal::config::PortId;
use core::ptr::{addr_of_mut, read_volatile, write_volatile};

/// Base addresses of the GPIO port register blocks (APB aperture).
///
/// The caller must ensure these addresses are accessible before use.
pub const GPIO_PORT_BASE: [usize; 6] = [
    0x4000_4000, // A
    0x4000_5000, // B
    0x4000_6000, // C
    0x4000_7000, // D
    0x4002_4000, // E
    0x4002_5000, // F
];

/// GPIO Run Mode Clock Gating Control.
pub const SYSCTL_RCGCGPIO: usize = 0x400F_E608;

/// GPIO Peripheral Ready.
pub const SYSCTL_PRGPIO: usize = 0x400F_EA08;

/// Value that unlocks the commit register of a port when written to LOCK.
pub const GPIO_UNLOCK_KEY: u32 = 0x4C4F_434B;

bitflags::bitflags! {
    /// A set of pins within one port, bit `n` standing for pin `n`.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct PortPins: u8 {
        const P0 = 1 << 0;
        const P1 = 1 << 1;
        const P2 = 1 << 2;
        const P3 = 1 << 3;
        const P4 = 1 << 4;
        const P5 = 1 << 5;
        const P6 = 1 << 6;
        const P7 = 1 << 7;
    }
}

impl PortPins {
    /// Set containing only `pin` (`0..=7`).
    #[inline]
    pub const fn pin(pin: u8) -> Self {
        Self::from_bits_retain(1 << (pin & 0x7))
    }
}

/// Pins whose AFSEL/PUR/PDR/DEN bits are write protected after reset and
/// only take new values once committed through the LOCK/CR sequence.
pub const fn locked_pins(port: PortId) -> PortPins {
    match port {
        // JTAG/SWD
        PortId::C => PortPins::P0.union(PortPins::P1).union(PortPins::P2).union(PortPins::P3),
        // NMI
        PortId::D => PortPins::P7,
        PortId::F => PortPins::P0,
        _ => PortPins::empty(),
    }
}

/// Port registers the driver touches.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Register {
    /// GPIODATA, accessed through the all-bits-unmasked address.
    Data,
    /// GPIODIR, 1 = output.
    Dir,
    /// GPIOAFSEL, 1 = pin driven by a peripheral.
    Afsel,
    /// GPIOPUR, pull-up enable.
    Pur,
    /// GPIOPDR, pull-down enable.
    Pdr,
    /// GPIODEN, digital enable.
    Den,
    /// GPIOLOCK.
    Lock,
    /// GPIOCR, commit.
    Cr,
    /// GPIOAMSEL, analog mode select.
    Amsel,
    /// GPIOPCTL, 4 bits per pin.
    Pctl,
}

impl Register {
    pub const COUNT: usize = 10;

    pub const ALL: [Register; Self::COUNT] = [
        Register::Data,
        Register::Dir,
        Register::Afsel,
        Register::Pur,
        Register::Pdr,
        Register::Den,
        Register::Lock,
        Register::Cr,
        Register::Amsel,
        Register::Pctl,
    ];

    /// Position in [`Register::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Protected by the commit register on locked pins.
    #[inline]
    pub const fn is_commit_protected(self) -> bool {
        matches!(
            self,
            Register::Afsel | Register::Pur | Register::Pdr | Register::Den
        )
    }
}

/// Register-level access to the GPIO ports.
///
/// Implemented over memory-mapped I/O by [`Gpio`] and over an in-memory
/// register file by [`RegisterModel`](super::model::RegisterModel).
pub trait GpioBus {
    /// Read a whole port register.
    fn read(&self, port: PortId, reg: Register) -> u32;

    /// Write a whole port register.
    fn write(&mut self, port: PortId, reg: Register, value: u32);

    /// Gate the clock of `port` on. Registers of a port are only reachable
    /// once its clock runs.
    fn enable_clock(&mut self, port: PortId);
}

impl<B: GpioBus + ?Sized> GpioBus for &mut B {
    fn read(&self, port: PortId, reg: Register) -> u32 {
        (**self).read(port, reg)
    }

    fn write(&mut self, port: PortId, reg: Register, value: u32) {
        (**self).write(port, reg, value);
    }

    fn enable_clock(&mut self, port: PortId) {
        (**self).enable_clock(port);
    }
}

/// Memory-mapped register layout of one GPIO port.
///
/// This structure mirrors the register block described in the TM4C123GH6PM
/// datasheet. Reserved fields are included to preserve correct offsets.
///
/// # Safety
/// This struct must only be accessed through volatile reads/writes,
/// as the memory region represents hardware registers.
#[repr(C)]
#[allow(dead_code)]
struct GpioRegs {
    /// Masked data window; the last word addresses all eight bits.
    data: [u32; 256],
    dir: u32,
    is: u32,
    ibe: u32,
    iev: u32,
    im: u32,
    ris: u32,
    mis: u32,
    icr: u32,
    afsel: u32,
    _reserved0: [u32; 55],
    dr2r: u32,
    dr4r: u32,
    dr8r: u32,
    odr: u32,
    pur: u32,
    pdr: u32,
    slr: u32,
    den: u32,
    lock: u32,
    cr: u32,
    amsel: u32,
    pctl: u32,
}

/// GPIO ports reached through their memory-mapped registers.
#[derive(Debug)]
pub struct Gpio {
    base: [usize; 6],
}

impl Gpio {
    /// Create a handle on the GPIO register blocks.
    ///
    /// # Safety
    /// The GPIO register blocks must be mapped at [`GPIO_PORT_BASE`] and no
    /// other code may reconfigure the same pins concurrently.
    pub const unsafe fn new() -> Self {
        Self {
            base: GPIO_PORT_BASE,
        }
    }

    fn regs(&self, port: PortId) -> *mut GpioRegs {
        self.base[port.index()] as *mut GpioRegs
    }

    fn reg_ptr(&self, port: PortId, reg: Register) -> *mut u32 {
        let regs = self.regs(port);
        // SAFETY: only computes field addresses inside the register block.
        unsafe {
            match reg {
                Register::Data => addr_of_mut!((*regs).data).cast::<u32>().add(255),
                Register::Dir => addr_of_mut!((*regs).dir),
                Register::Afsel => addr_of_mut!((*regs).afsel),
                Register::Pur => addr_of_mut!((*regs).pur),
                Register::Pdr => addr_of_mut!((*regs).pdr),
                Register::Den => addr_of_mut!((*regs).den),
                Register::Lock => addr_of_mut!((*regs).lock),
                Register::Cr => addr_of_mut!((*regs).cr),
                Register::Amsel => addr_of_mut!((*regs).amsel),
                Register::Pctl => addr_of_mut!((*regs).pctl),
            }
        }
    }
}

impl GpioBus for Gpio {
    fn read(&self, port: PortId, reg: Register) -> u32 {
        // SAFETY: address is inside a mapped GPIO block (see `Gpio::new`).
        unsafe { read_volatile(self.reg_ptr(port, reg)) }
    }

    fn write(&mut self, port: PortId, reg: Register, value: u32) {
        // SAFETY: address is inside a mapped GPIO block (see `Gpio::new`).
        unsafe { write_volatile(self.reg_ptr(port, reg), value) }
    }

    fn enable_clock(&mut self, port: PortId) {
        let bit = 1u32 << port.index();
        // SAFETY: fixed system control registers, always mapped.
        unsafe {
            let rcgc = SYSCTL_RCGCGPIO as *mut u32;
            let val = read_volatile(rcgc);
            write_volatile(rcgc, val | bit);
            // A few cycles must pass before the port registers respond.
            let _ = read_volatile(SYSCTL_PRGPIO as *const u32);
        }
    }
}
