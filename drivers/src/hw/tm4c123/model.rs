//! In-memory model of the GPIO register file.
//!
//! [`RegisterModel`] behaves like the hardware where the driver can observe
//! it: the commit protection of locked pins, the LOCK/CR handshake and the
//! reset values of the debug pins. Every access that changes state is kept
//! in an access trace so callers can check the order of writes.

use super::gpio::{GPIO_UNLOCK_KEY, GpioBus, Register, locked_pins};
use crate::hal::config::{PORT_COUNT, PortId};
use heapless::Vec;

/// Capacity of the access trace.
pub const TRACE_CAPACITY: usize = 512;

/// One state-changing access seen by the model.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Access {
    Write {
        port: PortId,
        reg: Register,
        value: u32,
    },
    Clock {
        port: PortId,
    },
}

/// Register file of all ports, held in RAM.
#[derive(Debug, Clone)]
pub struct RegisterModel {
    regs: [[u32; Register::COUNT]; PORT_COUNT],
    unlocked: [bool; PORT_COUNT],
    clocks: u8,
    trace: Vec<Access, TRACE_CAPACITY>,
}

impl RegisterModel {
    /// Model in its reset state.
    pub fn new() -> Self {
        let mut regs = [[0u32; Register::COUNT]; PORT_COUNT];
        for port in PortId::ALL {
            let r = &mut regs[port.index()];
            r[Register::Lock.index()] = 1;
            r[Register::Cr.index()] = u32::from(!locked_pins(port).bits());
        }
        // Port C comes out of reset driving JTAG/SWD on PC0..PC3.
        let c = &mut regs[PortId::C.index()];
        c[Register::Afsel.index()] = 0x0F;
        c[Register::Den.index()] = 0x0F;
        c[Register::Pur.index()] = 0x0F;
        c[Register::Pctl.index()] = 0x0000_1111;

        Self {
            regs,
            unlocked: [false; PORT_COUNT],
            clocks: 0,
            trace: Vec::new(),
        }
    }

    /// Raw register value.
    pub fn reg(&self, port: PortId, reg: Register) -> u32 {
        self.regs[port.index()][reg.index()]
    }

    /// Bit `pin` of a register.
    pub fn bit(&self, port: PortId, reg: Register, pin: u8) -> bool {
        self.reg(port, reg) & (1 << pin) != 0
    }

    /// The 4-bit PCTL field of `pin`.
    pub fn pctl_field(&self, port: PortId, pin: u8) -> u32 {
        (self.reg(port, Register::Pctl) >> (u32::from(pin) * 4)) & 0xF
    }

    pub fn clock_enabled(&self, port: PortId) -> bool {
        self.clocks & (1 << port.index()) != 0
    }

    pub fn is_unlocked(&self, port: PortId) -> bool {
        self.unlocked[port.index()]
    }

    /// Change a register behind the driver's back, bypassing protection and
    /// the trace.
    pub fn poke(&mut self, port: PortId, reg: Register, value: u32) {
        self.regs[port.index()][reg.index()] = value;
    }

    /// Accesses recorded since creation or the last [`clear_trace`](Self::clear_trace).
    pub fn trace(&self) -> &[Access] {
        &self.trace
    }

    pub fn clear_trace(&mut self) {
        self.trace.clear();
    }

    /// Position of the first write to `reg` of `port` in the trace.
    pub fn first_write(&self, port: PortId, reg: Register) -> Option<usize> {
        self.trace.iter().position(
            |a| matches!(a, Access::Write { port: p, reg: r, .. } if *p == port && *r == reg),
        )
    }

    /// Number of writes to `reg` of `port` in the trace.
    pub fn writes_to(&self, port: PortId, reg: Register) -> usize {
        self.trace
            .iter()
            .filter(|a| matches!(a, Access::Write { port: p, reg: r, .. } if *p == port && *r == reg))
            .count()
    }

    fn record(&mut self, access: Access) {
        // A full trace stops growing; the register file stays exact.
        let _ = self.trace.push(access);
    }
}

impl Default for RegisterModel {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioBus for RegisterModel {
    fn read(&self, port: PortId, reg: Register) -> u32 {
        match reg {
            Register::Lock => u32::from(!self.is_unlocked(port)),
            _ => self.reg(port, reg),
        }
    }

    fn write(&mut self, port: PortId, reg: Register, value: u32) {
        self.record(Access::Write { port, reg, value });

        let p = port.index();
        match reg {
            Register::Lock => self.unlocked[p] = value == GPIO_UNLOCK_KEY,
            Register::Cr => {
                if self.unlocked[p] {
                    self.regs[p][reg.index()] = value & 0xFF;
                }
            }
            _ if reg.is_commit_protected() => {
                // Bits not committed keep their old value.
                let writable = self.regs[p][Register::Cr.index()] & 0xFF;
                let old = self.regs[p][reg.index()];
                self.regs[p][reg.index()] = (old & !writable) | (value & writable);
            }
            _ => self.regs[p][reg.index()] = value,
        }
    }

    fn enable_clock(&mut self, port: PortId) {
        self.record(Access::Clock { port });
        self.clocks |= 1 << port.index();
    }
}
