//! TM4C123 Port Driver
//!
//! Configures the GPIO pins of the microcontroller from a build-time table
//! and lets higher layers change pin direction or function afterwards where
//! the table allows it.
//!
//! # Module Organization
//!
//! - [`hal`]: Platform-independent pin attributes and the [`PinControl`] trait
//! - [`hw`]: Raw register maps, memory-mapped and in-memory
//! - [`platform`]: Platform-specific `PinControl` implementations
//! - [`port`]: The port driver service API
//!
//! # Usage Example
//!
//! ```no_run
//! use common::LogSink;
//! use tm4c_drivers::hal::port::PinDirection;
//! use tm4c_drivers::platform::tm4c123::Tm4c123Port;
//! use tm4c_drivers::port::{Port, PinId, board};
//!
//! let mut port = Port::new(unsafe { Tm4c123Port::mmio() }, LogSink);
//! port.init(&board::PORT_CONFIGURATION)?;
//! port.set_pin_direction(PinId::PF3, PinDirection::In)?;
//! # Ok::<(), tm4c_drivers::port::PortError>(())
//! ```

#![cfg_attr(not(test), no_std)]

pub mod hal;
pub mod hw;
pub mod platform;
pub mod port;

// Re-export commonly used types
pub use hal::port::{PinControl, PinDirection, PinLevel, PullMode};
pub use port::{Port, PortError};
