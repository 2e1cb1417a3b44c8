//! Platform Abstraction Layer
//!
//! Each supported microcontroller implements the [`Platform`] trait and
//! hands out the [`PinControl`] implementation for its GPIO ports.
//!
//! # Usage
//!
//! ```no_run
//! use tm4c_drivers::platform::{CurrentPlatform, Platform};
//! use tm4c_drivers::port::{Port, board};
//! use common::LogSink;
//!
//! let pins = unsafe { CurrentPlatform::pin_control() };
//! let mut port = Port::new(pins, LogSink);
//! port.init(&board::PORT_CONFIGURATION).ok();
//! ```

use crate::hal::port::PinControl;

/// Platform trait - implemented by each supported platform
pub trait Platform {
    /// Pin control over the platform's memory-mapped ports.
    type Pins: PinControl;

    /// Platform name for debugging
    fn name() -> &'static str;

    /// Obtain the pin control for the real hardware.
    ///
    /// # Safety
    /// Must only be called once, and only on the platform itself.
    unsafe fn pin_control() -> Self::Pins;
}

// Platform selection based on Cargo features
cfg_if::cfg_if! {
    if #[cfg(feature = "tm4c123")] {
        pub mod tm4c123;
        pub use tm4c123::Tm4c123Platform as CurrentPlatform;
    } else {
        compile_error!(
            "No platform selected!\n\
            Use: cargo build --features tm4c123"
        );
    }
}
