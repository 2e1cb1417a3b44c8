//! Hardware Abstraction Layer (HAL) - Platform-Independent Traits
//!
//! This module defines the traits the port driver uses to reach the
//! hardware. Platform modules implement them on top of their register
//! maps; test code implements them on top of an in-memory model.
//!
//! # Available Interfaces
//!
//! - [`config`]: port and pin identifiers, pin functions, configuration table entries
//! - [`port`]: pin configuration (direction, pull, function select)

pub mod config;
pub mod port;
