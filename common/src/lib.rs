//! Shared building blocks for the microcontroller abstraction drivers.
//!
//! - [`std_types`]: scalar aliases and the version record every driver reports
//! - [`det`]: the diagnostic (development error) reporting interface

#![cfg_attr(not(test), no_std)]

pub mod det;
pub mod std_types;

pub use det::{DetLog, DetReport, DiagnosticSink, LogSink};
pub use std_types::VersionInfo;
