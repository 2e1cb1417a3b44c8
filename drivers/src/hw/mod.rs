//! Raw register maps.
//!
//! Nothing in here validates pins or applies policy; that happens in
//! [`platform`](crate::platform) and [`port`](crate::port).

pub mod tm4c123;
