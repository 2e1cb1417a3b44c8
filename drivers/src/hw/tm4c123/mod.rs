pub mod gpio;
pub mod model;

pub use gpio::{Gpio, GpioBus, PortPins, Register};
pub use model::RegisterModel;
